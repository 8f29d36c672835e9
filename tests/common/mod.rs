// tests/common/mod.rs
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

use steam_bins::config::options::{ BackoffPolicy, FetchOptions };
use steam_bins::core::net::{ HttpGet, HttpResponse, NetError };
use steam_bins::fetch::Sleeper;
use steam_bins::ids::AppId;

pub const PACING: Duration = Duration::from_millis(10);
pub const BASE: Duration = Duration::from_millis(100);
pub const MAX: Duration = Duration::from_millis(1_000);

pub fn id(n: u32) -> AppId {
    AppId::new(n).unwrap()
}

pub fn opts(max_retries: u32) -> FetchOptions {
    FetchOptions {
        pacing: PACING,
        max_retries,
        backoff: BackoffPolicy::Exponential { base: BASE, max: MAX },
        ..FetchOptions::default()
    }
}

pub fn ok_body(app: u32, name: &str) -> HttpResponse {
    HttpResponse::ok(format!(
        r#"{{"{app}":{{"success":true,"data":{{"name":"{name}","header_image":"https://cdn/{app}.jpg"}}}}}}"#
    ))
}

pub fn missing_body(app: u32) -> HttpResponse {
    HttpResponse::ok(format!(r#"{{"{app}":{{"success":false}}}}"#))
}

pub fn throttled() -> HttpResponse {
    HttpResponse::new(429, "")
}

/// Hands out queued responses in order, remembering every URL asked for.
#[derive(Default)]
pub struct Scripted {
    queue: RefCell<VecDeque<Result<HttpResponse, NetError>>>,
    pub urls: RefCell<Vec<String>>,
}

impl Scripted {
    pub fn new(items: Vec<Result<HttpResponse, NetError>>) -> Self {
        Self { queue: RefCell::new(items.into()), urls: RefCell::new(Vec::new()) }
    }

    pub fn calls(&self) -> usize {
        self.urls.borrow().len()
    }
}

impl HttpGet for Scripted {
    fn get(&self, url: &str) -> Result<HttpResponse, NetError> {
        self.urls.borrow_mut().push(url.to_string());
        self.queue
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(500, "script exhausted")))
    }
}

/// Answers per request from a closure over the requested app id.
pub struct FnHttp<F>(pub F);

impl<F: Fn(u32) -> Result<HttpResponse, NetError>> FnHttp<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F: Fn(u32) -> Result<HttpResponse, NetError>> HttpGet for FnHttp<F> {
    fn get(&self, url: &str) -> Result<HttpResponse, NetError> {
        (self.0)(app_of(url))
    }
}

pub fn app_of(url: &str) -> u32 {
    url.rsplit("appids=").next().and_then(|s| s.parse().ok()).unwrap_or(0)
}

#[derive(Default)]
pub struct RecordingSleeper {
    pub slept: Vec<Duration>,
}

impl Sleeper for RecordingSleeper {
    fn sleep(&mut self, d: Duration) {
        self.slept.push(d);
    }
}
