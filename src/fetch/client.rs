// src/fetch/client.rs
use std::thread;
use std::time::Duration;

use tracing::{ debug, warn };

use crate::config::options::FetchOptions;
use crate::core::net::{ HttpGet, HttpResponse, NetError };
use crate::error::{ Error, Result };
use crate::ids::AppId;
use super::appdetails::{ self, AppDetails, Details };
use super::record::{ AppRecord, FetchStatus };

/// Anything that can block the current thread for a while.
pub trait Sleeper {
    fn sleep(&mut self, d: Duration);
}

pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, d: Duration) {
        if !d.is_zero() {
            thread::sleep(d);
        }
    }
}

impl<S: Sleeper + ?Sized> Sleeper for &mut S {
    fn sleep(&mut self, d: Duration) {
        (**self).sleep(d)
    }
}

/// Single response, judged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Found(AppDetails),
    /// HTTP 404. Final.
    NotFound,
    /// `success: false` or no entry for the id. Steam also answers throttled
    /// clients this way, so it is retried and only becomes not-found once
    /// attempts run out.
    Unlisted,
    RateLimited { retry_after: Option<Duration> },
    /// Worth another try: 5xx, undecodable body.
    Transient(String),
    /// Not worth another try.
    Rejected(String),
}

pub fn classify(app_id: AppId, resp: &HttpResponse) -> Outcome {
    match resp.status {
        200 => match appdetails::parse(&resp.body, app_id) {
            Ok(Details::Found(d)) => Outcome::Found(d),
            Ok(Details::Missing) => Outcome::Unlisted,
            Ok(Details::Throttled) => Outcome::RateLimited { retry_after: resp.retry_after },
            Err(e) => Outcome::Transient(format!("bad appdetails body: {e}")),
        },
        // Steam answers throttled clients with 403 as often as 429
        403 | 429 => Outcome::RateLimited { retry_after: resp.retry_after },
        404 => Outcome::NotFound,
        500..=599 => Outcome::Transient(format!("HTTP {}", resp.status)),
        s => Outcome::Rejected(format!("HTTP {s}")),
    }
}

enum Failure {
    RateLimited,
    Unlisted,
    Other(String),
}

/// Sequential, paced client for the appdetails endpoint.
///
/// One request in flight at a time. A fixed pacing interval separates every
/// two requests this client sends, retries included. Rate-limit and transient
/// failures back off per `FetchOptions::backoff`, up to `max_retries` extra
/// attempts.
pub struct FetchClient<H, S = ThreadSleeper> {
    http: H,
    sleeper: S,
    opts: FetchOptions,
    requests: u64,
}

impl<H: HttpGet> FetchClient<H, ThreadSleeper> {
    pub fn new(http: H, opts: FetchOptions) -> Self {
        Self::with_sleeper(http, ThreadSleeper, opts)
    }
}

impl<H: HttpGet, S: Sleeper> FetchClient<H, S> {
    pub fn with_sleeper(http: H, sleeper: S, opts: FetchOptions) -> Self {
        Self { http, sleeper, opts, requests: 0 }
    }

    pub fn requests_sent(&self) -> u64 {
        self.requests
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    fn send(&mut self, url: &str) -> std::result::Result<HttpResponse, NetError> {
        if self.requests > 0 {
            self.sleeper.sleep(self.opts.pacing);
        }
        self.requests += 1;
        debug!("GET {url}");
        self.http.get(url)
    }

    /// Resolve one app. Per-app failures come back as a record with a non-ok
    /// status; only a network that never answered is an `Err`.
    pub fn fetch(&mut self, app_id: AppId) -> Result<AppRecord> {
        let base = self.opts.store_base.clone();
        let url = appdetails::appdetails_url(&base, app_id);
        let attempts = self.opts.max_retries.saturating_add(1);

        let mut reached = false;
        let mut unreachable: Option<NetError> = None;
        let mut last = Failure::Other(String::from("no attempt made"));

        for attempt in 1..=attempts {
            let mut hint = None;

            match self.send(&url) {
                Err(e) => {
                    if e.is_unreachable() {
                        last = Failure::Other(e.to_string());
                        unreachable = Some(e);
                    } else {
                        reached = true;
                        last = Failure::Other(e.to_string());
                    }
                }
                Ok(resp) => {
                    reached = true;
                    match classify(app_id, &resp) {
                        Outcome::Found(d) => {
                            return Ok(AppRecord::found(&base, app_id, d.name, d.header_image, d.trailer));
                        }
                        Outcome::NotFound => {
                            debug!("App {app_id}: not found");
                            return Ok(AppRecord::failed(&base, app_id, FetchStatus::NotFound));
                        }
                        Outcome::Rejected(msg) => {
                            warn!("App {app_id}: {msg}, not retrying");
                            return Ok(AppRecord::failed(&base, app_id, FetchStatus::Error(msg)));
                        }
                        Outcome::Unlisted => {
                            last = Failure::Unlisted;
                        }
                        Outcome::RateLimited { retry_after } => {
                            hint = retry_after;
                            last = Failure::RateLimited;
                        }
                        Outcome::Transient(msg) => {
                            last = Failure::Other(msg);
                        }
                    }
                }
            }

            if attempt == attempts {
                break;
            }

            let wait = hint
                .map(|h| h.min(self.opts.backoff.ceiling()))
                .unwrap_or_else(|| self.opts.backoff.delay(attempt));
            let why = match &last {
                Failure::RateLimited => "rate limited",
                Failure::Unlisted => "success=false",
                Failure::Other(msg) => msg.as_str(),
            };
            warn!("App {app_id}: {why} (attempt {attempt}/{attempts}), retrying in {wait:?}");
            self.sleeper.sleep(wait);
        }

        if !reached {
            if let Some(source) = unreachable {
                return Err(Error::Unreachable { app_id, source });
            }
        }

        let status = match last {
            Failure::RateLimited => FetchStatus::RateLimitedExhausted,
            Failure::Unlisted => FetchStatus::NotFound,
            Failure::Other(msg) => FetchStatus::Error(msg),
        };
        warn!("App {app_id}: giving up after {attempts} attempt(s): {status}");
        Ok(AppRecord::failed(&base, app_id, status))
    }
}
