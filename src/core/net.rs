// src/core/net.rs
// HTTP GET seam. The fetch loop only ever sees `HttpGet`; production uses a
// blocking reqwest client, tests script their own responses.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ COOKIE, RETRY_AFTER };
use thiserror::Error;

use crate::config::consts::STEAM_COOKIES;
use crate::config::options::FetchOptions;

#[derive(Debug, Error)]
pub enum NetError {
    /// Connect or DNS failure; nothing reached the server.
    #[error("unreachable: {0}")]
    Unreachable(String),

    #[error("timed out: {0}")]
    Timeout(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("could not read response body: {0}")]
    Body(String),
}

impl NetError {
    pub fn is_unreachable(&self) -> bool {
        matches!(self, NetError::Unreachable(_))
    }
}

/// The parts of a response the fetch loop cares about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
    pub retry_after: Option<Duration>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into(), retry_after: None }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn with_retry_after(mut self, wait: Duration) -> Self {
        self.retry_after = Some(wait);
        self
    }

}

pub trait HttpGet {
    fn get(&self, url: &str) -> Result<HttpResponse, NetError>;
}

impl<T: HttpGet + ?Sized> HttpGet for &T {
    fn get(&self, url: &str) -> Result<HttpResponse, NetError> {
        (**self).get(url)
    }
}

/// Blocking client for the Steam store, with age-gate cookies attached.
pub struct SteamHttp {
    client: Client,
    cookie: String,
}

impl SteamHttp {
    pub fn new(opts: &FetchOptions) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(opts.user_agent.as_str())
            .timeout(opts.timeout)
            .connect_timeout(opts.timeout)
            .build()?;
        Ok(Self { client, cookie: cookie_header() })
    }
}

impl HttpGet for SteamHttp {
    fn get(&self, url: &str) -> Result<HttpResponse, NetError> {
        let resp = self
            .client
            .get(url)
            .header(COOKIE, self.cookie.as_str())
            .send()
            .map_err(classify_reqwest)?;

        let status = resp.status().as_u16();
        let retry_after = resp
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after);

        let body = resp.text().map_err(|e| {
            if e.is_timeout() { NetError::Timeout(e.to_string()) } else { NetError::Body(e.to_string()) }
        })?;

        Ok(HttpResponse { status, body, retry_after })
    }
}

// Connect first: a connect that times out is still an unreachable host.
fn classify_reqwest(e: reqwest::Error) -> NetError {
    if e.is_connect() {
        NetError::Unreachable(e.to_string())
    } else if e.is_timeout() {
        NetError::Timeout(e.to_string())
    } else {
        NetError::Request(e.to_string())
    }
}

/// `birthtime=0; mature_content=1; ...`
pub fn cookie_header() -> String {
    STEAM_COOKIES
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Only the delta-seconds form; HTTP-date values are ignored.
pub fn parse_retry_after(v: &str) -> Option<Duration> {
    v.trim().parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{ Read, Write };
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    #[test]
    fn cookie_header_joins_all_pairs() {
        assert_eq!(cookie_header(), "birthtime=0; mature_content=1; lastagecheckage=1-0-1990");
    }

    #[test]
    fn retry_after_seconds_only() {
        assert_eq!(parse_retry_after(" 30 "), Some(Duration::from_secs(30)));
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), None);
    }

    /// One-shot local server: answers with `reply`, hands back the raw request.
    fn serve_once(reply: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
            }
            stream.write_all(reply.as_bytes()).unwrap();
            let _ = tx.send(String::from_utf8_lossy(&raw).into_owned());
        });
        (format!("http://{addr}/api/appdetails?appids=1"), rx)
    }

    fn test_opts() -> FetchOptions {
        FetchOptions {
            user_agent: "steam_bins-test/1.0".into(),
            timeout: Duration::from_secs(5),
            ..FetchOptions::default()
        }
    }

    #[test]
    fn real_request_sends_cookies_and_reads_retry_after() {
        let (url, rx) = serve_once(
            "HTTP/1.1 429 Too Many Requests\r\nRetry-After: 7\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        let http = SteamHttp::new(&test_opts()).unwrap();

        let resp = http.get(&url).unwrap();
        assert_eq!(resp.status, 429);
        assert_eq!(resp.retry_after, Some(Duration::from_secs(7)));

        // header names arrive lowercased from hyper
        let request = rx.recv_timeout(Duration::from_secs(5)).unwrap().to_ascii_lowercase();
        assert!(request.starts_with("get /api/appdetails?appids=1 "));
        assert!(request.contains("cookie: birthtime=0; mature_content=1; lastagecheckage=1-0-1990\r\n"));
        assert!(request.contains("user-agent: steam_bins-test/1.0\r\n"));
    }

    #[test]
    fn ok_response_keeps_body() {
        let (url, _rx) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 4\r\nConnection: close\r\n\r\nnull",
        );
        let resp = SteamHttp::new(&test_opts()).unwrap().get(&url).unwrap();
        assert_eq!(resp, HttpResponse::ok("null"));
    }

    #[test]
    fn refused_connection_is_unreachable() {
        // Bind then drop to get a port nobody listens on
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let http = SteamHttp::new(&test_opts()).unwrap();

        let err = http.get(&format!("http://127.0.0.1:{port}/api")).unwrap_err();
        assert!(err.is_unreachable(), "got {err:?}");
    }

    #[test]
    fn connect_timeout_is_unreachable() {
        // Non-routable: either black-holed until the connect timeout or refused by the stack
        let opts = FetchOptions { timeout: Duration::from_millis(200), ..test_opts() };
        let http = SteamHttp::new(&opts).unwrap();

        let err = http.get("http://10.255.255.1:81/api").unwrap_err();
        assert!(err.is_unreachable(), "got {err:?}");
    }
}
