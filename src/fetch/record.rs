// src/fetch/record.rs
use std::fmt;

use crate::ids::AppId;

/// How the fetch for one app ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchStatus {
    Ok,
    NotFound,
    RateLimitedExhausted,
    Error(String),
}

impl FetchStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, FetchStatus::Ok)
    }

    pub fn label(&self) -> &'static str {
        match self {
            FetchStatus::Ok => "ok",
            FetchStatus::NotFound => "not found",
            FetchStatus::RateLimitedExhausted => "rate limited",
            FetchStatus::Error(_) => "error",
        }
    }
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStatus::Error(msg) => write!(f, "error: {msg}"),
            other => f.write_str(other.label()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrailerKind {
    /// MPEG-DASH manifest, played through dash.js
    Dash,
    Hls,
    Mp4,
    Webm,
    /// No movie in the metadata; link to the store page instead
    StorePage,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trailer {
    pub kind: TrailerKind,
    pub url: String,
}

impl Trailer {
    pub fn new(kind: TrailerKind, url: impl Into<String>) -> Self {
        Self { kind, url: url.into() }
    }

    /// Whether a `<video>` element can play this directly (dash.js for DASH).
    pub fn is_playable(&self) -> bool {
        matches!(self.kind, TrailerKind::Dash | TrailerKind::Mp4 | TrailerKind::Webm)
    }
}

/// One app, fully resolved. Built by the fetch client, never mutated after.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppRecord {
    pub app_id: AppId,
    pub display_name: String,
    pub widget_url: String,
    pub store_url: String,
    pub header_image: Option<String>,
    pub trailer: Option<Trailer>,
    pub status: FetchStatus,
}

impl AppRecord {
    pub fn found(
        base: &str,
        app_id: AppId,
        name: Option<String>,
        header_image: Option<String>,
        trailer: Option<Trailer>,
    ) -> Self {
        let store_url = store_url(base, app_id);
        let trailer = trailer.unwrap_or_else(|| Trailer::new(TrailerKind::StorePage, store_url.clone()));
        Self {
            app_id,
            display_name: name.filter(|n| !n.is_empty()).unwrap_or_else(|| fallback_name(app_id)),
            widget_url: widget_url(base, app_id),
            store_url,
            header_image: header_image.filter(|h| !h.is_empty()),
            trailer: Some(trailer),
            status: FetchStatus::Ok,
        }
    }

    pub fn failed(base: &str, app_id: AppId, status: FetchStatus) -> Self {
        Self {
            app_id,
            display_name: fallback_name(app_id),
            widget_url: widget_url(base, app_id),
            store_url: store_url(base, app_id),
            header_image: None,
            trailer: None,
            status,
        }
    }
}

pub fn fallback_name(app_id: AppId) -> String {
    format!("App {app_id}")
}

pub fn widget_url(base: &str, app_id: AppId) -> String {
    format!("{}/widget/{app_id}/", base.trim_end_matches('/'))
}

pub fn store_url(base: &str, app_id: AppId) -> String {
    format!("{}/app/{app_id}/", base.trim_end_matches('/'))
}
