// src/fetch/appdetails.rs
// Decoding of the store `appdetails` endpoint.
//
// Body shapes seen in the wild:
//   {"<id>": {"success": true,  "data": {...}}}
//   {"<id>": {"success": false}}            unknown / delisted / region-locked
//   null                                    throttled

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::config::consts::APPDETAILS_PATH;
use crate::ids::AppId;
use super::record::{ Trailer, TrailerKind };

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    success: bool,
    // Steam sends `[]` instead of an object for some failures
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct AppData {
    name: Option<String>,
    header_image: Option<String>,
    #[serde(default)]
    movies: Vec<Movie>,
}

#[derive(Debug, Default, Deserialize)]
struct Movie {
    #[serde(default)]
    highlight: bool,
    dash_h264: Option<String>,
    hls_h264: Option<String>,
    mp4: Option<HashMap<String, String>>,
    webm: Option<HashMap<String, String>>,
}

impl Movie {
    fn trailer(&self) -> Option<Trailer> {
        let max = |m: &Option<HashMap<String, String>>| m.as_ref().and_then(|m| m.get("max")).cloned();

        if let Some(url) = self.dash_h264.clone() {
            return Some(Trailer::new(TrailerKind::Dash, url));
        }
        if let Some(url) = self.hls_h264.clone() {
            return Some(Trailer::new(TrailerKind::Hls, url));
        }
        if let Some(url) = max(&self.mp4) {
            return Some(Trailer::new(TrailerKind::Mp4, url));
        }
        max(&self.webm).map(|url| Trailer::new(TrailerKind::Webm, url))
    }
}

/// What one app's metadata resolved to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppDetails {
    pub name: Option<String>,
    pub header_image: Option<String>,
    pub trailer: Option<Trailer>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Details {
    Found(AppDetails),
    Missing,
    Throttled,
}

pub fn appdetails_url(base: &str, app_id: AppId) -> String {
    format!("{}{}?appids={app_id}", base.trim_end_matches('/'), APPDETAILS_PATH)
}

pub fn parse(body: &str, app_id: AppId) -> Result<Details, serde_json::Error> {
    let top: Option<HashMap<String, Entry>> = serde_json::from_str(body)?;
    let Some(mut top) = top else {
        return Ok(Details::Throttled);
    };
    let Some(entry) = top.remove(&app_id.to_string()) else {
        return Ok(Details::Missing);
    };
    if !entry.success {
        return Ok(Details::Missing);
    }
    let data: AppData = match entry.data {
        Some(v @ Value::Object(_)) => serde_json::from_value(v)?,
        _ => return Ok(Details::Missing),
    };

    // Highlighted movie first, else whatever comes first
    let trailer = data
        .movies
        .iter()
        .filter(|m| m.highlight)
        .chain(data.movies.iter())
        .find_map(Movie::trailer);

    Ok(Details::Found(AppDetails {
        name: data.name.map(|n| crate::core::sanitize::normalize_ws(&n)),
        header_image: data.header_image,
        trailer,
    }))
}
