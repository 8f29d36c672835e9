// src/fetch/mod.rs
mod appdetails;
mod client;
mod record;

pub use appdetails::AppDetails;
pub use client::{ classify, FetchClient, Outcome, Sleeper, ThreadSleeper };
pub use record::{ fallback_name, store_url, widget_url, AppRecord, FetchStatus, Trailer, TrailerKind };
