// src/log.rs
// tracing setup: stderr always, optional append-only file.
// Timestamps are elapsed time since start, not wall clock.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{ Mutex, OnceLock };
use std::time::Instant;

use tracing_subscriber::{
    fmt::{ self, format::Writer, time::FormatTime },
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::error::{ Error, Result };

static START: OnceLock<Instant> = OnceLock::new();

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

#[derive(Clone, Copy, Debug, Default)]
struct Elapsed;

impl FormatTime for Elapsed {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "[{}]", fmt_elapsed(start().elapsed().as_millis()))
    }
}

/// Filter directive for the -v/-q flags, used when RUST_LOG is unset.
pub fn level_for(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Calling it twice is harmless; the second
/// call leaves the first subscriber in place.
pub fn init(level: &str, log_file: Option<&Path>) -> Result<()> {
    start();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(Elapsed)
        .with_target(false);

    let file = match log_file {
        Some(path) => {
            let f = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| Error::io(path, e))?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(f))
                    .with_ansi(false)
                    .with_timer(Elapsed)
                    .with_target(false),
            )
        }
        None => None,
    };

    // A second init (tests, embedding) keeps the first subscriber
    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(file)
        .try_init()
    {
        tracing::debug!("Logging already initialized: {e}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_format() {
        assert_eq!(fmt_elapsed(0), "00:00:00.000");
        assert_eq!(fmt_elapsed(3_723_004), "01:02:03.004");
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(0, false), "info");
        assert_eq!(level_for(1, false), "debug");
        assert_eq!(level_for(3, false), "trace");
        assert_eq!(level_for(2, true), "warn");
    }

    #[test]
    fn init_twice_keeps_first_subscriber() {
        assert!(init("warn", None).is_ok());
        assert!(init("debug", None).is_ok());
    }
}
