// src/config/options.rs
use std::path::{ Path, PathBuf };
use std::time::Duration;

use super::consts::*;
use crate::error::{ Error, Result };

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub input: InputOptions,
    pub fetch: FetchOptions,
    pub output: OutputOptions,
}

impl AppOptions {
    /// Reject combinations the runner can't honor.
    pub fn validate(&self) -> Result<()> {
        if self.output.batch_size == 0 {
            return Err(Error::InvalidOptions("batch size must be at least 1".into()));
        }
        if self.output.prefix.trim().is_empty() {
            return Err(Error::InvalidOptions("output prefix must not be empty".into()));
        }
        match self.fetch.backoff {
            BackoffPolicy::Exponential { base, max } if base.is_zero() || max < base => {
                Err(Error::InvalidOptions(format!(
                    "exponential backoff needs 0 < base <= max (base {base:?}, max {max:?})"
                )))
            }
            _ => Ok(()),
        }
    }
}

/* ---------------- Input ---------------- */

/// Where identifiers come from. Inline arguments win over the file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdSource {
    Inline(Vec<String>),
    File(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputOptions {
    pub source: IdSource,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self { source: IdSource::File(PathBuf::from(DEFAULT_IDS_FILE)) }
    }
}

impl InputOptions {
    /// Positional args override the file when any were given.
    pub fn from_args(args: Vec<String>, file: Option<PathBuf>) -> Self {
        let source = if !args.is_empty() {
            IdSource::Inline(args)
        } else {
            IdSource::File(file.unwrap_or_else(|| PathBuf::from(DEFAULT_IDS_FILE)))
        };
        Self { source }
    }
}

/* ---------------- Fetch ---------------- */

/// Wait between retries of a single identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackoffPolicy {
    Fixed(Duration),
    /// `base * 2^(retry-1)`, capped at `max`.
    Exponential { base: Duration, max: Duration },
}

impl BackoffPolicy {
    /// Delay before retry number `retry` (1-based).
    pub fn delay(&self, retry: u32) -> Duration {
        match *self {
            BackoffPolicy::Fixed(d) => d,
            BackoffPolicy::Exponential { base, max } => {
                let shift = retry.saturating_sub(1).min(20);
                base.checked_mul(1u32 << shift).unwrap_or(max).min(max)
            }
        }
    }

    /// Longest delay this policy will ever ask for.
    pub fn ceiling(&self) -> Duration {
        match *self {
            BackoffPolicy::Fixed(d) => d,
            BackoffPolicy::Exponential { max, .. } => max,
        }
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        BackoffPolicy::Exponential {
            base: Duration::from_millis(BACKOFF_BASE_MS),
            max: Duration::from_millis(BACKOFF_MAX_MS),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    pub pacing: Duration,
    pub max_retries: u32,
    pub backoff: BackoffPolicy,
    pub user_agent: String,
    pub timeout: Duration,
    pub store_base: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            pacing: Duration::from_millis(PACING_MS),
            max_retries: MAX_RETRIES,
            backoff: BackoffPolicy::default(),
            user_agent: USER_AGENT.to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            store_base: STORE_BASE.to_string(),
        }
    }
}

/* ---------------- Output ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputOptions {
    pub dir: PathBuf,
    pub prefix: String,
    pub batch_size: usize,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            prefix: OUTPUT_PREFIX.to_string(),
            batch_size: BATCH_SIZE,
        }
    }
}

impl OutputOptions {
    /// `<dir>/<prefix>_<index>.html`, index is 1-based.
    pub fn page_path(&self, index: usize) -> PathBuf {
        self.dir.join(self.page_file_name(index))
    }

    pub fn page_file_name(&self, index: usize) -> String {
        format!("{}_{}.html", self.prefix, index)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
