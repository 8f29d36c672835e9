// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

use crate::core::net::NetError;
use crate::ids::AppId;

/// Run-level failures. Per-app fetch problems never show up here; they are
/// recorded on the `AppRecord` instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("network unreachable while fetching app {app_id}: {source}")]
    Unreachable {
        app_id: AppId,
        #[source]
        source: NetError,
    },

    #[error("could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
