// src/ids.rs
// Identifier ingestion: free-form text in, ordered unique app ids out.
// Accepts any mix of commas, spaces and newlines; trailing commas are fine.

use std::collections::HashSet;
use std::fmt;
use std::num::NonZeroU32;
use std::path::Path;
use std::str::FromStr;

use tracing::{ debug, warn };

use crate::error::{ Error, Result };

/// Steam application id. Always positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AppId(NonZeroU32);

impl AppId {
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(AppId)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidAppId(pub String);

impl fmt::Display for InvalidAppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a positive integer app id: {:?}", self.0)
    }
}

impl std::error::Error for InvalidAppId {}

impl FromStr for AppId {
    type Err = InvalidAppId;

    /// Digits only: no sign, no whitespace, no zero.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidAppId(s.to_string()));
        }
        s.parse::<u32>()
            .ok()
            .and_then(AppId::new)
            .ok_or_else(|| InvalidAppId(s.to_string()))
    }
}

/// Outcome of parsing, for callers that want to report what was dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub ids: Vec<AppId>,
    pub rejected: Vec<String>,
    pub duplicates: usize,
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
}

pub fn parse_report(text: &str) -> ParseReport {
    let mut report = ParseReport::default();
    let mut seen = HashSet::new();

    for tok in tokens(text) {
        match tok.parse::<AppId>() {
            Ok(id) => {
                if seen.insert(id) {
                    report.ids.push(id);
                } else {
                    report.duplicates += 1;
                    debug!("Duplicate app id {id} ignored");
                }
            }
            Err(_) => {
                warn!("Ignoring non-numeric token: {tok:?}");
                report.rejected.push(tok.to_string());
            }
        }
    }
    report
}

/// Ordered, de-duplicated app ids. Malformed tokens are skipped with a warning.
pub fn parse_identifiers(text: &str) -> Vec<AppId> {
    parse_report(text).ids
}

/// Read and parse an identifier file.
pub fn load_file(path: &Path) -> Result<Vec<AppId>> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(parse_identifiers(&text))
}
