// src/config/consts.rs

// Net config
pub const STORE_BASE: &str = "https://store.steampowered.com";
pub const APPDETAILS_PATH: &str = "/api/appdetails";
pub const USER_AGENT: &str = concat!("steam_bins/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

// Age gate and mature content warnings
pub const STEAM_COOKIES: &[(&str, &str)] = &[
    ("birthtime", "0"),
    ("mature_content", "1"),
    ("lastagecheckage", "1-0-1990"),
];

// Rate budget: appdetails tolerates ~200 calls per 5 minutes, keep some headroom
pub const API_WINDOW_SECS: u64 = 300;
pub const API_MAX_CALLS: u64 = 195;
pub const PACING_MS: u64 = API_WINDOW_SECS * 1_000 / API_MAX_CALLS; // ~1538 ms

// Retry
pub const MAX_RETRIES: u32 = 4;
pub const BACKOFF_BASE_MS: u64 = 2_000;
pub const BACKOFF_MAX_MS: u64 = 60_000;

// Input
pub const DEFAULT_IDS_FILE: &str = "steam_appids.txt";

// Output
pub const DEFAULT_OUT_DIR: &str = ".";
pub const OUTPUT_PREFIX: &str = "rando_bin";
pub const BATCH_SIZE: usize = 100;
