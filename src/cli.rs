// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::{ ArgAction, Parser, ValueEnum };
use color_eyre::eyre::WrapErr;

use crate::config::consts::*;
use crate::config::options::{ AppOptions, BackoffPolicy, FetchOptions, InputOptions, OutputOptions };
use crate::core::sanitize::sanitize_file_stem;
use crate::file::normalize_separators;
use crate::progress::ConsoleProgress;
use crate::{ log, runner };

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackoffKind {
    Fixed,
    Exponential,
}

/// Fetch Steam app metadata and write paged HTML trailer grids.
///
/// Ids come from the positional arguments when any are given, otherwise from
/// the identifier file. Commas, spaces and newlines all separate ids.
#[derive(Debug, Parser)]
#[command(name = "steam_bins", version, about)]
pub struct Args {
    /// App ids; override the file when present
    pub app_ids: Vec<String>,

    /// Identifier file
    #[arg(short, long, default_value = DEFAULT_IDS_FILE)]
    pub file: PathBuf,

    /// Directory for the generated pages
    #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
    pub out_dir: String,

    /// Page file prefix: <prefix>_<n>.html
    #[arg(long, default_value = OUTPUT_PREFIX)]
    pub prefix: String,

    /// Apps per page
    #[arg(short, long, default_value_t = BATCH_SIZE)]
    pub batch_size: usize,

    /// Pause between any two requests, in milliseconds
    #[arg(long, default_value_t = PACING_MS)]
    pub pacing_ms: u64,

    /// Extra attempts per app after a rate limit or transient failure
    #[arg(long, default_value_t = MAX_RETRIES)]
    pub max_retries: u32,

    #[arg(long, value_enum, default_value_t = BackoffKind::Exponential)]
    pub backoff: BackoffKind,

    /// Fixed interval, or the first exponential step
    #[arg(long, default_value_t = BACKOFF_BASE_MS)]
    pub backoff_base_ms: u64,

    /// Cap for exponential backoff and for Retry-After
    #[arg(long, default_value_t = BACKOFF_MAX_MS)]
    pub backoff_max_ms: u64,

    #[arg(long, default_value = USER_AGENT)]
    pub user_agent: String,

    /// Also append log lines to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    pub fn into_options(self) -> AppOptions {
        let base = Duration::from_millis(self.backoff_base_ms);
        let backoff = match self.backoff {
            BackoffKind::Fixed => BackoffPolicy::Fixed(base),
            BackoffKind::Exponential => BackoffPolicy::Exponential {
                base,
                max: Duration::from_millis(self.backoff_max_ms),
            },
        };

        AppOptions {
            input: InputOptions::from_args(self.app_ids, Some(self.file)),
            fetch: FetchOptions {
                pacing: Duration::from_millis(self.pacing_ms),
                max_retries: self.max_retries,
                backoff,
                user_agent: self.user_agent,
                ..FetchOptions::default()
            },
            output: OutputOptions {
                dir: PathBuf::from(normalize_separators(&self.out_dir)),
                prefix: sanitize_file_stem(&self.prefix, OUTPUT_PREFIX),
                batch_size: self.batch_size,
            },
        }
    }
}

pub fn run() -> color_eyre::Result<()> {
    let args = Args::parse();
    log::init(log::level_for(args.verbose, args.quiet), args.log_file.as_deref())
        .wrap_err("could not set up logging")?;

    let opts = args.into_options();
    let mut progress = ConsoleProgress::default();
    let summary = runner::run(&opts, Some(&mut progress))?;

    if summary.files_written.is_empty() {
        println!("No app ids found. Pass ids as arguments or list them in a file (--file).");
    } else if summary.failed > 0 {
        println!("{} of {} app(s) could not be resolved", summary.failed, summary.apps);
    }
    Ok(())
}
