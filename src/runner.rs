// src/runner.rs
use std::path::PathBuf;

use tracing::{ info, warn };

use crate::{
    batch::{ batch_count, batches },
    config::options::{ AppOptions, IdSource, InputOptions, OutputOptions },
    core::net::{ HttpGet, SteamHttp },
    error::Result,
    fetch::{ FetchClient, Sleeper },
    file::{ ensure_directory, write_page },
    html,
    ids::{ self, AppId },
    progress::Progress,
};

/// Summary of what was produced.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files_written: Vec<PathBuf>,
    pub apps: usize,
    pub ok: usize,
    pub failed: usize,
}

/// Turn the configured source into app ids.
/// A missing default file is not an error; it just yields nothing.
pub fn resolve_ids(input: &InputOptions) -> Result<Vec<AppId>> {
    match &input.source {
        IdSource::Inline(args) => Ok(ids::parse_identifiers(&args.join(" "))),
        IdSource::File(path) if !path.exists() => {
            warn!("Identifier file {} not found; nothing to do", path.display());
            Ok(Vec::new())
        }
        IdSource::File(path) => ids::load_file(path),
    }
}

/// Top-level: read ids, fetch over the network, write pages.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(
    opts: &AppOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    opts.validate()?;

    let ids = resolve_ids(&opts.input)?;
    if ids.is_empty() {
        info!("No app ids to process");
        return Ok(RunSummary::default());
    }

    let http = SteamHttp::new(&opts.fetch)?;
    let mut client = FetchClient::new(http, opts.fetch.clone());
    run_with(&ids, &opts.output, &mut client, progress)
}

/// Fetch and write page by page, so an interrupted run keeps finished pages.
pub fn run_with<H: HttpGet, S: Sleeper>(
    ids: &[AppId],
    output: &OutputOptions,
    client: &mut FetchClient<H, S>,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    if ids.is_empty() {
        if let Some(p) = progress.as_deref_mut() {
            p.log("No app ids to process.");
            p.finish();
        }
        return Ok(summary);
    }

    let pages = batch_count(ids.len(), output.batch_size);
    info!("Processing {} app id(s) into {pages} page(s) of up to {}", ids.len(), output.batch_size);
    if let Some(p) = progress.as_deref_mut() {
        p.begin(ids.len(), pages);
    }

    ensure_directory(output.dir())?;

    for batch in batches(ids, output.batch_size) {
        let path = output.page_path(batch.index);
        info!("Batch {}/{pages} -> {} ({} apps)", batch.index, path.display(), batch.len());

        let mut records = Vec::with_capacity(batch.len());
        for &app_id in &batch.items {
            let record = match client.fetch(app_id) {
                Ok(r) => r,
                Err(e) => {
                    if let Some(p) = progress.as_deref_mut() {
                        p.log(&format!("Aborting: {e}"));
                        p.finish();
                    }
                    return Err(e);
                }
            };
            summary.apps += 1;
            if record.status.is_ok() { summary.ok += 1; } else { summary.failed += 1; }
            if let Some(p) = progress.as_deref_mut() {
                p.item_done(&record);
            }
            records.push(record);
        }

        let title = output.page_file_name(batch.index);
        let page = html::render_page(&title, &records);
        let written = write_page(&path, &page)?;
        let playable = html::playable_count(&records);
        info!("Written {} ({playable}/{} trailers playable)", written.display(), records.len());
        if let Some(p) = progress.as_deref_mut() {
            p.page_written(&written, records.len(), playable);
        }
        summary.files_written.push(written);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(summary)
}
