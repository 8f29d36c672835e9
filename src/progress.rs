// src/progress.rs
use std::path::Path;

use crate::fetch::AppRecord;

/// Lightweight progress reporting for the fetch/render run.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of apps and pages.
    fn begin(&mut self, _apps: usize, _pages: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one app has been resolved, successfully or not.
    fn item_done(&mut self, _record: &AppRecord) {}

    /// Called after each page hits the disk.
    fn page_written(&mut self, _path: &Path, _apps: usize, _playable: usize) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// Plain stdout lines, for the CLI.
#[derive(Default)]
pub struct ConsoleProgress {
    done: usize,
    total: usize,
    pages: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, apps: usize, pages: usize) {
        self.total = apps;
        println!("Processing {apps} app(s) into {pages} page(s)");
    }
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }
    fn item_done(&mut self, record: &AppRecord) {
        self.done += 1;
        println!(
            "  [{}/{}] {} {} ({})",
            self.done, self.total, record.app_id, record.display_name, record.status.label()
        );
    }
    fn page_written(&mut self, path: &Path, apps: usize, playable: usize) {
        self.pages += 1;
        println!("Written: {} ({playable}/{apps} trailers playable)", path.display());
    }
    fn finish(&mut self) {
        println!("Done: {} page(s) generated", self.pages);
    }
}
