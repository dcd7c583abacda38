//! Run options and per-parent / per-run statistics.

use std::path::PathBuf;

use crate::api::Parent;

/// Flags that apply to every parent of a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Enumerate and extract metadata without downloading or writing files.
    pub dry_run: bool,
    /// Skip writing metadata JSON files.
    pub skip_metadata: bool,
}

/// Outcome of processing one collection or post.
#[derive(Debug, Clone)]
pub struct ParentReport {
    pub parent: Parent,
    pub directory: PathBuf,
    pub dry_run: bool,

    pub total: u64,
    /// Items whose metadata was extracted.
    pub enumerated: u64,
    /// Media files now on disk (fetched or already present).
    pub downloaded: u64,
    pub already_present: u64,
    pub failed: u64,
}

impl ParentReport {
    pub fn new(parent: Parent, directory: PathBuf, dry_run: bool) -> Self {
        Self {
            parent,
            directory,
            dry_run,
            total: 0,
            enumerated: 0,
            downloaded: 0,
            already_present: 0,
            failed: 0,
        }
    }

    /// Successfully handled items: downloads, or enumerations in a dry run.
    pub fn succeeded(&self) -> u64 {
        if self.dry_run {
            self.enumerated
        } else {
            self.downloaded
        }
    }
}

/// Statistics across all parents of a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub parents_processed: u64,
    pub parents_failed: u64,
    pub items_total: u64,
    pub items_succeeded: u64,
    pub items_failed: u64,
    pub already_present: u64,
}

impl RunSummary {
    /// Add statistics from a finished parent.
    pub fn add_report(&mut self, report: &ParentReport) {
        self.parents_processed += 1;
        self.items_total += report.total;
        self.items_succeeded += report.succeeded();
        self.items_failed += report.failed;
        self.already_present += report.already_present;
    }

    /// Mark a parent as failed.
    pub fn mark_parent_failed(&mut self) {
        self.parents_failed += 1;
    }

    /// Whether every requested parent succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.parents_failed == 0
    }
}
