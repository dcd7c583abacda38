//! Download module for content downloading.
//!
//! This module provides:
//! - Run options and statistics
//! - Collection and post orchestration
//! - Media file downloading with retry
//! - Metadata JSON persistence

pub mod collection;
pub mod file;
pub mod items;
pub mod media;
pub mod metadata;
pub mod post;
pub mod state;

pub use collection::process_collection;
pub use file::{download_file, resolve_download_url, DownloadOptions};
pub use media::{download_media, media_file_name, DownloadedFile};
pub use metadata::{save_metadata, COLLECTION_METADATA_FILE, POST_METADATA_FILE};
pub use post::process_post;
pub use state::{ParentReport, RunOptions, RunSummary};

use crate::api::{CivitaiApi, Parent};
use crate::config::Config;
use crate::error::Result;
use crate::output::{print_error, print_info, print_parent_report};

/// Process one parent of either kind.
pub async fn process_parent(
    api: &CivitaiApi,
    config: &Config,
    parent: Parent,
    options: RunOptions,
) -> Result<ParentReport> {
    match parent {
        Parent::Collection(id) => process_collection(api, config, id, options).await,
        Parent::Post(id) => process_post(api, config, id, options).await,
    }
}

/// Process every requested parent in order and collect run statistics.
///
/// A target that failed to parse, or a parent that fails, is logged and
/// counted; the remaining parents still run.
pub async fn process_parents(
    api: &CivitaiApi,
    config: &Config,
    targets: Vec<Result<Parent>>,
    options: RunOptions,
) -> RunSummary {
    let mut summary = RunSummary::default();

    for target in targets {
        let parent = match target {
            Ok(parent) => parent,
            Err(e) => {
                tracing::error!("Skipping target: {}", e);
                print_error(&e.to_string());
                summary.mark_parent_failed();
                continue;
            }
        };

        print_info(&format!("Processing {}", parent));

        match process_parent(api, config, parent, options).await {
            Ok(report) => {
                print_parent_report(&report);
                summary.add_report(&report);
            }
            Err(e) => {
                tracing::error!("Error processing {}: {}", parent, e);
                print_error(&format!("Failed to process {}: {}", parent, e));
                summary.mark_parent_failed();
            }
        }
    }

    summary
}
