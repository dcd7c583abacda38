//! CivitAI Downloader - download CivitAI collections and posts with metadata.
//!
//! This library provides functionality for downloading media content and its
//! generation metadata from CivitAI.
//!
//! # Features
//!
//! - Download collections and posts, one or many per run
//! - Cursor pagination over the tRPC image listing
//! - Generation data (prompts, resources) and tags per item
//! - Streaming downloads with retry and linear backoff
//! - Per-item and aggregate metadata JSON files
//!
//! # Example
//!
//! ```no_run
//! use civitai_downloader::{process_collection, CivitaiApi, Config, RunOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(&Config::default_path())?;
//!     let api = CivitaiApi::new(&config)?;
//!
//!     let report = process_collection(&api, &config, 12345, RunOptions::default()).await?;
//!     println!("{} of {} downloaded", report.succeeded(), report.total);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod logging;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use api::{CivitaiApi, Parent};
pub use config::Config;
pub use download::{
    process_collection, process_parent, process_parents, process_post, ParentReport, RunOptions,
    RunSummary,
};
pub use error::{Error, Result};
pub use media::{MediaItem, NsfwLevel};

#[cfg(test)]
pub(crate) mod test_support;
