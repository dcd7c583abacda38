//! Metadata JSON persistence.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;

/// Aggregate file name for a collection.
pub const COLLECTION_METADATA_FILE: &str = "collection_metadata.json";

/// Aggregate file name for a post.
pub const POST_METADATA_FILE: &str = "post_metadata.json";

/// Path of the per-item metadata file next to a downloaded media file.
pub fn item_metadata_path(media_path: &Path) -> PathBuf {
    let stem = media_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    media_path.with_file_name(format!("{}_metadata.json", stem))
}

/// Write `value` as pretty-printed JSON.
pub fn save_metadata<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    tracing::info!("Saved metadata to {}", path.display());
    Ok(())
}

/// Write metadata, logging instead of failing.
pub fn save_metadata_logged<T: Serialize>(value: &T, path: &Path) -> bool {
    match save_metadata(value, path) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("Error saving metadata to {}: {}", path.display(), e);
            false
        }
    }
}
