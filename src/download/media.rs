//! Media file downloading.

use std::path::{Path, PathBuf};

use reqwest::Client;

use crate::download::file::{download_file, DownloadOptions};
use crate::fs::{get_file_extension, sanitize_filename, split_extension};
use crate::media::MediaItem;

/// A media file present on disk after a download step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub path: PathBuf,
    /// The file was already there; nothing was fetched.
    pub existed: bool,
}

/// File name for a media item: sanitized name, its own extension replaced
/// by the one matching the MIME type.
pub fn media_file_name(item: &MediaItem) -> String {
    let name = item
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(ToString::to_string)
        .unwrap_or_else(|| format!("media-{}", item.id));

    let sanitized = sanitize_filename(&name);
    let (stem, _) = split_extension(&sanitized);

    format!("{}{}", stem, get_file_extension(item.effective_mime_type()))
}

/// Download a media item into `dir`.
///
/// Returns `None` when the item has no URL or the download failed.
pub async fn download_media(
    client: &Client,
    options: &DownloadOptions,
    item: &MediaItem,
    dir: &Path,
) -> Option<DownloadedFile> {
    let Some(url) = item.url.as_deref().filter(|u| !u.is_empty()) else {
        tracing::error!("No URL found for media {}", item.id);
        return None;
    };

    let path = dir.join(media_file_name(item));

    if path.exists() {
        tracing::info!("File already exists: {}", path.display());
        return Some(DownloadedFile {
            path,
            existed: true,
        });
    }

    if download_file(client, url, &path, Some(item.effective_mime_type()), options).await {
        Some(DownloadedFile {
            path,
            existed: false,
        })
    } else {
        None
    }
}
