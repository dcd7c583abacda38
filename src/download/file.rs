//! Streaming file download with retry and linear backoff.

use std::path::Path;
use std::time::Duration;

use futures::StreamExt;
use reqwest::{header, Client};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::time::sleep;
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::progress::create_download_bar;

/// Minimum file size to show progress bar (20 MB).
const PROGRESS_THRESHOLD: u64 = 20 * 1024 * 1024;

/// Settings shared by every file download of a run.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub api_key: String,
    pub media_base_url: String,
    /// Attempt `n` failing waits `n * backoff_unit` before the next one.
    pub backoff_unit: Duration,
}

impl DownloadOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_retries: config.max_retries,
            api_key: config.api_key.clone(),
            media_base_url: config.media_base_url.clone(),
            backoff_unit: Duration::from_secs(1),
        }
    }
}

/// Resolve the absolute URL for a media file.
///
/// Absolute `http(s)` URLs are used as-is. Anything else is a relative asset
/// path on the media host, addressed as
/// `<media_base>/<api_key>/<path>/<file name of dest>`.
pub fn resolve_download_url(url: &str, dest: &Path, options: &DownloadOptions) -> Result<String> {
    if let Ok(parsed) = Url::parse(url) {
        if matches!(parsed.scheme(), "http" | "https") {
            return Ok(url.to_string());
        }
    }

    if options.api_key.is_empty() {
        return Err(Error::MissingConfig(
            "api_key (required to download relative media URLs)".to_string(),
        ));
    }

    let filename = dest
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::Download(format!("Invalid destination: {}", dest.display())))?;

    let resolved = format!(
        "{}/{}/{}/{}",
        options.media_base_url.trim_end_matches('/'),
        options.api_key,
        url.trim_matches('/'),
        filename
    );
    tracing::debug!("Constructed download URL from '{}' to '{}'", url, resolved);
    Ok(resolved)
}

/// Download `url` to `dest`, retrying on failure.
///
/// Returns `true` on success, including when `dest` already exists (no
/// request is made then). After the last failed attempt any partial file is
/// removed and `false` is returned.
pub async fn download_file(
    client: &Client,
    url: &str,
    dest: &Path,
    mime_type: Option<&str>,
    options: &DownloadOptions,
) -> bool {
    if dest.exists() {
        tracing::info!("File already exists: {}", dest.display());
        return true;
    }

    let url = match resolve_download_url(url, dest, options) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!("Cannot download {}: {}", dest.display(), e);
            return false;
        }
    };

    tracing::info!("Downloading file to {}", dest.display());

    let attempts = options.max_retries + 1;
    for attempt in 1..=attempts {
        tracing::debug!("Download attempt {}/{}", attempt, attempts);

        match fetch_to_file(client, &url, dest, mime_type).await {
            Ok(bytes) => {
                tracing::debug!("Downloaded {} bytes to {}", bytes, dest.display());
                return true;
            }
            Err(e) => {
                tracing::error!(
                    "Error downloading file (attempt {}/{}): {}",
                    attempt,
                    attempts,
                    e
                );
                if attempt < attempts {
                    let delay = options.backoff_unit * attempt;
                    tracing::info!("Retrying download in {:?}...", delay);
                    sleep(delay).await;
                }
            }
        }
    }

    tracing::error!("Download failed after {} attempts", attempts);
    if let Err(e) = tokio::fs::remove_file(dest).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("Failed to remove partial file {}: {}", dest.display(), e);
        }
    }
    false
}

/// One download attempt: stream the body into `dest`.
async fn fetch_to_file(
    client: &Client,
    url: &str,
    dest: &Path,
    mime_type: Option<&str>,
) -> Result<u64> {
    let response = client.get(url).send().await?;

    let status = response.status();
    tracing::debug!("Response status: {}", status);
    if !status.is_success() {
        return Err(Error::Download(format!("HTTP {}", status)));
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if let Some(expected) = mime_type {
        if !content_type.is_empty() && !content_type.starts_with(expected) {
            tracing::warn!(
                "MIME type mismatch. Expected: {}, Got: {}",
                expected,
                content_type
            );
        }
    }

    let progress = response
        .content_length()
        .filter(|len| *len > PROGRESS_THRESHOLD)
        .map(create_download_bar);

    let mut file = File::create(dest).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;

        if let Some(ref pb) = progress {
            pb.set_position(downloaded);
        }
    }

    file.flush().await?;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    Ok(downloaded)
}
