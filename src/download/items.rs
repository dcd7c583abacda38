//! Per-item processing shared by collections and posts.

use std::path::Path;

use tokio::time::sleep;

use crate::api::{CivitaiApi, RawImage};
use crate::config::Config;
use crate::download::file::DownloadOptions;
use crate::download::media::download_media;
use crate::download::metadata::{item_metadata_path, save_metadata_logged};
use crate::download::state::{ParentReport, RunOptions};
use crate::media::{extract_metadata, MediaItem};
use crate::output::create_item_bar;

/// Process every listed image in order: details, metadata, download.
///
/// Returns the extracted metadata of every item, downloaded or not.
pub async fn process_items(
    api: &CivitaiApi,
    config: &Config,
    dir: &Path,
    images: &[RawImage],
    options: RunOptions,
    report: &mut ParentReport,
) -> Vec<MediaItem> {
    let download_options = DownloadOptions::from_config(config);
    let delay = config.request_delay();
    let total = images.len();
    let bar = create_item_bar(total as u64, &report.parent.to_string());

    report.total = total as u64;
    let mut items = Vec::with_capacity(total);

    for (i, image) in images.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            sleep(delay).await;
        }
        tracing::info!("Processing item {}/{}: ID {}", i + 1, total, image.id);

        let details = match api.get_image_details(image.id).await {
            Ok(Some(details)) => details,
            Ok(None) => {
                tracing::debug!("No details for media {}, using listing record", image.id);
                image.clone()
            }
            Err(_) => image.clone(),
        };

        let item = extract_metadata(api, &details).await;
        report.enumerated += 1;

        if !options.dry_run {
            match download_media(api.http_client(), &download_options, &item, dir).await {
                Some(file) => {
                    report.downloaded += 1;
                    if file.existed {
                        report.already_present += 1;
                    }
                    if !options.skip_metadata {
                        save_metadata_logged(&item, &item_metadata_path(&file.path));
                    }
                }
                None => report.failed += 1,
            }
        }

        items.push(item);
        bar.inc(1);
    }

    bar.finish_and_clear();
    items
}
