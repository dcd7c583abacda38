//! Cursor-following pagination over `image.getInfinite`.

use std::time::Duration;

use tokio::time::sleep;

use crate::api::client::CivitaiApi;
use crate::api::types::{Cursor, Parent, RawImage};

/// Hard upper bound on pages fetched for one parent.
pub const MAX_PAGES: usize = 10_000;

/// Fetch every image of a parent by following the server's cursor.
///
/// Stops when the server returns no cursor, an empty page, or the same
/// cursor it was just given. A failed page request ends the walk with the
/// items gathered so far.
pub async fn fetch_all(api: &CivitaiApi, parent: Parent, delay: Duration) -> Vec<RawImage> {
    let mut all_images: Vec<RawImage> = Vec::new();
    let mut cursor: Option<Cursor> = None;

    tracing::info!("Starting retrieval of all images from {}", parent);

    for batch in 1..=MAX_PAGES {
        if batch > 1 && !delay.is_zero() {
            sleep(delay).await;
        }
        tracing::debug!("Retrieving batch #{} of images...", batch);

        let page = match api.get_images_page(parent, cursor.as_ref()).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!("Error fetching images from {}: {}", parent, e);
                break;
            }
        };

        if page.items.is_empty() {
            if all_images.is_empty() {
                tracing::error!("No images found in {}", parent);
            }
            break;
        }

        if batch == 1 {
            let first = &page.items[0];
            tracing::debug!(
                "First item sample - ID: {}, Name: {:?}, URL: {:?}",
                first.id,
                first.name,
                first.url
            );
        }

        let next = page.next_cursor().cloned();
        all_images.extend(page.items);

        match next {
            None => {
                tracing::debug!("No more pages to retrieve");
                break;
            }
            Some(next) if cursor.as_ref() == Some(&next) => {
                tracing::warn!("Server repeated cursor {} for {}, stopping", next, parent);
                break;
            }
            Some(next) => {
                tracing::debug!("Next cursor: {}", next);
                cursor = Some(next);
            }
        }

        if batch == MAX_PAGES {
            tracing::warn!("Reached the {} page limit for {}", MAX_PAGES, parent);
        }
    }

    tracing::info!(
        "Retrieved a total of {} images from {}",
        all_images.len(),
        parent
    );
    all_images
}
