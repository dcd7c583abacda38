//! Post download logic.

use crate::api::{fetch_all, CivitaiApi, Parent};
use crate::config::Config;
use crate::download::items::process_items;
use crate::download::metadata::{save_metadata_logged, POST_METADATA_FILE};
use crate::download::state::{ParentReport, RunOptions};
use crate::error::{Error, Result};
use crate::fs::create_parent_dir;
use crate::media::PostMetadata;

/// Download every media item of a post, plus metadata.
///
/// Fails when the post cannot be fetched or lists no media.
pub async fn process_post(
    api: &CivitaiApi,
    config: &Config,
    post_id: u64,
    options: RunOptions,
) -> Result<ParentReport> {
    let parent = Parent::Post(post_id);

    let post = match api.get_post_by_id(post_id).await {
        Ok(Some(post)) => post,
        Ok(None) | Err(_) => {
            return Err(Error::ParentNotFound {
                kind: "Post",
                id: post_id,
            })
        }
    };
    let title = post.title.unwrap_or_default();

    let dir = create_parent_dir(&config.download_dir, post_id, Some(&title))?;

    let images = fetch_all(api, parent, config.request_delay()).await;
    if images.is_empty() {
        return Err(Error::NoMedia {
            kind: parent.kind(),
            id: post_id,
        });
    }
    tracing::info!("Found {} media items in post: {}", images.len(), post_id);

    let mut report = ParentReport::new(parent, dir.clone(), options.dry_run);
    let items = process_items(api, config, &dir, &images, options, &mut report).await;

    if !options.skip_metadata && !options.dry_run {
        let metadata = PostMetadata::new(post_id, title, items);
        save_metadata_logged(&metadata, &dir.join(POST_METADATA_FILE));
    }

    tracing::info!(
        "Successfully processed {} of {} items from post {}",
        report.succeeded(),
        report.total,
        post_id
    );
    Ok(report)
}
