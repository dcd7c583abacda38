//! Metadata enrichment: generation data and tags.

use serde_json::Value;

use crate::api::types::{GenerationSummary, RawImage, VotableTag};
use crate::api::CivitaiApi;
use crate::media::item::{MediaItem, TagRef};

/// Build the full metadata record for an image.
///
/// Generation data and tags are fetched with two extra calls. Either call
/// failing is logged and leaves its fields empty; the item is always returned.
pub async fn extract_metadata(api: &CivitaiApi, image: &RawImage) -> MediaItem {
    let mut item = MediaItem::from_raw(image);

    match api.get_image_generation_data(image.id).await {
        Ok(Some(data)) => apply_generation_data(&mut item, data),
        Ok(None) => tracing::debug!("No generation data for media {}", image.id),
        Err(e) => tracing::error!(
            "Error fetching generation data for media {}: {}",
            image.id,
            e
        ),
    }

    match api.get_image_tags(image.id).await {
        Ok(tags) => apply_tags(&mut item, &tags),
        Err(e) => tracing::error!("Error fetching tags for media {}: {}", image.id, e),
    }

    item
}

/// Store raw generation data and lift out prompts and resources.
pub fn apply_generation_data(item: &mut MediaItem, data: Value) {
    if data.is_null() {
        return;
    }

    let summary: GenerationSummary = serde_json::from_value(data.clone()).unwrap_or_else(|e| {
        tracing::warn!("Unexpected generation data shape for media {}: {}", item.id, e);
        GenerationSummary::default()
    });

    if let Some(meta) = summary.meta {
        item.prompt = meta.prompt;
        item.negative_prompt = meta.negative_prompt;
    }
    if !summary.resources.is_empty() {
        item.models = Some(summary.resources);
    }
    item.generation_data = Some(data);
}

pub fn apply_tags(item: &mut MediaItem, tags: &[VotableTag]) {
    item.tags = tags
        .iter()
        .map(|tag| TagRef {
            id: tag.id,
            name: tag.name.clone(),
        })
        .collect();
}
