//! Media item and parent metadata records.

use serde::Serialize;
use serde_json::Value;

use crate::api::types::{CollectionRecord, RawImage, RawUser};
use crate::media::nsfw::NsfwLevel;

/// Default MIME type assumed when the platform does not report one.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// Uploader or owner of a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserRef {
    pub id: Option<u64>,
    pub username: Option<String>,
}

impl From<&RawUser> for UserRef {
    fn from(user: &RawUser) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

/// A tag attached to a media item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagRef {
    pub id: Option<u64>,
    pub name: Option<String>,
}

/// A downloadable image or video with its metadata.
///
/// Serialized as the per-item metadata file and inside parent aggregates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MediaItem {
    pub id: u64,
    pub name: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
    pub hash: Option<String>,
    pub nsfw_level: Option<NsfwLevel>,
    pub created_at: Option<String>,
    pub published_at: Option<String>,
    pub url: Option<String>,
    pub user: Option<UserRef>,
    pub stats: Option<Value>,
    pub generation_data: Option<Value>,
    pub tags: Vec<TagRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<Value>>,
}

impl MediaItem {
    /// Build the base record from a raw API image, before enrichment.
    ///
    /// An NSFW level with bits outside the canonical levels is kept as reported
    /// and logged.
    pub fn from_raw(raw: &RawImage) -> Self {
        let nsfw_level = raw.nsfw_level.map(NsfwLevel);
        if let Some(level) = nsfw_level.filter(|level| !level.is_valid()) {
            tracing::warn!("Media {} has a non-canonical NSFW level: {}", raw.id, level);
        }

        Self {
            id: raw.id,
            name: raw.name.clone(),
            width: raw.width,
            height: raw.height,
            mime_type: raw.mime_type.clone(),
            hash: raw.hash.clone(),
            nsfw_level,
            created_at: raw.created_at.clone(),
            published_at: raw.published_at.clone(),
            url: raw.url.clone(),
            user: raw.user.as_ref().map(UserRef::from),
            stats: raw.stats.clone().filter(|s| !s.is_null()),
            ..Default::default()
        }
    }

    /// MIME type, falling back to JPEG.
    pub fn effective_mime_type(&self) -> &str {
        self.mime_type.as_deref().unwrap_or(DEFAULT_MIME_TYPE)
    }
}

/// Details present when the collection record could be fetched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectionDetails {
    pub description: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub nsfw: Option<bool>,
    #[serde(rename = "nsfwLevel")]
    pub nsfw_level: Option<NsfwLevel>,
    pub created_at: Option<String>,
    pub user: UserRef,
}

/// Aggregate metadata for a collection.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionMetadata {
    pub id: u64,
    pub name: String,
    #[serde(flatten)]
    pub details: Option<CollectionDetails>,
    pub media_count: usize,
    pub media: Vec<MediaItem>,
}

impl CollectionMetadata {
    /// Build the aggregate; `record` is `None` when the collection could not be fetched.
    pub fn new(collection_id: u64, record: Option<&CollectionRecord>, media: Vec<MediaItem>) -> Self {
        let fallback_name = || format!("Collection-{}", collection_id);

        match record {
            Some(record) => Self {
                id: record.id.unwrap_or(collection_id),
                name: record.name.clone().unwrap_or_else(fallback_name),
                details: Some(CollectionDetails {
                    description: record.description.clone().unwrap_or_default(),
                    kind: record.kind.clone(),
                    nsfw: record.nsfw,
                    nsfw_level: record.nsfw_level.map(NsfwLevel),
                    created_at: record.created_at.clone(),
                    user: record.user.as_ref().map(UserRef::from).unwrap_or_default(),
                }),
                media_count: media.len(),
                media,
            },
            None => Self {
                id: collection_id,
                name: fallback_name(),
                details: None,
                media_count: media.len(),
                media,
            },
        }
    }
}

/// Aggregate metadata for a post.
#[derive(Debug, Clone, Serialize)]
pub struct PostMetadata {
    pub id: u64,
    pub title: String,
    pub media_count: usize,
    pub media: Vec<MediaItem>,
}

impl PostMetadata {
    pub fn new(post_id: u64, title: String, media: Vec<MediaItem>) -> Self {
        Self {
            id: post_id,
            title,
            media_count: media.len(),
            media,
        }
    }
}
