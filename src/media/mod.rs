//! Media module: item records, NSFW levels and metadata enrichment.

pub mod extract;
pub mod item;
pub mod nsfw;

pub use extract::extract_metadata;
pub use item::{CollectionMetadata, MediaItem, PostMetadata, TagRef, UserRef};
pub use nsfw::NsfwLevel;
