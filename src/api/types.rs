//! API response type definitions.
//!
//! Every record decodes with default-on-missing semantics: the platform omits
//! or nulls fields freely, and a missing field must never fail a request.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// tRPC response envelope: the payload lives at `result.data.json`.
#[derive(Debug, Deserialize)]
pub struct TrpcResponse<T> {
    #[serde(default = "Option::default")]
    result: Option<TrpcResult<T>>,
}

#[derive(Debug, Deserialize)]
struct TrpcResult<T> {
    #[serde(default = "Option::default")]
    data: Option<TrpcData<T>>,
}

#[derive(Debug, Deserialize)]
struct TrpcData<T> {
    #[serde(default = "Option::default")]
    json: Option<T>,
}

impl<T> TrpcResponse<T> {
    /// Unwrap the nested payload, `None` when any level is absent.
    pub fn into_json(self) -> Option<T> {
        self.result?.data?.json
    }
}

/// A collection or a post: the top-level entity a run is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent {
    Collection(u64),
    Post(u64),
}

impl Parent {
    pub fn id(&self) -> u64 {
        match self {
            Parent::Collection(id) | Parent::Post(id) => *id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Parent::Collection(_) => "collection",
            Parent::Post(_) => "post",
        }
    }
}

impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.id())
    }
}

/// Opaque pagination token, echoed back to the server verbatim.
///
/// The server sends either a string or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(pub Value);

impl Cursor {
    /// Null and empty-string cursors mean "no further pages".
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

/// One page of `image.getInfinite`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImagePage {
    pub items: Vec<RawImage>,
    pub next_cursor: Option<Cursor>,
}

impl ImagePage {
    /// The cursor for the following page, if there is one.
    pub fn next_cursor(&self) -> Option<&Cursor> {
        self.next_cursor.as_ref().filter(|c| !c.is_empty())
    }
}

/// An image or video record, as returned by list and detail endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawImage {
    pub id: u64,
    pub name: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub mime_type: Option<String>,
    pub hash: Option<String>,
    pub nsfw_level: Option<u32>,
    pub created_at: Option<String>,
    pub published_at: Option<String>,
    pub url: Option<String>,
    pub user: Option<RawUser>,
    pub stats: Option<Value>,
}

/// Uploader or owner reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawUser {
    pub id: Option<u64>,
    pub username: Option<String>,
}

/// `collection.getById` payload.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CollectionResponse {
    pub collection: Option<CollectionRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectionRecord {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub nsfw: Option<bool>,
    pub nsfw_level: Option<u32>,
    pub created_at: Option<String>,
    pub user: Option<RawUser>,
}

/// `post.get` payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostRecord {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub user: Option<RawUser>,
}

/// Typed view over `image.getGenerationData`.
///
/// The raw payload is kept as-is for the metadata file; this view only picks
/// out the prompts and resources.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerationSummary {
    pub meta: Option<GenerationMeta>,
    pub resources: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationMeta {
    pub prompt: Option<String>,
    pub negative_prompt: Option<String>,
}

/// Entry of `tag.getVotableTags`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VotableTag {
    pub id: Option<u64>,
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_unwrap() {
        let body = json!({"result": {"data": {"json": {"id": 5, "title": "hello"}}}});
        let resp: TrpcResponse<PostRecord> = serde_json::from_value(body).unwrap();
        let post = resp.into_json().unwrap();
        assert_eq!(post.id, Some(5));
        assert_eq!(post.title.as_deref(), Some("hello"));
    }

    #[test]
    fn test_envelope_missing_levels() {
        for body in [json!({}), json!({"result": {}}), json!({"result": {"data": {}}})] {
            let resp: TrpcResponse<PostRecord> = serde_json::from_value(body).unwrap();
            assert!(resp.into_json().is_none());
        }
    }

    #[test]
    fn test_image_page_defaults() {
        let page: ImagePage = serde_json::from_value(json!({})).unwrap();
        assert!(page.items.is_empty());
        assert!(page.next_cursor().is_none());

        let page: ImagePage =
            serde_json::from_value(json!({"items": [{"id": 1}], "nextCursor": ""})).unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(page.next_cursor().is_none());

        let page: ImagePage =
            serde_json::from_value(json!({"items": [], "nextCursor": 12345})).unwrap();
        assert_eq!(page.next_cursor().unwrap().to_string(), "12345");
    }

    #[test]
    fn test_raw_image_tolerates_nulls() {
        let image: RawImage = serde_json::from_value(json!({
            "id": 77,
            "name": null,
            "mimeType": "image/png",
            "nsfwLevel": 4,
            "user": {"id": 3, "username": "someone"},
            "stats": {"likeCount": 2}
        }))
        .unwrap();
        assert_eq!(image.id, 77);
        assert!(image.name.is_none());
        assert_eq!(image.mime_type.as_deref(), Some("image/png"));
        assert_eq!(image.user.unwrap().username.as_deref(), Some("someone"));
    }

    #[test]
    fn test_parent_display() {
        assert_eq!(Parent::Collection(3).to_string(), "collection 3");
        assert_eq!(Parent::Post(4).kind(), "post");
    }
}
