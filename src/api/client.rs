//! CivitAI tRPC HTTP client.

use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::api::request::TrpcInput;
use crate::api::types::*;
use crate::config::Config;
use crate::error::{Error, Result};

/// NSFW browsing level requested on listings: every level.
pub const BROWSING_LEVEL_ALL: u32 = 31;

/// Maximum number of response body bytes included in error logs.
const ERROR_BODY_PREVIEW: usize = 500;

/// CivitAI API client.
///
/// Every call is logged and returns an explicit `Result`; a missing payload
/// is `Ok(None)` (or an empty page), never an error.
#[derive(Debug, Clone)]
pub struct CivitaiApi {
    client: Client,
    api_key: String,
    base_url: String,
}

impl CivitaiApi {
    /// Create a client from the runtime configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config.api_key.clone(), config.api_base_url.clone())
    }

    /// Create a client against an explicit tRPC root.
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("civitai-downloader/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// The underlying HTTP client, shared with the file downloader.
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// Make an authenticated tRPC GET and unwrap `result.data.json`.
    async fn trpc_get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        input: &TrpcInput,
    ) -> Result<Option<T>> {
        let url = input.url(&self.base_url, endpoint);
        tracing::debug!("GET {}", url);
        tracing::debug!("Request input: {}", input.to_json());

        let mut request = self.client.get(&url);
        if !self.api_key.is_empty() {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", self.api_key));
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("Request to {} failed: {}", endpoint, e);
            Error::Http(e)
        })?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("HTTP {} from {}", status, endpoint);
            tracing::error!("Response content: {}", preview(&body));
            return Err(Error::HttpStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(|e| {
            tracing::error!("Failed to read response from {}: {}", endpoint, e);
            Error::Http(e)
        })?;

        let envelope: TrpcResponse<T> = serde_json::from_str(&text).map_err(|e| {
            tracing::error!("Failed to parse response from {}: {}", endpoint, e);
            tracing::debug!("Response content: {}", preview(&text));
            Error::Json(e)
        })?;

        Ok(envelope.into_json())
    }

    /// Get details of a collection by its ID.
    pub async fn get_collection_by_id(&self, collection_id: u64) -> Result<Option<CollectionResponse>> {
        tracing::info!("Fetching collection with ID: {}", collection_id);
        let input = TrpcInput::new(json!({ "id": collection_id }));
        self.trpc_get("collection.getById", &input).await
    }

    /// Get one page of images in a collection.
    pub async fn get_images_in_collection(
        &self,
        collection_id: u64,
        cursor: Option<&Cursor>,
    ) -> Result<ImagePage> {
        tracing::info!(
            "Fetching images in collection {}{}",
            collection_id,
            if cursor.is_some() { " with cursor" } else { "" }
        );
        let input = TrpcInput::new(json!({
            "collectionId": collection_id,
            "period": "AllTime",
            "sort": "Newest",
            "browsingLevel": BROWSING_LEVEL_ALL,
            "include": ["cosmetics"],
        }))
        .with_cursor(cursor);

        let page: ImagePage = self
            .trpc_get("image.getInfinite", &input)
            .await?
            .unwrap_or_default();
        tracing::debug!(
            "Retrieved {} items, next cursor: {:?}",
            page.items.len(),
            page.next_cursor().map(ToString::to_string)
        );
        Ok(page)
    }

    /// Get details of a post by its ID.
    pub async fn get_post_by_id(&self, post_id: u64) -> Result<Option<PostRecord>> {
        tracing::info!("Fetching post with ID: {}", post_id);
        let input = TrpcInput::new(json!({ "id": post_id }));
        self.trpc_get("post.get", &input).await
    }

    /// Get one page of images in a post.
    pub async fn get_images_in_post(&self, post_id: u64, cursor: Option<&Cursor>) -> Result<ImagePage> {
        tracing::info!(
            "Fetching images in post {}{}",
            post_id,
            if cursor.is_some() { " with cursor" } else { "" }
        );
        let input = TrpcInput::new(json!({
            "postId": post_id,
            "browsingLevel": BROWSING_LEVEL_ALL,
        }))
        .with_cursor(cursor);

        let page: ImagePage = self
            .trpc_get("image.getInfinite", &input)
            .await?
            .unwrap_or_default();
        tracing::debug!("Retrieved {} images from post {}", page.items.len(), post_id);
        Ok(page)
    }

    /// Get one page of images for either kind of parent.
    pub async fn get_images_page(&self, parent: Parent, cursor: Option<&Cursor>) -> Result<ImagePage> {
        match parent {
            Parent::Collection(id) => self.get_images_in_collection(id, cursor).await,
            Parent::Post(id) => self.get_images_in_post(id, cursor).await,
        }
    }

    /// Get detailed information about an image or video.
    pub async fn get_image_details(&self, image_id: u64) -> Result<Option<RawImage>> {
        tracing::info!("Fetching details for media ID: {}", image_id);
        let input = TrpcInput::new(json!({ "id": image_id }));
        self.trpc_get("image.get", &input).await
    }

    /// Get generation data (prompts, resources) for an image.
    pub async fn get_image_generation_data(&self, image_id: u64) -> Result<Option<Value>> {
        tracing::info!("Fetching generation data for media ID: {}", image_id);
        let input = TrpcInput::new(json!({ "id": image_id }));
        self.trpc_get("image.getGenerationData", &input).await
    }

    /// Get votable tags for an image.
    pub async fn get_image_tags(&self, image_id: u64) -> Result<Vec<VotableTag>> {
        tracing::info!("Fetching tags for media ID: {}", image_id);
        let input = TrpcInput::new(json!({ "id": image_id, "type": "image" }));
        Ok(self
            .trpc_get("tag.getVotableTags", &input)
            .await?
            .unwrap_or_default())
    }
}

fn preview(body: &str) -> &str {
    let mut end = body.len().min(ERROR_BODY_PREVIEW);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
