//! Collection download logic.

use crate::api::{fetch_all, CivitaiApi, CollectionRecord, Parent};
use crate::config::Config;
use crate::download::items::process_items;
use crate::download::metadata::{save_metadata_logged, COLLECTION_METADATA_FILE};
use crate::download::state::{ParentReport, RunOptions};
use crate::error::{Error, Result};
use crate::fs::create_parent_dir;
use crate::media::CollectionMetadata;

/// Download every media item of a collection, plus metadata.
///
/// Fails when the collection lists no media.
pub async fn process_collection(
    api: &CivitaiApi,
    config: &Config,
    collection_id: u64,
    options: RunOptions,
) -> Result<ParentReport> {
    let parent = Parent::Collection(collection_id);
    let dir = create_parent_dir(&config.download_dir, collection_id, None)?;

    let images = fetch_all(api, parent, config.request_delay()).await;
    if images.is_empty() {
        return Err(Error::NoMedia {
            kind: parent.kind(),
            id: collection_id,
        });
    }
    tracing::info!(
        "Found {} media items in collection: {}",
        images.len(),
        collection_id
    );

    let mut report = ParentReport::new(parent, dir.clone(), options.dry_run);
    let items = process_items(api, config, &dir, &images, options, &mut report).await;

    if !options.skip_metadata && !options.dry_run && !items.is_empty() {
        let record = fetch_collection_record(api, collection_id).await;
        let metadata = CollectionMetadata::new(collection_id, record.as_ref(), items);
        save_metadata_logged(&metadata, &dir.join(COLLECTION_METADATA_FILE));
    }

    tracing::info!(
        "Successfully processed {} of {} items from collection {}",
        report.succeeded(),
        report.total,
        collection_id
    );
    Ok(report)
}

/// The collection record, or `None` when it cannot be fetched.
async fn fetch_collection_record(api: &CivitaiApi, collection_id: u64) -> Option<CollectionRecord> {
    match api.get_collection_by_id(collection_id).await {
        Ok(Some(response)) => Some(response.collection.unwrap_or_default()),
        Ok(None) | Err(_) => {
            tracing::error!("Failed to get collection data for ID: {}", collection_id);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::path::PathBuf;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::test_support::{envelope, files_under, image_page, input_is, test_config};

    async fn mount_listing(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/trpc/image.getInfinite"))
            .and(input_is("/json/cursor", Value::Null))
            .respond_with(image_page(
                json!([{ "id": 1, "name": "first.png", "url": "u1", "mimeType": "image/png" }]),
                json!("c2"),
            ))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/trpc/image.getInfinite"))
            .and(input_is("/json/cursor", json!("c2")))
            .respond_with(image_page(
                json!([{ "id": 2, "name": "second", "url": "u2", "mimeType": "video/mp4" }]),
                json!(""),
            ))
            .mount(server)
            .await;
    }

    async fn mount_enrichment(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/trpc/image.get"))
            .respond_with(ResponseTemplate::new(404))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/trpc/image.getGenerationData"))
            .respond_with(envelope(json!({
                "meta": { "prompt": "a cat", "negativePrompt": "blurry" },
                "resources": [{ "name": "model-a" }]
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/trpc/tag.getVotableTags"))
            .respond_with(envelope(json!([{ "id": 9, "name": "cat" }])))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/trpc/collection.getById"))
            .respond_with(envelope(json!({
                "collection": { "id": 10, "name": "Faves", "type": "Image" }
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_collection_end_to_end() {
        let server = MockServer::start().await;
        mount_listing(&server).await;
        mount_enrichment(&server).await;
        Mock::given(method("GET"))
            .and(path("/test-key/u1/first.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"png".to_vec()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/test-key/u2/second.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"mp4".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&server, dir.path());
        let api = CivitaiApi::new(&config).unwrap();

        let report = process_collection(&api, &config, 10, RunOptions::default())
            .await
            .unwrap();
        assert_eq!(report.total, 2);
        assert_eq!(report.downloaded, 2);
        assert_eq!(report.failed, 0);
        assert_eq!(report.directory, dir.path().join("10"));

        assert_eq!(
            files_under(dir.path()),
            vec![
                PathBuf::from("10/collection_metadata.json"),
                PathBuf::from("10/first.png"),
                PathBuf::from("10/first_metadata.json"),
                PathBuf::from("10/second.mp4"),
                PathBuf::from("10/second_metadata.json"),
            ]
        );

        let aggregate: Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("10/collection_metadata.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(aggregate["name"], "Faves");
        assert_eq!(aggregate["media_count"], 2);
        assert_eq!(aggregate["media"][0]["prompt"], "a cat");
        assert_eq!(aggregate["media"][1]["tags"][0]["name"], "cat");
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let server = MockServer::start().await;
        mount_listing(&server).await;
        mount_enrichment(&server).await;

        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&server, dir.path());
        let api = CivitaiApi::new(&config).unwrap();
        let options = RunOptions {
            dry_run: true,
            skip_metadata: false,
        };

        let report = process_collection(&api, &config, 10, options).await.unwrap();
        assert_eq!(report.enumerated, 2);
        assert_eq!(report.downloaded, 0);
        assert!(report.dry_run);
        assert!(files_under(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_skip_metadata_keeps_media_only() {
        let server = MockServer::start().await;
        mount_listing(&server).await;
        mount_enrichment(&server).await;
        Mock::given(method("GET"))
            .and(path("/test-key/u1/first.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"png".to_vec()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/test-key/u2/second.mp4"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&server, dir.path());
        let api = CivitaiApi::new(&config).unwrap();
        let options = RunOptions {
            dry_run: false,
            skip_metadata: true,
        };

        let report = process_collection(&api, &config, 10, options).await.unwrap();
        assert_eq!(report.downloaded, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(files_under(dir.path()), vec![PathBuf::from("10/first.png")]);
    }

    #[tokio::test]
    async fn test_empty_collection_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/trpc/image.getInfinite"))
            .respond_with(image_page(json!([]), Value::Null))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&server, dir.path());
        let api = CivitaiApi::new(&config).unwrap();

        let err = process_collection(&api, &config, 10, RunOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NoMedia { id: 10, .. }));
        assert!(files_under(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_missing_collection_record_uses_fallback_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/trpc/image.getInfinite"))
            .respond_with(image_page(
                json!([{ "id": 1, "name": "a", "url": "u1", "mimeType": "image/jpeg" }]),
                Value::Null,
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/test-key/u1/a.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpg".to_vec()))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&server, dir.path());
        let api = CivitaiApi::new(&config).unwrap();

        process_collection(&api, &config, 33, RunOptions::default())
            .await
            .unwrap();
        let aggregate: Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("33/collection_metadata.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(aggregate["name"], "Collection-33");
        assert_eq!(aggregate["media_count"], 1);
    }
}
