//! Shared helpers for tests against a mocked tRPC server.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use wiremock::{Match, MockServer, Request, ResponseTemplate};

use crate::config::Config;

/// 200 response wrapping `payload` in the tRPC envelope.
pub fn envelope(payload: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "result": { "data": { "json": payload } } }))
}

/// One `image.getInfinite` page.
pub fn image_page(items: Value, next_cursor: Value) -> ResponseTemplate {
    envelope(json!({ "items": items, "nextCursor": next_cursor }))
}

/// Matches requests whose decoded `input` JSON has `value` at `pointer`.
pub struct InputIs {
    pointer: &'static str,
    value: Value,
}

pub fn input_is(pointer: &'static str, value: Value) -> InputIs {
    InputIs { pointer, value }
}

impl Match for InputIs {
    fn matches(&self, request: &Request) -> bool {
        request
            .url
            .query_pairs()
            .find(|(k, _)| k == "input")
            .and_then(|(_, v)| serde_json::from_str::<Value>(&v).ok())
            .map(|input| input.pointer(self.pointer) == Some(&self.value))
            .unwrap_or(false)
    }
}

/// Config pointing both the API and the media host at the mock server.
pub fn test_config(server: &MockServer, download_dir: &Path) -> Config {
    Config {
        api_key: "test-key".to_string(),
        download_dir: download_dir.to_path_buf(),
        request_delay: 0.0,
        max_retries: 0,
        api_base_url: format!("{}/api/trpc", server.uri()),
        media_base_url: server.uri(),
        ..Default::default()
    }
}

/// Every regular file under `dir`, relative to it, sorted.
pub fn files_under(dir: &Path) -> Vec<PathBuf> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                walk(root, &path, out);
            } else if let Ok(rel) = path.strip_prefix(root) {
                out.push(rel.to_path_buf());
            }
        }
    }

    let mut out = Vec::new();
    walk(dir, dir, &mut out);
    out.sort();
    out
}
