//! tRPC request input encoding.
//!
//! Requests are GETs whose body travels as percent-encoded JSON in the
//! `input` query parameter:
//! `{"json": {...params, "authed": true}}`, plus
//! `{"meta": {"values": {"cursor": ["undefined"]}}}` on the first page of a
//! paginated listing.

use serde_json::{json, Map, Value};

use crate::api::types::Cursor;

/// Input of a single tRPC call.
#[derive(Debug, Clone)]
pub struct TrpcInput {
    params: Map<String, Value>,
    first_page: bool,
}

impl TrpcInput {
    /// Create an input from a JSON object of parameters.
    ///
    /// Non-object values are ignored.
    pub fn new(params: Value) -> Self {
        let params = match params {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            params,
            first_page: false,
        }
    }

    /// Attach the pagination cursor.
    ///
    /// `None` declares the first page: the cursor is sent as `null` and the
    /// `meta` marker is added.
    pub fn with_cursor(mut self, cursor: Option<&Cursor>) -> Self {
        let cursor = cursor.filter(|c| !c.is_empty());
        self.params.insert(
            "cursor".to_string(),
            cursor.map(|c| c.0.clone()).unwrap_or(Value::Null),
        );
        self.first_page = cursor.is_none();
        self
    }

    /// The JSON document sent to the server.
    pub fn to_json(&self) -> Value {
        let mut params = self.params.clone();
        params.insert("authed".to_string(), Value::Bool(true));

        let mut input = Map::new();
        input.insert("json".to_string(), Value::Object(params));
        if self.first_page {
            input.insert(
                "meta".to_string(),
                json!({"values": {"cursor": ["undefined"]}}),
            );
        }
        Value::Object(input)
    }

    /// Compact JSON, percent-encoded for the query string.
    pub fn encode(&self) -> String {
        urlencoding::encode(&self.to_json().to_string()).into_owned()
    }

    /// Full request URL for `endpoint` under `base_url`.
    pub fn url(&self, base_url: &str, endpoint: &str) -> String {
        format!(
            "{}/{}?input={}",
            base_url.trim_end_matches('/'),
            endpoint,
            self.encode()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_input_has_authed() {
        let input = TrpcInput::new(json!({"id": 12}));
        assert_eq!(
            input.to_json(),
            json!({"json": {"id": 12, "authed": true}})
        );
    }

    #[test]
    fn test_first_page_adds_meta() {
        let input = TrpcInput::new(json!({"postId": 3})).with_cursor(None);
        assert_eq!(
            input.to_json(),
            json!({
                "json": {"postId": 3, "cursor": null, "authed": true},
                "meta": {"values": {"cursor": ["undefined"]}}
            })
        );
    }

    #[test]
    fn test_later_page_has_no_meta() {
        let cursor = Cursor(json!("100|200"));
        let input = TrpcInput::new(json!({"postId": 3})).with_cursor(Some(&cursor));
        let doc = input.to_json();
        assert_eq!(doc["json"]["cursor"], json!("100|200"));
        assert!(doc.get("meta").is_none());
    }

    #[test]
    fn test_empty_cursor_counts_as_first_page() {
        let cursor = Cursor(json!(""));
        let doc = TrpcInput::new(json!({})).with_cursor(Some(&cursor)).to_json();
        assert!(doc.get("meta").is_some());
        assert_eq!(doc["json"]["cursor"], Value::Null);
    }

    #[test]
    fn test_url_is_percent_encoded() {
        let url = TrpcInput::new(json!({"id": 1})).url("https://example.com/api/trpc/", "image.get");
        assert_eq!(
            url,
            "https://example.com/api/trpc/image.get?input=%7B%22json%22%3A%7B%22id%22%3A1%2C%22authed%22%3Atrue%7D%7D"
        );
    }
}
