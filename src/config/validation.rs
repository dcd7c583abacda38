//! Configuration validation and ID parsing.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Upper bound on per-file download retries.
const MAX_RETRIES_LIMIT: u32 = 20;

static COLLECTION_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/collections/(\d+)").expect("valid regex"));

static POST_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/posts/(\d+)").expect("valid regex"));

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_api_key(&config.api_key)?;

    if config.max_retries > MAX_RETRIES_LIMIT {
        return Err(Error::ConfigValidation {
            field: "max_retries".to_string(),
            message: format!(
                "At most {} retries allowed (got {})",
                MAX_RETRIES_LIMIT, config.max_retries
            ),
        });
    }

    if !config.request_delay.is_finite() || config.request_delay < 0.0 {
        return Err(Error::ConfigValidation {
            field: "request_delay".to_string(),
            message: format!(
                "Delay must be a non-negative number of seconds (got {})",
                config.request_delay
            ),
        });
    }

    Ok(())
}

/// Validate the API key.
pub fn validate_api_key(api_key: &str) -> Result<()> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(Error::MissingConfig("api_key".to_string()));
    }

    let lower = api_key.to_lowercase();
    if lower.contains("replaceme") || lower.contains("your_api_key") {
        return Err(Error::ConfigValidation {
            field: "api_key".to_string(),
            message: "API key appears to be a placeholder. Please provide your CivitAI API key."
                .to_string(),
        });
    }

    Ok(())
}

/// Extract a collection ID from a bare number or a collection URL.
pub fn parse_collection_id(input: &str) -> Result<u64> {
    parse_id(input, &COLLECTION_URL, "collection")
}

/// Extract a post ID from a bare number or a post URL.
pub fn parse_post_id(input: &str) -> Result<u64> {
    parse_id(input, &POST_URL, "post")
}

fn parse_id(input: &str, url_pattern: &Regex, kind: &'static str) -> Result<u64> {
    let input = input.trim();
    let invalid = || Error::InvalidId {
        kind,
        input: input.to_string(),
    };

    let digits = if input.starts_with("http://") || input.starts_with("https://") {
        url_pattern
            .captures(input)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .ok_or_else(invalid)?
    } else {
        input
    };

    digits.parse::<u64>().map_err(|_| invalid())
}
