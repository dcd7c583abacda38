//! Configuration module for the civitai-downloader.
//!
//! This module handles:
//! - Loading and saving the TOML configuration file
//! - First-run prompting for missing values
//! - Configuration validation and ID parsing

pub mod loader;
pub mod prompt;
pub mod validation;

pub use loader::{Config, CONFIG_FILE_NAME, DEFAULT_API_BASE_URL, DEFAULT_MEDIA_BASE_URL};
pub use prompt::{can_prompt, prompt_for_config};
pub use validation::{parse_collection_id, parse_post_id, validate_api_key, validate_config};
