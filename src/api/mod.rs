//! CivitAI API module.
//!
//! This module provides:
//! - HTTP client for the tRPC endpoints
//! - Request input encoding
//! - Cursor pagination
//! - API response types

pub mod client;
pub mod pagination;
pub mod request;
pub mod types;

pub use client::{CivitaiApi, BROWSING_LEVEL_ALL};
pub use pagination::{fetch_all, MAX_PAGES};
pub use request::TrpcInput;
pub use types::*;
