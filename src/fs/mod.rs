//! Filesystem module.
//!
//! Provides:
//! - Filename sanitization and MIME type to extension mapping
//! - Output directory management

pub mod naming;
pub mod paths;

pub use naming::{get_file_extension, sanitize_filename, split_extension};
pub use paths::{create_parent_dir, ensure_dir, parent_dir_name};
