//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs::naming::sanitize_filename;

/// Build the directory name for a parent (collection or post).
///
/// `<id>-<sanitized name>` when a non-empty name is known, otherwise `<id>`.
pub fn parent_dir_name(id: u64, name: Option<&str>) -> String {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => format!("{}-{}", id, sanitize_filename(name)),
        None => id.to_string(),
    }
}

/// Resolve and create the output directory for a parent.
pub fn create_parent_dir(root: &Path, id: u64, name: Option<&str>) -> Result<PathBuf> {
    let dir = root.join(parent_dir_name(id, name));
    ensure_dir(&dir)?;
    tracing::info!("Created download directory: {}", dir.display());
    Ok(dir)
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_dir_name() {
        assert_eq!(parent_dir_name(123, Some("My Post: part 1")), "123-My_Post__part_1");
        assert_eq!(parent_dir_name(123, None), "123");
        assert_eq!(parent_dir_name(123, Some("   ")), "123");
    }

    #[test]
    fn test_create_parent_dir() {
        let root = tempfile::tempdir().unwrap();
        let dir = create_parent_dir(root.path(), 9, Some("name")).unwrap();
        assert_eq!(dir, root.path().join("9-name"));
        assert!(dir.is_dir());

        // Second call is a no-op on an existing directory
        assert!(create_parent_dir(root.path(), 9, Some("name")).is_ok());
    }
}
