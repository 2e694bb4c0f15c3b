//! Tree scanning
//!
//! Id allocation and lookup are tree-wide concerns: artifacts move between
//! status directories but keep their ids, so every scan walks a kind's
//! whole collection root rather than a single status subdirectory.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::StoreError;

/// Every markdown file under `root`, in deterministic order
///
/// A missing root is an empty collection, not an error (nothing has been
/// created yet). Unreadable entries are surfaced as I/O errors with the
/// failing path.
pub(crate) fn markdown_files(root: &Path) -> Result<Vec<PathBuf>, StoreError> {
    let mut files = Vec::new();
    if !root.exists() {
        return Ok(files);
    }
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map_or_else(|| root.to_path_buf(), Path::to_path_buf);
            StoreError::io(path, e.into())
        })?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "md")
        {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
