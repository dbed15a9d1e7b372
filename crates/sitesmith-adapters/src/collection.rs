//! Reading a directory tree into a [`FileCollection`].

use std::fs;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use sitesmith_core::{
    application::ApplicationError,
    domain::{FileCollection, RelativePath},
    error::SitesmithResult,
};

/// Read every regular file under `root`, keyed by its `/`-joined path
/// relative to `root`.
///
/// `skip` names top-level entries to leave out (e.g. `_site`, `.git`).
pub fn read_tree(root: &Path, skip: &[&str]) -> SitesmithResult<FileCollection> {
    let unreadable = |reason: String| ApplicationError::FilesystemError {
        path: root.to_path_buf(),
        reason,
    };

    if !root.is_dir() {
        return Err(unreadable("not a directory".into()).into());
    }

    let mut collection = FileCollection::new();
    let walker = WalkDir::new(root).min_depth(1).sort_by_file_name();
    for entry in walker.into_iter().filter_entry(|e| {
        e.depth() != 1 || !skip.iter().any(|s| e.file_name() == *s)
    }) {
        let entry = entry.map_err(|e| unreadable(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| unreadable(e.to_string()))?;
        let key = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let path = RelativePath::try_new(&key)?;
        let bytes = fs::read(entry.path()).map_err(|e| ApplicationError::FilesystemError {
            path: entry.path().to_path_buf(),
            reason: e.to_string(),
        })?;
        collection.insert(path, bytes);
    }

    debug!(root = %root.display(), files = collection.len(), "Read tree");
    Ok(collection)
}
