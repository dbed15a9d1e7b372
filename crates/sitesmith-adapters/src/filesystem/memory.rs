//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use sitesmith_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, WriteMode},
    },
    error::{SitesmithError, SitesmithResult},
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can keep one handle and give the other to
/// the service.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<Vec<u8>> {
        self.read().ok()?.files.get(path).cloned()
    }

    /// Read a file as UTF-8 (testing helper).
    pub fn read_to_string(&self, path: &Path) -> Option<String> {
        self.read_file(path)
            .and_then(|bytes| String::from_utf8(bytes).ok())
    }

    /// All files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Every file under `root` keyed by its `/`-joined relative path.
    pub fn snapshot(&self, root: &Path) -> BTreeMap<String, Vec<u8>> {
        let Ok(inner) = self.read() else {
            return BTreeMap::new();
        };
        inner
            .files
            .iter()
            .filter_map(|(path, bytes)| {
                let rel = path.strip_prefix(root).ok()?;
                let key = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                Some((key, bytes.clone()))
            })
            .collect()
    }

    fn read(&self) -> SitesmithResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| lock_error())
    }

    fn write(&self) -> SitesmithResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| lock_error())
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> SitesmithResult<()> {
        let mut inner = self.write()?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if inner.files.contains_key(&current) {
                return Err(ApplicationError::FilesystemError {
                    path: current,
                    reason: "a file exists at this path".into(),
                }
                .into());
            }
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &[u8], mode: WriteMode) -> SitesmithResult<()> {
        let mut inner = self.write()?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }
        if inner.directories.contains(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "a directory exists at this path".into(),
            }
            .into());
        }
        if mode == WriteMode::CreateNew && inner.files.contains_key(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "File exists".into(),
            }
            .into());
        }

        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_empty_dir(&self, path: &Path) -> SitesmithResult<bool> {
        let inner = self.read()?;
        if !inner.directories.contains(path) {
            return Ok(false);
        }
        let has_child = inner
            .files
            .keys()
            .chain(inner.directories.iter())
            .any(|p| p != path && p.starts_with(path));
        Ok(!has_child)
    }
}

fn lock_error() -> SitesmithError {
    SitesmithError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}
