//! Local filesystem adapter using std::fs.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use sitesmith_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, WriteMode},
    },
    error::{SitesmithError, SitesmithResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> SitesmithResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &[u8], mode: WriteMode) -> SitesmithResult<()> {
        let mut options = OpenOptions::new();
        options.write(true);
        match mode {
            WriteMode::CreateNew => options.create_new(true),
            WriteMode::Overwrite => options.create(true).truncate(true),
        };

        let mut file = options
            .open(path)
            .map_err(|e| map_io_error(path, e, "create file"))?;
        file.write_all(content)
            .map_err(|e| map_io_error(path, e, "write file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_empty_dir(&self, path: &Path) -> SitesmithResult<bool> {
        if !path.is_dir() {
            return Ok(false);
        }
        let mut entries = fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;
        Ok(entries.next().is_none())
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> SitesmithError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_new_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        let fs = LocalFilesystem::new();

        fs.write_file(&path, b"one", WriteMode::CreateNew).unwrap();
        assert!(fs.write_file(&path, b"two", WriteMode::CreateNew).is_err());

        fs.write_file(&path, b"three", WriteMode::Overwrite).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"three");
    }

    #[test]
    fn empty_dir_detection() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        assert!(fs.is_empty_dir(dir.path()).unwrap());

        std::fs::write(dir.path().join("x"), "").unwrap();
        assert!(!fs.is_empty_dir(dir.path()).unwrap());
        assert!(!fs.is_empty_dir(&dir.path().join("x")).unwrap());
        assert!(!fs.is_empty_dir(&dir.path().join("missing")).unwrap());
    }
}
