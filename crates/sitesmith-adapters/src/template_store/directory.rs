//! Templates read from a user directory.

use std::path::PathBuf;

use tracing::{info, instrument};

use sitesmith_core::{
    application::{ApplicationError, ports::TemplateSource},
    domain::FileCollection,
    error::SitesmithResult,
};

use crate::collection::read_tree;

/// A directory laid out like the built-in `templates/` tree.
///
/// Files it lacks are not filled in from the built-in set; planning reports
/// the first missing one.
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    root: PathBuf,
}

impl DirectoryTemplates {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TemplateSource for DirectoryTemplates {
    #[instrument(skip(self), fields(dir = %self.root.display()))]
    fn load(&self) -> SitesmithResult<FileCollection> {
        if !self.root.is_dir() {
            return Err(ApplicationError::TemplateSource {
                path: self.root.clone(),
                reason: "directory not found".into(),
            }
            .into());
        }
        let files = read_tree(&self.root, &[".git"])?;
        info!(files = files.len(), "Loaded templates from directory");
        Ok(files)
    }
}
