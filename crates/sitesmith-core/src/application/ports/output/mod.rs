//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `sitesmith-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{FileCollection, RenderContext};
use crate::error::SitesmithResult;

/// How `write_file` treats an existing destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Fail if the file already exists.
    CreateNew,
    /// Replace an existing file. Only override operations use this.
    Overwrite,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `sitesmith_adapters::filesystem::LocalFilesystem` (production)
/// - `sitesmith_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SitesmithResult<()>;

    /// Write bytes to a file.
    fn write_file(&self, path: &Path, content: &[u8], mode: WriteMode) -> SitesmithResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// `true` for an existing directory with no entries.
    fn is_empty_dir(&self, path: &Path) -> SitesmithResult<bool>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `sitesmith_adapters::renderer::MiniJinjaEngine`
#[cfg_attr(test, mockall::automock)]
pub trait TemplateEngine: Send + Sync {
    /// Render `text` against `context`. `name` only labels errors.
    fn render(&self, name: &str, text: &str, context: &RenderContext) -> SitesmithResult<String>;
}

/// Port yielding the bundled template collection.
///
/// Implemented by:
/// - `sitesmith_adapters::template_store::EmbeddedTemplates` (compiled in)
/// - `sitesmith_adapters::template_store::DirectoryTemplates` (user override)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateSource: Send + Sync {
    fn load(&self) -> SitesmithResult<FileCollection>;
}

/// Port producing a minimal Jekyll project.
///
/// Implemented by:
/// - `sitesmith_adapters::baseline::JekyllBaseline` (`jekyll new`)
/// - `sitesmith_adapters::baseline::DirectoryBaseline` (pre-generated tree)
#[cfg_attr(test, mockall::automock)]
pub trait BaselineGenerator: Send + Sync {
    fn generate(&self) -> SitesmithResult<FileCollection>;
}

/// Port fetching a pinned HTML5 Boilerplate release.
///
/// Implemented by:
/// - `sitesmith_adapters::boilerplate::HttpBoilerplateFetcher`
/// - `sitesmith_adapters::boilerplate::DirectoryBoilerplate`
#[cfg_attr(test, mockall::automock)]
pub trait BoilerplateFetcher: Send + Sync {
    fn fetch(&self, version: &str) -> SitesmithResult<FileCollection>;
}

/// Port running package installers inside a generated project.
#[cfg_attr(test, mockall::automock)]
pub trait DependencyInstaller: Send + Sync {
    fn install(&self, root: &Path) -> SitesmithResult<()>;
}
