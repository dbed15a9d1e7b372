//! Infrastructure adapters for Sitesmith.
//!
//! This crate implements the ports defined in `sitesmith_core::application::ports`.
//! It contains all external dependencies and I/O operations: the local
//! filesystem, the minijinja renderer, the bundled templates, the `jekyll new`
//! baseline, the HTML5 Boilerplate download and the npm/bower installers.

pub mod baseline;
pub mod boilerplate;
pub mod collection;
pub mod filesystem;
pub mod installer;
pub mod renderer;
pub mod template_store;

// Re-export commonly used adapters
pub use baseline::{DirectoryBaseline, JekyllBaseline};
pub use boilerplate::{DirectoryBoilerplate, HttpBoilerplateFetcher};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use installer::CommandInstaller;
pub use renderer::MiniJinjaEngine;
pub use template_store::{DirectoryTemplates, EmbeddedTemplates};
