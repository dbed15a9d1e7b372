//! Port definitions (interfaces) for the application layer.

pub mod output;

pub use output::{
    BaselineGenerator, BoilerplateFetcher, DependencyInstaller, Filesystem, TemplateEngine,
    TemplateSource, WriteMode,
};
