pub mod answers;
pub mod build_graph;
pub mod common;
pub mod config;
pub mod file_operation;
pub mod render_context;
pub mod source;

pub use crate::domain::DomainError;
pub use answers::{RawAnswers, SiteSettings};
pub use build_graph::{BuildTaskGraph, Glob, GlobBase, Task, TaskKind, WatchTarget};
pub use common::{AssetDir, RelativePath};
pub use config::{
    AssetDirectories, BoilerplateToggles, DirKey, JekyllOptions, ResolvedConfig,
    ResolvedConfigBuilder, SiteMetadata,
};
pub use file_operation::{FileOperation, FilePlan, OperationKind, Phase, SourceId, SourceRef};
pub use render_context::{ContextValue, DerivedContext, RenderContext};
pub use source::{FileCollection, SourceSet};
