// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Sitesmith.
//!
//! Pure synthesis logic. All I/O, templating and process execution are
//! handled via ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: No filesystem, network, or external calls
//! - **No logging**: Tracing lives in the application layer and adapters
//! - **Immutable values**: `ResolvedConfig`, plans and graphs have no setters
//! - **Table driven**: choices, prompts and plugin packages are static tables
//!
//! ## Pipeline
//!
//! ```text
//! RawAnswers ─► ConfigResolver ─► ResolvedConfig ─┬─► BuildPipelineSynthesizer ─► BuildTaskGraph
//!                                                 └─► FileTreeSynthesizer ─► FilePlan
//!                                                       ├─ RemoteBoilerplateMerger
//!                                                       └─ ConflictResolver
//! ```

// Public API - what the world sees
pub mod boilerplate_merger;
pub mod config_resolver;
pub mod conflict_resolver;
pub mod entities;
pub mod error;
pub mod file_tree;
pub mod pipeline;
pub mod registry;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use boilerplate_merger::{BOILERPLATE_VERSION, BoilerplateSelection, RemoteBoilerplateMerger};
pub use config_resolver::ConfigResolver;
pub use conflict_resolver::ConflictResolver;
pub use entities::{
    AssetDir, AssetDirectories, BoilerplateToggles, BuildTaskGraph, ContextValue, DerivedContext,
    DirKey, FileCollection, FileOperation, FilePlan, JekyllOptions, OperationKind, Phase,
    RawAnswers, RelativePath, RenderContext, ResolvedConfig, ResolvedConfigBuilder, SiteMetadata,
    SiteSettings, SourceId, SourceRef, SourceSet, Task, TaskKind, WatchTarget,
};
pub use error::{DomainError, ErrorCategory};
pub use file_tree::FileTreeSynthesizer;
pub use pipeline::BuildPipelineSynthesizer;
pub use registry::{PROMPTS, PromptCondition, PromptDef, PromptGroup, PromptKind};
pub use validation::DomainValidator;
pub use value_objects::{
    CssPreprocessor, JsPreprocessor, MarkdownEngine, PermalinkStyle, PostsPerPage, SiteField,
    TemplateType,
};
