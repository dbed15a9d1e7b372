//! Application layer for Sitesmith.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService, TemplateComposer)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    Materialized, PlannedEntry, ScaffoldPlan, ScaffoldReport, ScaffoldRequest, ScaffoldService,
    TemplateComposer,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    BaselineGenerator, BoilerplateFetcher, DependencyInstaller, Filesystem, TemplateEngine,
    TemplateSource, WriteMode,
};

pub use error::ApplicationError;
