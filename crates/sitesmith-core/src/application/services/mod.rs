//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a site" or "render a template".

pub mod scaffold_service;
pub mod template_composer;

pub use scaffold_service::{
    Materialized, PlannedEntry, ScaffoldPlan, ScaffoldReport, ScaffoldRequest, ScaffoldService,
};
pub use template_composer::TemplateComposer;
