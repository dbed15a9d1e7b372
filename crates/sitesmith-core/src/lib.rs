//! Sitesmith Core - synthesis engine for Jekyll + Grunt site scaffolds.
//!
//! This crate provides the domain and application layers of the `sitesmith`
//! generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          sitesmith-cli (CLI)            │
//! │   prompts / settings file -> answers    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ScaffoldService, TemplateComposer)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ Filesystem, TemplateEngine, Baseline,   │
//! │ BoilerplateFetcher, DependencyInstaller │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    sitesmith-adapters (Infrastructure)  │
//! │ (LocalFilesystem, MiniJinjaEngine, etc) │
//! └─────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ ConfigResolver, FileTreeSynthesizer,    │
//! │ BuildPipelineSynthesizer, Conflict-     │
//! │ Resolver, RemoteBoilerplateMerger       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sitesmith_core::domain::{ConfigResolver, RawAnswers};
//! use sitesmith_core::application::ScaffoldRequest;
//!
//! let answers = RawAnswers::new().with("css_preprocessor", "s");
//! let config = ConfigResolver::resolve(&answers).unwrap();
//! # let service: sitesmith_core::application::ScaffoldService = unimplemented!();
//! let report = service
//!     .scaffold(&ScaffoldRequest {
//!         config,
//!         app_name: "blog".into(),
//!         target: "./blog".into(),
//!         date: chrono::Local::now().date_naive(),
//!         skip_install: true,
//!     })
//!     .unwrap();
//! println!("{} files", report.files);
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ScaffoldReport, ScaffoldRequest, ScaffoldService, TemplateComposer,
        ports::{
            BaselineGenerator, BoilerplateFetcher, DependencyInstaller, Filesystem,
            TemplateEngine, TemplateSource, WriteMode,
        },
    };
    pub use crate::domain::{
        BoilerplateToggles, ConfigResolver, CssPreprocessor, FileCollection, JsPreprocessor,
        RawAnswers, RenderContext, ResolvedConfig, SiteSettings, TemplateType,
    };
    pub use crate::error::{SitesmithError, SitesmithResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
