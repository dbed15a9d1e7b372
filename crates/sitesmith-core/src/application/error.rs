//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Template rendering failed.
    #[error("Rendering '{template}' failed: {reason}")]
    RenderingFailed { template: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Target directory exists and is not empty.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// An external program (baseline generator, installer) failed.
    #[error("'{command}' failed: {reason}")]
    ExternalProcess { command: String, reason: String },

    /// The boilerplate release could not be fetched or unpacked.
    #[error("Could not fetch HTML5 Boilerplate {version}: {reason}")]
    BoilerplateFetch { version: String, reason: String },

    /// The bundled template collection could not be loaded.
    #[error("Template source unavailable at {path}: {reason}")]
    TemplateSource { path: PathBuf, reason: String },

    /// A worker thread panicked.
    #[error("Background task '{task}' panicked")]
    TaskPanicked { task: &'static str },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RenderingFailed { template, .. } => vec![
                format!("Check the template '{template}' for undefined variables"),
                "Custom templates can be set with --templates-dir".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory is not empty: {}", path.display()),
                "Choose a different site name or an empty directory".into(),
            ],
            Self::ExternalProcess { command, .. } => vec![
                format!("Make sure '{command}' is installed and on your PATH"),
                "Use --baseline-dir to supply a pre-generated Jekyll site".into(),
                "Use --skip-install to skip npm and bower".into(),
            ],
            Self::BoilerplateFetch { .. } => vec![
                "Check your network connection and try again".into(),
                "Use --boilerplate-dir to point at an unpacked release".into(),
            ],
            Self::TemplateSource { path, .. } => vec![
                format!("Check that {} contains the site templates", path.display()),
                "Omit --templates-dir to use the built-in templates".into(),
            ],
            Self::TaskPanicked { .. } => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RenderingFailed { .. } | Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::TaskPanicked { .. } => ErrorCategory::Internal,
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::ExternalProcess { .. } | Self::BoilerplateFetch { .. } => {
                ErrorCategory::ExternalProcess
            }
            Self::TemplateSource { .. } => ErrorCategory::NotFound,
        }
    }
}
