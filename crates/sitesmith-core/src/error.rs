//! Unified error handling for Sitesmith Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Sitesmith Core operations.
///
/// This enum wraps all possible errors that can occur when using sitesmith-core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum SitesmithError {
    /// Errors from the domain layer (resolution, planning, graph checks).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O, processes, rendering).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl SitesmithError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Check your config file with: sitesmith config list".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Sitesmith".into(),
                "Please report this issue at: https://github.com/cosecruz/sitesmith/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
                crate::domain::ErrorCategory::SourceMissing => ErrorCategory::SourceMissing,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether trying the same command again may succeed.
    ///
    /// Nothing in the core retries; this only shapes the CLI hint.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(ApplicationError::BoilerplateFetch { .. })
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    SourceMissing,
    ExternalProcess,
    NotFound,
    Internal,
}

/// Convenient result type alias.
pub type SitesmithResult<T> = Result<T, SitesmithError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> SitesmithResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> SitesmithResult<T> {
        self.map_err(|e| SitesmithError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_categories_carry_through() {
        let err: SitesmithError = DomainError::SourceMissing {
            origin: "baseline",
            path: "index.html".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::SourceMissing);
        assert!(!err.is_retryable());
    }

    #[test]
    fn fetch_failures_are_retryable() {
        let err: SitesmithError = ApplicationError::BoilerplateFetch {
            version: "4.3.0".into(),
            reason: "timed out".into(),
        }
        .into();
        assert!(err.is_retryable());
        assert_eq!(err.category(), ErrorCategory::ExternalProcess);
    }
}
