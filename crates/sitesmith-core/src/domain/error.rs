// ============================================================================
// domain/error.rs - SYNTHESIS ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so a plan failure can be reported and logged)
/// - Categorizable (for CLI display and exit codes)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (malformed or missing resolved field)
    // ========================================================================
    #[error("'{field}' cannot be empty")]
    EmptyDirectory { field: &'static str },

    #[error("'{field}' has an invalid directory '{value}': {reason}")]
    InvalidDirectory {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("'{value}' is not a valid answer for '{field}' (expected one of: {})", .allowed.join(", "))]
    UnknownCode {
        field: &'static str,
        value: String,
        allowed: Vec<&'static str>,
    },

    #[error("'{field}' accepts a single value but got: {}", .values.join(", "))]
    MutuallyExclusive {
        field: &'static str,
        values: Vec<String>,
    },

    #[error("'{value}' is not a yes/no answer for '{field}'")]
    InvalidYesNo { field: &'static str, value: String },

    #[error("posts_per_page must be 'all' or a positive number, got '{value}'")]
    InvalidPostsPerPage { value: String },

    #[error("Unknown prompt key: '{key}'")]
    UnknownPrompt { key: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid site name '{name}': {reason}")]
    InvalidAppName { name: String, reason: &'static str },

    // ========================================================================
    // Configuration Errors (plan-time structural defects)
    // ========================================================================
    #[error("Destination '{destination}' is written by both {first} and {second}")]
    DestinationCollision {
        destination: String,
        first: String,
        second: String,
    },

    #[error("Task '{task}' references '{reference}', which is not part of the build graph")]
    OrphanReference { task: String, reference: String },

    // ========================================================================
    // Source Errors (expected upstream path absent)
    // ========================================================================
    #[error("{origin} source is missing '{path}'")]
    SourceMissing { origin: &'static str, path: String },

    #[error("{origin} source is missing '{path}' required by the {group} group")]
    RequiredPathMissing {
        origin: &'static str,
        path: String,
        group: &'static str,
    },

    #[error("{origin} source is not available for this run")]
    SourceUnavailable { origin: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyDirectory { field } => vec![
                format!("Provide a directory name for '{field}'"),
                "Leave the answer blank to accept the default".into(),
            ],
            Self::InvalidDirectory { field, .. } => vec![
                format!("'{field}' must be a path inside the project"),
                "Use a relative name such as 'css' or 'assets/css'".into(),
            ],
            Self::UnknownCode { field, allowed, .. } => vec![
                format!("Valid answers for '{field}':"),
                format!("  {}", allowed.join(", ")),
                "Try: sitesmith prompts".into(),
            ],
            Self::MutuallyExclusive { field, .. } => vec![
                format!("Pick exactly one value for '{field}'"),
                "Preprocessors on the same axis cannot be combined".into(),
            ],
            Self::InvalidYesNo { field, .. } => vec![
                format!("Answer '{field}' with y/yes or n/no"),
                "Leave it blank to accept the default".into(),
            ],
            Self::InvalidPostsPerPage { .. } => vec![
                "Use a positive number, or leave blank to show all posts".into(),
            ],
            Self::UnknownPrompt { key } => vec![
                format!("'{key}' is not a known prompt"),
                "Try: sitesmith prompts".into(),
            ],
            Self::InvalidAppName { .. } => vec![
                "Use a plain directory name such as 'my-blog'".into(),
                "Omit the name to use the current directory".into(),
            ],
            Self::DestinationCollision { destination, .. } => vec![
                format!("Two operations write '{destination}'"),
                "Check that asset directories do not share a name".into(),
            ],
            Self::SourceMissing { origin, path }
            | Self::RequiredPathMissing { origin, path, .. } => {
                vec![
                    format!("The {origin} source did not provide '{path}'"),
                    "Check the baseline generator, boilerplate version, or template directory"
                        .into(),
                ]
            }
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyDirectory { .. }
            | Self::InvalidDirectory { .. }
            | Self::UnknownCode { .. }
            | Self::MutuallyExclusive { .. }
            | Self::InvalidYesNo { .. }
            | Self::InvalidPostsPerPage { .. }
            | Self::UnknownPrompt { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::InvalidConfig(_)
            | Self::InvalidAppName { .. } => ErrorCategory::Validation,
            Self::DestinationCollision { .. } | Self::OrphanReference { .. } => {
                ErrorCategory::Configuration
            }
            Self::SourceMissing { .. }
            | Self::RequiredPathMissing { .. }
            | Self::SourceUnavailable { .. } => ErrorCategory::SourceMissing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    SourceMissing,
}
