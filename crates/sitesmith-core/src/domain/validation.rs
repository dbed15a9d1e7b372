use crate::domain::{
    conflict_resolver::ConflictResolver,
    entities::{build_graph::BuildTaskGraph, config::ResolvedConfig, file_operation::FilePlan},
    error::DomainError,
};

/// Centralized domain validation.
///
/// Services call through here rather than reaching into each entity.
pub struct DomainValidator;

impl DomainValidator {
    /// A site name becomes a directory and the `package.json` name.
    pub fn validate_app_name(name: &str) -> Result<(), DomainError> {
        let invalid = |reason| {
            Err(DomainError::InvalidAppName {
                name: name.to_string(),
                reason,
            })
        };

        if name.trim().is_empty() {
            return invalid("must not be empty");
        }
        if name == "." || name == ".." {
            return invalid("must name a directory");
        }
        if name.contains(['/', '\\']) {
            return invalid("must not contain path separators");
        }
        if name.chars().any(char::is_control) {
            return invalid("must not contain control characters");
        }
        Ok(())
    }

    pub fn validate_config(config: &ResolvedConfig) -> Result<(), DomainError> {
        config.validate()
    }

    pub fn validate_graph(
        graph: &BuildTaskGraph,
        config: &ResolvedConfig,
    ) -> Result<(), DomainError> {
        graph.verify(config)
    }

    pub fn validate_plan(plan: &FilePlan) -> Result<(), DomainError> {
        ConflictResolver::verify(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_names() {
        assert!(DomainValidator::validate_app_name("my-blog").is_ok());
        assert!(DomainValidator::validate_app_name("Ada's Site").is_ok());
        for bad in ["", "  ", ".", "..", "a/b", "a\\b", "tab\there"] {
            assert!(
                DomainValidator::validate_app_name(bad).is_err(),
                "{bad:?} accepted"
            );
        }
    }
}
