//! Baseline Jekyll project generators.

use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info, instrument};

use sitesmith_core::{
    application::{ApplicationError, ports::BaselineGenerator},
    domain::FileCollection,
    error::SitesmithResult,
};

use crate::collection::read_tree;

/// Build output and VCS state never count as baseline sources.
const IGNORED: &[&str] = &["_site", ".git", ".jekyll-cache", ".sass-cache"];

/// Runs `jekyll new` into a scratch directory and reads the result.
///
/// The project directory is appended as the last argument.
#[derive(Debug, Clone)]
pub struct JekyllBaseline {
    program: String,
    args: Vec<String>,
}

impl JekyllBaseline {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for JekyllBaseline {
    fn default() -> Self {
        Self::new("jekyll", vec!["new".into()])
    }
}

impl BaselineGenerator for JekyllBaseline {
    #[instrument(skip(self), fields(command = %self.command_line()))]
    fn generate(&self) -> SitesmithResult<FileCollection> {
        let failed = |reason: String| ApplicationError::ExternalProcess {
            command: self.command_line(),
            reason,
        };

        let scratch = tempfile::tempdir().map_err(|e| failed(e.to_string()))?;
        let project = scratch.path().join("baseline");

        info!("Running baseline generator");
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(&project)
            .output()
            .map_err(|e| failed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failed(format!("{}: {}", output.status, stderr.trim())).into());
        }
        debug!(
            stdout = %String::from_utf8_lossy(&output.stdout).trim(),
            "Baseline generator finished"
        );

        read_tree(&project, IGNORED)
    }
}

/// A pre-generated baseline project on disk.
#[derive(Debug, Clone)]
pub struct DirectoryBaseline {
    root: PathBuf,
}

impl DirectoryBaseline {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl BaselineGenerator for DirectoryBaseline {
    #[instrument(skip(self), fields(dir = %self.root.display()))]
    fn generate(&self) -> SitesmithResult<FileCollection> {
        read_tree(&self.root, IGNORED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitesmith_core::error::ErrorCategory;

    #[test]
    fn missing_program_is_an_external_process_error() {
        let baseline = JekyllBaseline::new("sitesmith-no-such-program", vec!["new".into()]);
        let err = baseline.generate().unwrap_err();
        assert_eq!(err.category(), ErrorCategory::ExternalProcess);
        assert!(err.to_string().contains("sitesmith-no-such-program new"));
    }

    #[test]
    fn directory_baseline_skips_build_output() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("_site")).unwrap();
        std::fs::write(dir.path().join("_site/index.html"), "").unwrap();
        std::fs::write(dir.path().join("index.html"), "").unwrap();

        let files = DirectoryBaseline::new(dir.path()).generate().unwrap();
        assert_eq!(files.len(), 1);
    }
}
