//! Package installers run inside the generated project.

use std::path::Path;
use std::process::Command;

use tracing::{info, instrument};

use sitesmith_core::{
    application::{ApplicationError, ports::DependencyInstaller},
    error::SitesmithResult,
};

/// Runs each command line in order in the project root; the first failure
/// stops the sequence.
#[derive(Debug, Clone)]
pub struct CommandInstaller {
    commands: Vec<Vec<String>>,
}

impl CommandInstaller {
    pub fn new(commands: Vec<Vec<String>>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &[Vec<String>] {
        &self.commands
    }
}

impl Default for CommandInstaller {
    /// `npm install`, then `bower install`.
    fn default() -> Self {
        Self::new(vec![
            vec!["npm".into(), "install".into()],
            vec!["bower".into(), "install".into()],
        ])
    }
}

impl DependencyInstaller for CommandInstaller {
    #[instrument(skip(self), fields(root = %root.display()))]
    fn install(&self, root: &Path) -> SitesmithResult<()> {
        for command in &self.commands {
            let Some((program, args)) = command.split_first() else {
                continue;
            };
            let line = command.join(" ");
            info!(command = %line, "Running installer");

            let status = Command::new(program)
                .args(args)
                .current_dir(root)
                .status()
                .map_err(|e| ApplicationError::ExternalProcess {
                    command: line.clone(),
                    reason: e.to_string(),
                })?;

            if !status.success() {
                return Err(ApplicationError::ExternalProcess {
                    command: line,
                    reason: format!("exited with {status}"),
                }
                .into());
            }
        }
        Ok(())
    }
}
