//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `SITESMITH_*` environment variables, `__` between sections
//!    (`SITESMITH_INSTALL__ENABLED=false`)
//! 3. Config file (`--config`, else [`AppConfig::config_path`])
//! 4. Built-in defaults (always present)

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use sitesmith_adapters::boilerplate::DEFAULT_ARCHIVE_URL;
use sitesmith_core::domain::{BOILERPLATE_VERSION, RawAnswers};

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Raw answers applied underneath every other input.
    pub defaults: BTreeMap<String, String>,
    pub boilerplate: BoilerplateConfig,
    pub baseline: BaselineConfig,
    pub install: InstallConfig,
    pub templates: TemplateConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoilerplateConfig {
    pub version: String,
    /// `{version}` is replaced with [`Self::version`].
    pub archive_url: String,
    /// Unpacked release to use instead of downloading.
    pub local_path: Option<PathBuf>,
}

impl Default for BoilerplateConfig {
    fn default() -> Self {
        Self {
            version: BOILERPLATE_VERSION.into(),
            archive_url: DEFAULT_ARCHIVE_URL.into(),
            local_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineConfig {
    pub command: String,
    pub args: Vec<String>,
    /// Pre-generated Jekyll project to use instead of running `command`.
    pub local_path: Option<PathBuf>,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            command: "jekyll".into(),
            args: vec!["new".into()],
            local_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    pub enabled: bool,
    /// Each entry is a program followed by its arguments.
    pub commands: Vec<Vec<String>>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            commands: vec![
                vec!["npm".into(), "install".into()],
                vec!["bower".into(), "install".into()],
            ],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub local_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs to this file.
    pub file: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration: the file, then the environment, over the serde
    /// defaults.
    ///
    /// An explicit `config_file` must exist unless `may_be_absent` is set
    /// (`sitesmith init` is about to create it); the default location is
    /// always optional.
    pub fn load(config_file: Option<&PathBuf>, may_be_absent: bool) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), !may_be_absent),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required, Environment::with_prefix("SITESMITH"))
    }

    fn load_from(path: &Path, required: bool, env: Environment) -> anyhow::Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(env.prefix_separator("_").separator("__").try_parsing(true))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.sitesmith.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "sitesmith", "sitesmith")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".sitesmith.toml"))
    }

    /// `defaults` as raw answers.
    pub fn default_answers(&self) -> RawAnswers {
        self.defaults
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn no_env() -> Environment {
        Environment::with_prefix("SITESMITH").source(Some(HashMap::new()))
    }

    #[test]
    fn defaults_install_with_npm_and_bower() {
        let cfg = AppConfig::default();
        assert!(cfg.install.enabled);
        assert_eq!(cfg.install.commands[0], ["npm", "install"]);
        assert_eq!(cfg.boilerplate.version, BOILERPLATE_VERSION);
    }

    #[test]
    fn missing_optional_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load_from(&dir.path().join("none.toml"), false, no_env()).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load_from(&dir.path().join("none.toml"), true, no_env()).is_err());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[defaults]\ncss_preprocessor = \"s\"\n\n[install]\nenabled = false\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path, true, no_env()).unwrap();
        assert!(!cfg.install.enabled);
        assert_eq!(cfg.default_answers().get("css_preprocessor"), Some("s"));
        assert_eq!(cfg.baseline.command, "jekyll");
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let env = Environment::with_prefix("SITESMITH").source(Some(HashMap::from([(
            "SITESMITH_BOILERPLATE__VERSION".to_string(),
            "5.0.0".to_string(),
        )])));
        let cfg = AppConfig::load_from(&dir.path().join("none.toml"), false, env).unwrap();
        assert_eq!(cfg.boilerplate.version, "5.0.0");
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
