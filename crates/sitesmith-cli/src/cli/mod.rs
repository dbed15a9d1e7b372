//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "sitesmith",
    bin_name = "sitesmith",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold a Jekyll site with a generated Grunt build",
    long_about = "sitesmith asks a few questions (or reads a settings file), then \
                  writes a Jekyll project with asset directories, optional Sass, \
                  Compass or CoffeeScript wiring, an optional HTML5 Boilerplate \
                  layout and a matching Gruntfile.",
    after_help = "EXAMPLES:\n\
        \x20 sitesmith new blog\n\
        \x20 sitesmith new blog --set css_preprocessor=s --set template_type=h5 -y\n\
        \x20 sitesmith new blog --answers site.toml --dry-run\n\
        \x20 sitesmith prompts --format json\n\
        \x20 sitesmith completions bash > /usr/share/bash-completion/completions/sitesmith",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scaffold a new site.
    #[command(
        visible_alias = "n",
        about = "Scaffold a new Jekyll site",
        after_help = "EXAMPLES:\n\
            \x20 sitesmith new blog -i\n\
            \x20 sitesmith new blog --set template_type=h5 --set include_icons=y -y\n\
            \x20 sitesmith new blog --answers site.toml --skip-install"
    )]
    New(NewArgs),

    /// List every question and its default.
    #[command(
        about = "List prompt keys, defaults and choices",
        after_help = "EXAMPLES:\n\
            \x20 sitesmith prompts\n\
            \x20 sitesmith prompts --format json"
    )]
    Prompts(PromptsArgs),

    /// Initialise a sitesmith configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 sitesmith init\n\
            \x20 sitesmith init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 sitesmith completions bash > ~/.local/share/bash-completion/completions/sitesmith\n\
            \x20 sitesmith completions zsh  > ~/.zfunc/_sitesmith\n\
            \x20 sitesmith completions fish > ~/.config/fish/completions/sitesmith.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the sitesmith configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 sitesmith config get boilerplate.version\n\
            \x20 sitesmith config list\n\
            \x20 sitesmith config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `sitesmith new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Site name.  Creates `./NAME`; without it the current directory is
    /// used and must be empty.
    #[arg(value_name = "NAME", help = "Site name (default: current directory)")]
    pub name: Option<String>,

    /// TOML settings file.
    #[arg(
        short = 'a',
        long = "answers",
        value_name = "FILE",
        help = "Read answers from a TOML settings file"
    )]
    pub answers: Option<PathBuf>,

    /// Raw answer overrides, applied last.
    #[arg(
        short = 's',
        long = "set",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        help = "Set one answer (repeatable)"
    )]
    pub set: Vec<(String, String)>,

    /// Ask every unanswered question.
    #[arg(
        short = 'i',
        long = "interactive",
        help = "Prompt for answers not given on the command line"
    )]
    pub interactive: bool,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Do not run npm / bower afterwards.
    #[arg(long = "skip-install", help = "Skip npm and bower install")]
    pub skip_install: bool,

    /// Use a pre-generated Jekyll project instead of running `jekyll new`.
    #[arg(long = "baseline-dir", value_name = "DIR")]
    pub baseline_dir: Option<PathBuf>,

    /// Use an unpacked HTML5 Boilerplate release instead of downloading one.
    #[arg(long = "boilerplate-dir", value_name = "DIR")]
    pub boilerplate_dir: Option<PathBuf>,

    /// Use templates from a directory instead of the bundled ones.
    #[arg(long = "templates-dir", value_name = "DIR")]
    pub templates_dir: Option<PathBuf>,
}

/// `key=value`, split on the first `=`.
fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

// ── prompts ───────────────────────────────────────────────────────────────────

/// Arguments for `sitesmith prompts`.
#[derive(Debug, Args)]
pub struct PromptsArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: PromptsFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PromptsFormat {
    /// Human-readable table.
    Table,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `sitesmith init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `sitesmith completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `sitesmith config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `install.enabled`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
