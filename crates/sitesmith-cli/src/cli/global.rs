//! Flags shared by every subcommand, flattened into [`super::Cli`].

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// `-v` info, `-vv` debug, `-vvv` trace.  `RUST_LOG` overrides.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "More log output (-v, -vv, -vvv)",
        long_help = "Raise the log level on stderr:
    (none)  - warnings and errors
    -v      - info: sources fetched, files written
    -vv     - debug: answers, plan sizes, rendered templates
    -vvv    - trace"
    )]
    pub verbose: u8,

    /// Errors only; JSON documents are still written.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors only"
    )]
    pub quiet: bool,

    /// Plain output without ANSI colour.  Any non-empty `NO_COLOR` other
    /// than `0`/`false`/`no`/`off` sets it too.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// TOML file read instead of the per-user config.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        env = "SITESMITH_CONFIG",
        value_name = "FILE",
        help = "Use this configuration file"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How results are printed"
    )]
    pub output_format: OutputFormat,
}

/// Rendering of command results on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `output.format` from the config, else human on a terminal and plain
    /// when piped.
    #[default]
    Auto,
    /// Coloured text with a progress spinner.
    Human,
    /// Uncoloured text.
    Plain,
    /// One JSON document per command.
    Json,
}
