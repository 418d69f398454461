//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Tangelo CLI - check plugin version requirements and evaluate accessor specs
#[derive(Parser, Debug)]
#[command(
    name = "tangelo",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "TANGELO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the library version and API root
    Version,

    /// Check a required version against the library version
    Check(CheckArgs),

    /// Parse a version string and show its normalized form
    Parse(ParseArgs),

    /// Apply an accessor spec to a list of JSON records
    Access(AccessArgs),

    /// Show the in-band error object for an error code
    Error(ErrorArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Required version (e.g. 1.2, 0.7-dev)
    #[arg(value_name = "REQUIREMENT")]
    pub requirement: String,

    /// Check against this version instead of the library's own
    #[arg(long = "against", value_name = "VERSION")]
    pub against: Option<String>,

    /// Treat malformed version strings as fatal, the way plugins do
    #[arg(long)]
    pub fatal: bool,
}

/// Arguments for the parse command
#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Version string to parse
    #[arg(id = "version_string", value_name = "VERSION")]
    pub version: String,
}

/// Arguments for the access command
#[derive(Parser, Debug)]
pub struct AccessArgs {
    /// Accessor spec as JSON, e.g. '{"field": "a.b"}'
    #[arg(short, long, value_name = "SPEC")]
    pub spec: String,

    /// JSON file with an array of records (stdin if not specified)
    #[arg(value_name = "RECORDS")]
    pub records: Option<PathBuf>,
}

/// Arguments for the error command
#[derive(Parser, Debug)]
pub struct ErrorArgs {
    /// Error code
    #[arg(value_name = "CODE")]
    pub code: u32,

    /// Use this message instead of the registered one
    #[arg(short, long)]
    pub message: Option<String>,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
