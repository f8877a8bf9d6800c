//! CLI argument parsing for trackersheet.
//!
//! Uses clap derive macros for declarative argument definitions.
//! Command implementations live in the `commands` module.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Trackersheet: resolve issue-tracker to spreadsheet configs.
///
/// A config names one tracker (Bugzilla or Jira), a target spreadsheet and
/// the sheets to fill. Spreadsheet-level settings are defaults every sheet
/// inherits unless it overrides them.
#[derive(Parser, Debug)]
#[command(name = "trackersheet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for trackersheet.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a config file and report every problem found.
    Check(CheckArgs),

    /// Resolve a config file and print the result.
    Show(ShowArgs),
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to the config file.
    #[arg(env = "TRACKERSHEET_CONFIG", default_value = "config.yaml")]
    pub config: PathBuf,
}

/// Arguments for the `show` command.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Path to the config file.
    #[arg(env = "TRACKERSHEET_CONFIG", default_value = "config.yaml")]
    pub config: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

/// Serialization format for `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
