//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// menulint - Review restaurant menus for typos and price discrepancies.
#[derive(Debug, Parser)]
#[command(name = "menulint")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Model name (overrides the config file)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Total attempts per request, including the first
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// One card per finding (default)
    Card,
    /// JSON format
    Json,
    /// Quiet format (one line per finding)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find typos and wording improvements in a menu
    Correct(CorrectArgs),

    /// Compare a menu against a reference price sheet
    Compare(CompareArgs),

    /// Run corrections and, with a reference, the comparison at once
    Review(ReviewArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the correct command.
#[derive(Debug, Parser)]
pub struct CorrectArgs {
    /// Menu document (PDF or TXT)
    pub menu: PathBuf,
}

/// Arguments for the compare command.
#[derive(Debug, Parser)]
pub struct CompareArgs {
    /// Menu document (PDF or TXT)
    pub menu: PathBuf,

    /// Reference price sheet (DOCX or TXT)
    pub reference: PathBuf,
}

/// Arguments for the review command.
#[derive(Debug, Parser)]
pub struct ReviewArgs {
    /// Menu document (PDF or TXT)
    pub menu: PathBuf,

    /// Reference price sheet (DOCX or TXT)
    #[arg(short, long)]
    pub reference: Option<PathBuf>,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Card => crate::config::OutputFormat::Card,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
