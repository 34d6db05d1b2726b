//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for slotguard
#[derive(Parser, Debug)]
#[command(name = "slotguard")]
#[command(author, version, about = "Single-use choices for survey forms")]
#[command(long_about = r#"
Slotguard removes an option from a choice question as soon as a respondent
picks it, so every option can be claimed only once. When the last real
option is taken, a placeholder option is left in its place.

Only the first identity to change the configuration (the owner) may change
it afterwards.

Configuration files are loaded from (in priority order):
1. SLOTGUARD_* environment variables
2. --config <path>       Explicit config file
3. ./slotguard.toml      Project-level config
4. ~/.config/slotguard/config.toml   Global config

Example:
  slotguard questions
  slotguard --as ada@example.com enable 1a2b3c
  slotguard submit response.json
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Act as this identity (overrides [identity] email)
    #[arg(long = "as", value_name = "EMAIL", global = true)]
    pub as_identity: Option<String>,

    /// Print machine-readable JSON instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the questions that can be gated
    Questions,
    /// Show the stored configuration and its owner
    Config,
    /// Make a question's options single-use
    Enable {
        /// Question id
        question_id: String,
    },
    /// Stop removing options from a question
    Disable {
        /// Question id
        question_id: String,
    },
    /// Process a form submission payload
    Submit {
        /// JSON file with `{"itemResponses": [...]}`
        response: PathBuf,
    },
    /// Show configuration file locations
    ShowConfig,
}
