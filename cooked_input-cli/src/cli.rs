//! Command line definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Which interactive demonstration to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoKind {
    /// Cleaners, length and choice validators on plain strings
    Strings,
    /// Integers and floats with ranges
    Numbers,
    /// Absolute and relative dates
    Dates,
    /// Delimited lists of numbers
    Lists,
    /// Menus with actions
    Menu,
    /// Picking a row from a table
    Table,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run an interactive demonstration
    Demo {
        #[arg(value_enum)]
        which: DemoKind,
    },
    /// Ask a prompt defined in the configuration and print the answer
    Ask {
        /// Name of the prompt under [prompts]
        name: String,

        /// Print the answer as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a value against a configured prompt without asking
    Check {
        /// Name of the prompt under [prompts]
        name: String,

        /// The raw value to clean, convert and validate
        value: String,
    },
    /// List the configured prompts
    Prompts,
    /// Show configuration file locations
    Sources,
}

/// CLI arguments for cooked-input
#[derive(Parser, Debug)]
#[command(name = "cooked-input")]
#[command(author, version, about = "Get, clean, convert and validate terminal input")]
#[command(long_about = r#"
cooked-input asks questions on the terminal and keeps asking until the answer
can be cleaned, converted and validated.

Prompts can be defined in configuration files, loaded from (in priority order):
1. COOKED_INPUT_* environment variables
2. --config <path>                         Explicit config file
3. ./cooked_input.toml                     Project-level config
4. ~/.config/cooked-input/config.toml      Global config

Example:
  cooked-input demo numbers
  cooked-input ask workers --json
  cooked-input check workers 42
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
