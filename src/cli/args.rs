//! Defines the command-line arguments and subcommands for the esc CLI.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "esc",
    version,
    about = "Lex and parse esc source into a located syntax tree."
)]
pub struct EscArgs {
    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the token stream with source spans.
    Tokens {
        #[arg(required = true)]
        file: PathBuf,
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Show the syntax tree for a script.
    Ast {
        #[arg(required = true)]
        file: PathBuf,
        /// Emit the tree and location table as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the canonical rendering of a script.
    Format {
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Parse every `.esc` file under a path and report failures.
    Check {
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}
