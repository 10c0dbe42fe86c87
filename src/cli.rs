//! Command-line interface built on clap.
//!
//! [`Cli`] carries the global flags (`--api-url`, `--config`, `--verbose`) and
//! an optional [`Command`]; with no command the interactive shell starts.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// List, add and delete users on a REST-backed store.
#[derive(Debug, Parser)]
#[command(name = "roster", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Base URL of the users API (overrides config and ROSTER_API_URL).
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path to the config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Fetch and show all users.
    List,

    /// Create a user, then show the refreshed list.
    Add {
        name: String,
        email: String,
    },

    /// Delete a user by id, then show the refreshed list.
    Delete {
        id: i64,
    },

    /// Interactive session (the default).
    Shell,
}

impl Cli {
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Shell)
    }
}
