//! CLI interface for Parley
//!
//! This module provides the command-line interface using clap's derive API.
//! Running `parley` without a subcommand starts the interactive chat.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parley conversational assistant
///
/// Plans each message with a language model, answers it with recent
/// conversation as context, and remembers the last few turns.
#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log: Option<String>,

    /// Specify alternate configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The requested command, defaulting to an interactive chat
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Chat {
            max_tokens: None,
            max_memory: None,
        })
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start an interactive chat session (default)
    Chat {
        /// Maximum output tokens per reply
        #[arg(long, value_name = "N")]
        max_tokens: Option<usize>,

        /// Number of turns to remember
        #[arg(long, value_name = "N")]
        max_memory: Option<usize>,
    },

    /// Plan and answer a single message
    Ask {
        /// The message to send
        text: String,
    },

    /// Show which agent the planner would pick for a message
    Plan {
        /// The message to classify
        text: String,
    },

    /// Check configuration and backend availability
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration management actions
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Validate configuration file
    Validate,
}
