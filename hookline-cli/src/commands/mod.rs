//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod generate;
mod handle;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Process the webhook of the current build (default)
    Handle {
        /// Print the pipeline instead of uploading it
        #[arg(long)]
        dry_run: bool,
    },
    /// Render the agent pipeline for an issue without contacting the agent
    Generate {
        /// Issue id to analyze
        #[arg(long)]
        issue_id: String,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Handle { dry_run: false }
    }
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The resolved configuration
///
/// # Returns
/// Result indicating success or failure
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Handle { dry_run } => handle::handle_webhook(config, dry_run).await,
        Commands::Generate { issue_id } => generate::handle_generate(config, &issue_id),
    }
}
