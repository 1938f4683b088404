//! Generate command handler
//!
//! Renders the pipeline locally; useful for checking what a webhook would
//! upload without a running agent.

use anyhow::{Context, Result};
use hookline_core::generate;

use crate::config::Config;

/// Print the pipeline for `issue_id` using the configured provider and build URL
pub fn handle_generate(config: &Config, issue_id: &str) -> Result<()> {
    if issue_id.trim().is_empty() {
        anyhow::bail!("issue id cannot be empty");
    }

    let pipeline = generate(issue_id, &config.build_url, &config.provider)
        .to_yaml()
        .context("Failed to serialize pipeline")?;

    print!("{}", pipeline);
    Ok(())
}
