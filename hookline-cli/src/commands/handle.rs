//! Webhook command handler

use anyhow::Result;
use hookline_agent::AgentClient;
use tracing::info;

use crate::config::Config;
use crate::service::{Outcome, WebhookHandler};

/// Process the current build's webhook against the real agent
pub async fn handle_webhook(config: &Config, dry_run: bool) -> Result<()> {
    println!("--- :linear: Processing Linear webhook");

    config.validate()?;
    info!(
        "Configuration: agent={}, webhook_key={}, provider={}, trigger_label={}",
        config.agent_bin,
        config.webhook_key,
        config.provider,
        config.trigger.trigger_label().unwrap_or("<unset>")
    );

    let agent = AgentClient::new(config.agent_bin.clone());
    let outcome = WebhookHandler::new(config, &agent)
        .with_dry_run(dry_run)
        .run()
        .await?;

    match outcome {
        Outcome::Rendered { pipeline } => print!("{}", pipeline),
        Outcome::Uploaded { output } => print!("{}", output),
        Outcome::NotAWebhookRun | Outcome::IgnoredAction { .. } | Outcome::NotTriggered { .. } => {}
    }

    Ok(())
}
