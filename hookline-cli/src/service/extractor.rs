//! Event extraction
//!
//! Reads the pending webhook payload from build metadata, validates it, and
//! records the action and source back to metadata for later steps.

use hookline_agent::Agent;
use hookline_core::WebhookEvent;
use tracing::{debug, info, warn};

use crate::error::HandlerError;

/// Metadata key receiving the webhook action
pub const ACTION_KEY: &str = "webhook:action";

/// Metadata key receiving the webhook source tag
pub const SOURCE_KEY: &str = "webhook:source";

/// Source tag written for every extracted event
pub const SOURCE_TAG: &str = "linear";

/// Extracts the webhook event stored under `key`
///
/// # Errors
/// Returns an error if the agent cannot be queried or the payload fails
/// validation. Nothing is written to metadata in that case.
pub async fn extract(agent: &dyn Agent, key: &str) -> Result<WebhookEvent, HandlerError> {
    let raw = agent.meta_data_get(key).await?;
    debug!("Received webhook payload: {}", raw.trim());

    let event = WebhookEvent::parse(&raw)?;

    info!("Webhook action: {}", event.action);
    info!("Issue ID: {}", event.issue_id);
    info!("Issue Title: {}", event.title);
    info!("Issue State: {}", event.state_name);
    info!("Issue Labels: {}", event.label_names().join(","));

    // Observability only; a failed write does not affect this run
    for (meta_key, value) in [(ACTION_KEY, event.action.as_str()), (SOURCE_KEY, SOURCE_TAG)] {
        if let Err(e) = agent.meta_data_set(meta_key, value).await {
            warn!("Failed to record {} in build metadata: {}", meta_key, e);
        }
    }

    Ok(event)
}
