//! Webhook handling
//!
//! Runs one webhook from start to finish: run-context gate, extraction,
//! trigger policy, generation and upload. Nothing is uploaded unless every
//! earlier step succeeded.

use hookline_agent::Agent;
use hookline_core::{TriggerDecision, WebhookAction, generate};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::HandlerError;
use crate::service::extract;

/// How a handled run ended. Every outcome is a successful exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The build was not started by a webhook
    NotAWebhookRun,
    /// The event's action does not lead to pipelines
    IgnoredAction { action: WebhookAction },
    /// The trigger policy declined the event
    NotTriggered { decision: TriggerDecision },
    /// Dry run: the pipeline was rendered but not uploaded
    Rendered { pipeline: String },
    /// The pipeline was uploaded; `output` is what the agent printed
    Uploaded { output: String },
}

/// Handles the webhook of the current build
pub struct WebhookHandler<'a> {
    config: &'a Config,
    agent: &'a dyn Agent,
    dry_run: bool,
}

impl<'a> WebhookHandler<'a> {
    pub fn new(config: &'a Config, agent: &'a dyn Agent) -> Self {
        Self {
            config,
            agent,
            dry_run: false,
        }
    }

    /// Render the pipeline instead of uploading it
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Processes the pending webhook
    ///
    /// # Errors
    /// Returns an error if the payload is missing or invalid, or if an agent
    /// call fails. No pipeline has been uploaded when this returns an error.
    pub async fn run(&self) -> Result<Outcome, HandlerError> {
        if !self.config.is_webhook_run() {
            info!("Not a webhook trigger, exiting");
            return Ok(Outcome::NotAWebhookRun);
        }

        let event = extract(self.agent, &self.config.webhook_key).await?;

        if !event.action.is_triggering() {
            info!("Ignoring Linear webhook action: {}", event.action);
            return Ok(Outcome::IgnoredAction {
                action: event.action,
            });
        }

        info!("Processing {} webhook", event.action);

        match self.config.trigger.evaluate(&event) {
            TriggerDecision::Triggered { label } => {
                info!("Issue has '{}' label, uploading pipeline", label);
            }
            decision => {
                info!("{}, skipping pipeline upload", decision);
                return Ok(Outcome::NotTriggered { decision });
            }
        }

        if !self.config.provider.is_supported() {
            warn!(
                "Model provider is {}; the generated step will fail",
                self.config.provider
            );
        }

        let pipeline = generate(
            &event.issue_id,
            &self.config.build_url,
            &self.config.provider,
        )
        .with_issue_env(&event)
        .to_yaml()?;

        if self.dry_run {
            info!("Dry run, not uploading pipeline");
            return Ok(Outcome::Rendered { pipeline });
        }

        let output = self.agent.pipeline_upload(&pipeline).await?;
        info!("Pipeline uploaded");

        Ok(Outcome::Uploaded { output })
    }
}
