//! Configuration module
//!
//! Settings come from command-line flags with environment fallbacks (see
//! `main.rs`). Empty environment values are treated as unset.

use hookline_core::{ModelProvider, TriggerPolicy};

/// Default agent binary
pub const DEFAULT_AGENT_BIN: &str = "buildkite-agent";

/// Metadata key the agent stores the webhook body under
pub const DEFAULT_WEBHOOK_KEY: &str = "buildkite:webhook";

/// `BUILDKITE_SOURCE` value of a webhook-triggered build
pub const WEBHOOK_SOURCE: &str = "webhook";

/// Hookline configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Agent binary used for metadata and upload calls
    pub agent_bin: String,

    /// Metadata key holding the webhook payload
    pub webhook_key: String,

    /// What started the build (`BUILDKITE_SOURCE`)
    pub source: Option<String>,

    /// URL of the current build, handed to the generated step
    pub build_url: String,

    /// Capability provider for the generated step
    pub provider: ModelProvider,

    /// Label gating for incoming events
    pub trigger: TriggerPolicy,
}

impl Config {
    /// Creates a configuration with default agent settings
    pub fn new(
        source: Option<String>,
        build_url: Option<String>,
        provider: Option<String>,
        trigger_label: Option<String>,
    ) -> Self {
        Self {
            agent_bin: DEFAULT_AGENT_BIN.to_string(),
            webhook_key: DEFAULT_WEBHOOK_KEY.to_string(),
            source: source.filter(|s| !s.is_empty()),
            build_url: build_url.unwrap_or_default(),
            provider: ModelProvider::resolve(provider.as_deref()),
            trigger: TriggerPolicy::new(trigger_label),
        }
    }

    /// Overrides the agent binary
    pub fn with_agent_bin(mut self, agent_bin: String) -> Self {
        self.agent_bin = agent_bin;
        self
    }

    /// Overrides the webhook metadata key
    pub fn with_webhook_key(mut self, webhook_key: String) -> Self {
        self.webhook_key = webhook_key;
        self
    }

    /// Whether this build was started by a webhook
    pub fn is_webhook_run(&self) -> bool {
        self.source.as_deref() == Some(WEBHOOK_SOURCE)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.agent_bin.trim().is_empty() {
            anyhow::bail!("agent_bin cannot be empty");
        }

        if self.webhook_key.trim().is_empty() {
            anyhow::bail!("webhook_key cannot be empty");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, None, None, None)
    }
}
