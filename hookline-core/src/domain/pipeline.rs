//! Pipeline definition domain types
//!
//! The structure serializes to a Buildkite pipeline document. Field order in
//! these structs is the key order of the emitted YAML, so keep it stable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::event::WebhookEvent;

/// Step environment variables carrying the triggering issue
pub const ISSUE_ID_ENV: &str = "LINEAR_ISSUE_ID";
pub const ISSUE_TITLE_ENV: &str = "LINEAR_ISSUE_TITLE";
pub const ISSUE_DESCRIPTION_ENV: &str = "LINEAR_ISSUE_DESCRIPTION";

/// Pipeline definition handed to the CI agent for upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineDefinition {
    pub steps: Vec<Step>,
}

/// A single command step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    pub label: String,
    /// Executed in order by the agent; never empty
    pub commands: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    pub plugins: StepPlugins,
    /// Env var name -> secret name, resolved by the agent at run time
    pub secrets: BTreeMap<String, String>,
}

/// Plugins applied to a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepPlugins {
    pub docker: ContainerSpec,
}

/// Docker plugin configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ContainerSpec {
    pub image: String,
    pub mount_checkout: bool,
    pub mount_buildkite_agent: bool,
    /// Variables passed through from the job environment unmodified
    #[serde(rename = "environment")]
    pub exposed_env_vars: Vec<String>,
}

impl PipelineDefinition {
    /// Creates a definition containing exactly one step
    pub fn single(step: Step) -> Self {
        Self { steps: vec![step] }
    }

    /// Places the issue id, title and description into the step environment
    ///
    /// The values travel inside the uploaded definition instead of through
    /// this process's environment. `$` is doubled so the agent's upload-time
    /// interpolation leaves the text as written.
    pub fn with_issue_env(mut self, event: &WebhookEvent) -> Self {
        for step in &mut self.steps {
            step.env.insert(
                ISSUE_ID_ENV.to_string(),
                escape_interpolation(&event.issue_id),
            );
            step.env.insert(
                ISSUE_TITLE_ENV.to_string(),
                escape_interpolation(&event.title),
            );
            step.env.insert(
                ISSUE_DESCRIPTION_ENV.to_string(),
                escape_interpolation(&event.description),
            );
        }
        self
    }

    /// Serializes the definition to the YAML accepted by `pipeline upload`
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// Doubles `$` so the agent's upload-time interpolation yields the text as written
pub(crate) fn escape_interpolation(value: &str) -> String {
    value.replace('$', "$$")
}
