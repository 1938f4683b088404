//! Pipeline generator
//!
//! Builds the single-step agent pipeline for an issue. Output depends only on
//! the arguments and the fixed tables below, so identical inputs always render
//! byte-identical YAML.

use std::collections::BTreeMap;

use crate::domain::pipeline::{
    ContainerSpec, PipelineDefinition, Step, StepPlugins, escape_interpolation,
};
use crate::domain::provider::ModelProvider;

pub const STEP_ID: &str = "agent";
pub const STEP_LABEL: &str = ":linear: Analyzing the issue";
pub const AGENT_IMAGE: &str = "buildkite-agentic-example-tools:latest";

const AGENT_SCRIPT: &str = "./scripts/claude.sh";
const PROMPT_FILE: &str = "prompts/user.md";

/// Variables passed through from the job environment into the container
pub const PASSTHROUGH_ENV: &[&str] = &[
    "BUILDKITE",
    "BUILDKITE_AGENT_ENDPOINT",
    "BUILDKITE_AGENT_ACCESS_TOKEN",
    "BUILDKITE_API_TOKEN",
    "BUILDKITE_BUILD_URL",
    "BUILDKITE_MCP_SERVER_VERSION",
    "GITHUB_CLI_VERSION",
    "GITHUB_TOKEN",
    "LINEAR_API_TOKEN",
    "LINEAR_ISSUE_ID",
    "LINEAR_ISSUE_TITLE",
    "LINEAR_ISSUE_DESCRIPTION",
    "TRIGGER_ON_LABEL",
    "MODEL_PROVIDER",
];

/// Env var name -> secret name
pub const SECRETS: &[(&str, &str)] = &[
    ("GITHUB_TOKEN", "GITHUB_TOKEN"),
    ("BUILDKITE_API_TOKEN", "API_TOKEN_BUILDKITE"),
    ("LINEAR_API_TOKEN", "LINEAR_API_TOKEN"),
];

/// Generates the pipeline definition for an issue
///
/// # Arguments
/// * `issue_id` - Tracker id of the issue to analyze
/// * `build_url` - URL of the build that received the webhook
/// * `provider` - Capability provider that runs the analysis
///
/// # Returns
/// A definition with one step. For an unsupported provider the step's
/// commands explain the problem and then exit nonzero.
pub fn generate(issue_id: &str, build_url: &str, provider: &ModelProvider) -> PipelineDefinition {
    let token_args = [
        format!("LinearIssueID={}", issue_id),
        format!("AgentBuildURL={}", build_url),
    ];

    let step = Step {
        id: STEP_ID.to_string(),
        label: STEP_LABEL.to_string(),
        commands: provider_commands(provider, &token_args)
            .iter()
            .map(|command| escape_interpolation(command))
            .collect(),
        env: BTreeMap::new(),
        plugins: StepPlugins {
            docker: ContainerSpec {
                image: AGENT_IMAGE.to_string(),
                mount_checkout: false,
                mount_buildkite_agent: true,
                exposed_env_vars: PASSTHROUGH_ENV.iter().map(|name| name.to_string()).collect(),
            },
        },
        secrets: SECRETS
            .iter()
            .map(|(env, secret)| (env.to_string(), secret.to_string()))
            .collect(),
    };

    PipelineDefinition::single(step)
}

/// Command sequence for the selected provider
fn provider_commands(provider: &ModelProvider, token_args: &[String]) -> Vec<String> {
    match provider {
        ModelProvider::Anthropic => {
            let mut run = vec![AGENT_SCRIPT.to_string(), PROMPT_FILE.to_string()];
            run.extend(token_args.iter().map(|arg| shell_quote(arg)));

            vec![echo("--- :claude: Run Claude Code"), run.join(" ")]
        }
        ModelProvider::Unsupported { requested } => {
            let headline = match requested {
                None => "--- :no_entry_sign: Missing MODEL_PROVIDER".to_string(),
                Some(name) => format!("--- :no_entry_sign: Unsupported MODEL_PROVIDER '{}'", name),
            };
            let supported = ModelProvider::SUPPORTED
                .iter()
                .map(|name| format!("'{}'", name))
                .collect::<Vec<_>>()
                .join(", ");

            vec![
                echo(&headline),
                echo(&format!("Supported model providers are {}.", supported)),
                echo("Use the MODEL_PROVIDER environment variable to set one."),
                "exit 1".to_string(),
            ]
        }
    }
}

fn echo(message: &str) -> String {
    format!("echo {}", shell_quote(message))
}

/// Quotes a word for a POSIX shell, leaving it bare when that is already safe
fn shell_quote(word: &str) -> String {
    let is_safe = |c: char| c.is_ascii_alphanumeric() || "-_=.,:/@%+".contains(c);

    if !word.is_empty() && word.chars().all(is_safe) {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}
