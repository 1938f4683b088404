//! Hookline
//!
//! Turns an issue-tracker webhook, delivered through the CI agent's build
//! metadata, into an agent pipeline upload.
//!
//! A run is a single attempt: the payload is read once, checked against the
//! trigger policy, and at most one pipeline is uploaded. Failures exit with
//! status 1 and are never retried here; the tracker redelivers the webhook.

mod commands;
mod config;
mod error;
mod service;

use clap::Parser;
use colored::*;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{Commands, handle_command};
use config::{Config, DEFAULT_AGENT_BIN, DEFAULT_WEBHOOK_KEY};

#[derive(Parser, Debug)]
#[command(name = "hookline")]
#[command(about = "Generate agent pipelines from Linear webhooks", long_about = None)]
struct Cli {
    /// Agent binary used for metadata and pipeline upload
    #[arg(long, env = "HOOKLINE_AGENT_BIN", default_value = DEFAULT_AGENT_BIN, global = true)]
    agent_bin: String,

    /// Metadata key holding the webhook payload
    #[arg(long, env = "HOOKLINE_WEBHOOK_KEY", default_value = DEFAULT_WEBHOOK_KEY, global = true)]
    webhook_key: String,

    /// What started the build; only "webhook" is processed
    #[arg(long, env = "BUILDKITE_SOURCE", global = true)]
    source: Option<String>,

    /// URL of the current build
    #[arg(long, env = "BUILDKITE_BUILD_URL", global = true)]
    build_url: Option<String>,

    /// Capability provider for the generated step
    #[arg(long, env = "MODEL_PROVIDER", global = true)]
    provider: Option<String>,

    /// Only issues carrying this label trigger a pipeline
    #[arg(long, env = "TRIGGER_ON_LABEL", global = true)]
    trigger_label: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    fn config(&self) -> Config {
        Config::new(
            self.source.clone(),
            self.build_url.clone(),
            self.provider.clone(),
            self.trigger_label.clone(),
        )
        .with_agent_bin(self.agent_bin.clone())
        .with_webhook_key(self.webhook_key.clone())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hookline=info,hookline_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = cli.config();

    match handle_command(cli.command.unwrap_or_default(), &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags_build_config() {
        let cli = Cli::try_parse_from([
            "hookline",
            "--source",
            "webhook",
            "--provider",
            "anthropic",
            "--trigger-label",
            "agent-ready",
            "--build-url",
            "https://buildkite.com/acme/hooks/builds/1",
            "--agent-bin",
            "/usr/bin/buildkite-agent",
        ])
        .unwrap();

        let config = cli.config();
        assert!(config.is_webhook_run());
        assert!(config.provider.is_supported());
        assert_eq!(config.trigger.trigger_label(), Some("agent-ready"));
        assert_eq!(config.build_url, "https://buildkite.com/acme/hooks/builds/1");
        assert_eq!(config.agent_bin, "/usr/bin/buildkite-agent");
    }

    #[test]
    fn test_handle_is_default_command() {
        let cli = Cli::try_parse_from(["hookline"]).unwrap();
        assert_eq!(cli.command.unwrap_or_default(), Commands::Handle { dry_run: false });
    }

    #[test]
    fn test_generate_subcommand_accepts_global_flags() {
        let cli = Cli::try_parse_from([
            "hookline",
            "generate",
            "--issue-id",
            "ISSUE-1",
            "--provider",
            "anthropic",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Some(Commands::Generate {
                issue_id: "ISSUE-1".to_string()
            })
        );
        assert_eq!(cli.provider.as_deref(), Some("anthropic"));
    }
}
