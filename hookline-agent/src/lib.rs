//! Hookline Agent Client
//!
//! A thin, typed wrapper around the `buildkite-agent` command-line tool.
//!
//! The CLI is the only channel to the agent: webhook metadata is read and
//! written with `meta-data get/set`, and generated pipelines are handed over
//! with `pipeline upload`. Each call spawns the binary and waits for it; there
//! are no timeouts, so a hung agent blocks the caller.
//!
//! # Example
//!
//! ```no_run
//! use hookline_agent::{Agent, AgentClient};
//!
//! #[tokio::main]
//! async fn main() -> hookline_agent::Result<()> {
//!     let agent = AgentClient::new("buildkite-agent");
//!     let payload = agent.meta_data_get("buildkite:webhook").await?;
//!     println!("{} bytes of payload", payload.len());
//!     Ok(())
//! }
//! ```

pub mod error;
mod metadata;
mod pipelines;

pub use error::{AgentError, Result};

use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Operations Hookline needs from the CI agent
///
/// Implemented by [`AgentClient`] for the real binary; tests substitute an
/// in-memory fake.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Reads a metadata value, returning an empty string when the key is absent
    async fn meta_data_get(&self, key: &str) -> Result<String>;

    /// Writes a metadata value
    async fn meta_data_set(&self, key: &str, value: &str) -> Result<()>;

    /// Uploads a pipeline definition, returning the agent's output
    async fn pipeline_upload(&self, definition: &str) -> Result<String>;
}

/// Client that shells out to the agent binary
#[derive(Debug, Clone)]
pub struct AgentClient {
    /// Path or name of the agent binary (e.g., "buildkite-agent")
    binary: String,
}

impl AgentClient {
    /// Create a new agent client
    ///
    /// # Arguments
    /// * `binary` - Path to the agent binary, or a name resolved through `PATH`
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Get the binary this client invokes
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Runs the agent with `args`, optionally feeding `stdin`, and returns stdout
    async fn run(&self, args: &[&str], stdin: Option<&str>) -> Result<String> {
        let command_line = format!("{} {}", self.binary, args.join(" "));
        debug!("Running {}", command_line);

        let spawn_error = |source| AgentError::Spawn {
            command: command_line.clone(),
            source,
        };
        let io_error = |source| AgentError::Io {
            command: command_line.clone(),
            source,
        };

        let mut child = Command::new(&self.binary)
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        if let Some(input) = stdin {
            if let Some(mut pipe) = child.stdin.take() {
                pipe.write_all(input.as_bytes()).await.map_err(io_error)?;
                // Dropping the pipe closes it so the agent sees EOF
            }
        }

        let output = child.wait_with_output().await.map_err(io_error)?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !stderr.trim().is_empty() {
            debug!("{} stderr: {}", command_line, stderr.trim());
        }

        if !output.status.success() {
            return Err(AgentError::CommandFailed {
                command: command_line,
                status: output.status.code().unwrap_or(-1),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(stdout)
    }
}

impl Default for AgentClient {
    fn default() -> Self {
        Self::new("buildkite-agent")
    }
}

#[async_trait]
impl Agent for AgentClient {
    async fn meta_data_get(&self, key: &str) -> Result<String> {
        self.get_meta_data(key).await
    }

    async fn meta_data_set(&self, key: &str, value: &str) -> Result<()> {
        self.set_meta_data(key, value).await
    }

    async fn pipeline_upload(&self, definition: &str) -> Result<String> {
        self.upload_pipeline(definition).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = AgentClient::new("/usr/local/bin/buildkite-agent");
        assert_eq!(client.binary(), "/usr/local/bin/buildkite-agent");
    }

    #[test]
    fn test_default_client() {
        assert_eq!(AgentClient::default().binary(), "buildkite-agent");
    }

    #[tokio::test]
    async fn test_run_captures_stdout() {
        let client = AgentClient::new("echo");
        let output = client.run(&["hello", "agent"], None).await.unwrap();
        assert_eq!(output, "hello agent\n");
    }

    #[tokio::test]
    async fn test_run_missing_binary() {
        let client = AgentClient::new("hookline-test-no-such-binary");
        let err = client.run(&["meta-data"], None).await.unwrap_err();

        assert!(err.is_spawn_failure());
        assert!(err.to_string().contains("hookline-test-no-such-binary meta-data"));
    }

    #[tokio::test]
    async fn test_run_nonzero_exit() {
        let client = AgentClient::new("false");
        let err = client.run(&[], None).await.unwrap_err();

        match err {
            AgentError::CommandFailed { status, .. } => assert_eq!(status, 1),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_run_stdin_closed_early() {
        // `true` exits without reading; more input than a pipe buffers fails the write
        let client = AgentClient::new("true");
        let input = "x".repeat(1 << 20);
        let err = client.run(&["pipeline", "upload"], Some(&input)).await.unwrap_err();

        assert!(matches!(err, AgentError::Io { .. }));
        assert!(!err.is_spawn_failure());
        assert!(err.to_string().contains("true pipeline upload"));
    }
}
