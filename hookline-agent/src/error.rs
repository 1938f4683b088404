//! Error types for the agent client

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Errors that can occur when invoking the CI agent CLI
#[derive(Debug, Error)]
pub enum AgentError {
    /// The agent binary could not be started
    #[error("Failed to run '{command}': {source}")]
    Spawn {
        /// The command line that was attempted
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Talking to the started agent failed (e.g., it closed stdin early)
    #[error("I/O with '{command}' failed: {source}")]
    Io {
        /// The command line that was running
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The agent ran but exited unsuccessfully
    #[error("'{command}' exited with status {status}: {stderr}")]
    CommandFailed {
        /// The command line that failed
        command: String,
        /// Exit code, or -1 when terminated by a signal
        status: i32,
        /// Trimmed standard error output
        stderr: String,
    },
}

impl AgentError {
    /// Check if the agent binary itself could not be run
    pub fn is_spawn_failure(&self) -> bool {
        matches!(self, Self::Spawn { .. })
    }
}
