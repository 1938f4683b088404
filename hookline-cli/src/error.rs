//! Errors that abort webhook handling

use hookline_agent::AgentError;
use hookline_core::ValidationError;
use thiserror::Error;

/// Fatal errors of a handled run. Every variant ends the process with status 1.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The stored payload failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A call to the agent CLI failed
    #[error("Agent call failed: {0}")]
    Agent(#[from] AgentError),

    /// The generated pipeline could not be rendered
    #[error("Failed to serialize pipeline: {0}")]
    Serialize(#[from] serde_yaml::Error),
}
