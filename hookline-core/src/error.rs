//! Error types for webhook payload validation

use thiserror::Error;

/// Reasons a stored webhook payload cannot be turned into a [`crate::WebhookEvent`]
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The metadata store held no payload (absent key or empty value)
    #[error("No webhook payload found")]
    NoPayload,

    /// The payload is not JSON, or its fields have the wrong types
    #[error("Malformed webhook payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The payload has no `action`, or it is an empty string
    #[error("Could not determine webhook action")]
    MissingAction,

    /// A create/update payload without an issue id
    #[error("Could not extract issue ID from webhook payload")]
    MissingIssueId,
}
