//! Build metadata commands

use crate::AgentClient;
use crate::error::Result;
use tracing::debug;

impl AgentClient {
    // =============================================================================
    // Build Metadata
    // =============================================================================

    /// Read a build metadata value
    ///
    /// Passes an empty `--default`, so a key that was never set comes back as
    /// an empty string rather than a failed command.
    ///
    /// # Arguments
    /// * `key` - The metadata key (e.g., "buildkite:webhook")
    pub async fn get_meta_data(&self, key: &str) -> Result<String> {
        let value = self
            .run(&["meta-data", "get", "--default", "", key], None)
            .await?;

        debug!("Read {} byte(s) of metadata for {}", value.len(), key);
        Ok(value)
    }

    /// Write a build metadata value
    ///
    /// # Arguments
    /// * `key` - The metadata key
    /// * `value` - The value to store
    pub async fn set_meta_data(&self, key: &str, value: &str) -> Result<()> {
        self.run(&["meta-data", "set", key, value], None).await?;

        debug!("Set metadata {}={}", key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{AgentClient, AgentError};

    #[tokio::test]
    async fn test_get_meta_data_arguments() {
        // echo prints its arguments, which shows the exact command line
        let client = AgentClient::new("echo");
        let output = client.get_meta_data("buildkite:webhook").await.unwrap();

        assert_eq!(output, "meta-data get --default  buildkite:webhook\n");
    }

    #[tokio::test]
    async fn test_set_meta_data_failure() {
        let client = AgentClient::new("false");
        let err = client
            .set_meta_data("webhook:action", "create")
            .await
            .unwrap_err();

        assert!(matches!(err, AgentError::CommandFailed { .. }));
        assert!(err.to_string().contains("meta-data set webhook:action create"));
    }
}
