//! Pipeline upload command

use crate::AgentClient;
use crate::error::Result;
use tracing::info;

impl AgentClient {
    // =============================================================================
    // Pipeline Upload
    // =============================================================================

    /// Upload a pipeline definition to the running build
    ///
    /// The definition is written to the agent's standard input.
    ///
    /// # Arguments
    /// * `definition` - Serialized pipeline (YAML)
    ///
    /// # Returns
    /// Whatever the agent printed on stdout
    pub async fn upload_pipeline(&self, definition: &str) -> Result<String> {
        info!("Uploading pipeline ({} bytes)", definition.len());

        self.run(&["pipeline", "upload"], Some(definition)).await
    }
}
