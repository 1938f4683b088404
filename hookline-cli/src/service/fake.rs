//! In-memory agent used by service tests

use async_trait::async_trait;
use hookline_agent::{Agent, AgentError, Result};
use std::sync::Mutex;

/// A recorded call against [`FakeAgent`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentCall {
    Get(String),
    Set(String, String),
    Upload(String),
}

/// Agent stand-in that serves a fixed payload and records every call
#[derive(Debug, Default)]
pub struct FakeAgent {
    payload: String,
    fail_get: bool,
    fail_set: bool,
    fail_upload: bool,
    calls: Mutex<Vec<AgentCall>>,
}

impl FakeAgent {
    pub fn with_payload(payload: &str) -> Self {
        Self {
            payload: payload.to_string(),
            ..Self::default()
        }
    }

    pub fn failing_get(mut self) -> Self {
        self.fail_get = true;
        self
    }

    pub fn failing_set(mut self) -> Self {
        self.fail_set = true;
        self
    }

    pub fn failing_upload(mut self) -> Self {
        self.fail_upload = true;
        self
    }

    pub fn calls(&self) -> Vec<AgentCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Pipelines passed to `pipeline_upload`, in order
    pub fn uploads(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                AgentCall::Upload(definition) => Some(definition),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: AgentCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn failure(command: &str) -> AgentError {
        AgentError::CommandFailed {
            command: command.to_string(),
            status: 1,
            stderr: "fake failure".to_string(),
        }
    }
}

#[async_trait]
impl Agent for FakeAgent {
    async fn meta_data_get(&self, key: &str) -> Result<String> {
        self.record(AgentCall::Get(key.to_string()));
        if self.fail_get {
            return Err(Self::failure("meta-data get"));
        }
        Ok(self.payload.clone())
    }

    async fn meta_data_set(&self, key: &str, value: &str) -> Result<()> {
        self.record(AgentCall::Set(key.to_string(), value.to_string()));
        if self.fail_set {
            return Err(Self::failure("meta-data set"));
        }
        Ok(())
    }

    async fn pipeline_upload(&self, definition: &str) -> Result<String> {
        self.record(AgentCall::Upload(definition.to_string()));
        if self.fail_upload {
            return Err(Self::failure("pipeline upload"));
        }
        Ok("Successfully uploaded and parsed pipeline config\n".to_string())
    }
}
