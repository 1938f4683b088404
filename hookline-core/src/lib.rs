//! Hookline Core
//!
//! Core types and decision logic for the Hookline webhook pipeline generator.
//!
//! This crate contains:
//! - DTOs: the wire shape of the issue-tracker webhook payload
//! - Domain types: the validated event, capability provider and pipeline definition
//! - Trigger policy: label gating for incoming events
//! - Generator: deterministic construction of the agent pipeline
//!
//! Nothing in here performs I/O. Talking to the CI agent lives in `hookline-agent`.

pub mod domain;
pub mod dto;
pub mod error;
pub mod generator;
pub mod trigger;

pub use domain::event::{IssueLabel, WebhookAction, WebhookEvent};
pub use domain::pipeline::{ContainerSpec, PipelineDefinition, Step, StepPlugins};
pub use domain::provider::ModelProvider;
pub use error::ValidationError;
pub use generator::generate;
pub use trigger::{TriggerDecision, TriggerPolicy};
