//! Trigger policy
//!
//! Decides whether a validated event should produce a pipeline. Events are
//! gated on a single configured label; without one nothing ever triggers.

use crate::domain::event::WebhookEvent;

/// Label-gating policy, usually built from `TRIGGER_ON_LABEL`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerPolicy {
    trigger_label: Option<String>,
}

/// Result of evaluating a [`TriggerPolicy`] against an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerDecision {
    /// The event carries the trigger label
    Triggered { label: String },
    /// The action is neither create nor update
    IgnoredAction,
    /// No trigger label is configured
    NoPolicy,
    /// A label is configured but the event does not carry it
    LabelMissing { label: String },
}

impl TriggerDecision {
    pub fn is_triggered(&self) -> bool {
        matches!(self, TriggerDecision::Triggered { .. })
    }
}

impl std::fmt::Display for TriggerDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriggerDecision::Triggered { label } => write!(f, "Issue has '{}' label", label),
            TriggerDecision::IgnoredAction => write!(f, "Action is neither create nor update"),
            TriggerDecision::NoPolicy => write!(f, "No trigger label configured"),
            TriggerDecision::LabelMissing { label } => {
                write!(f, "Issue missing '{}' label", label)
            }
        }
    }
}

impl TriggerPolicy {
    /// Creates a policy. An empty label is the same as no label.
    pub fn new(trigger_label: Option<String>) -> Self {
        Self {
            trigger_label: trigger_label.filter(|label| !label.is_empty()),
        }
    }

    pub fn trigger_label(&self) -> Option<&str> {
        self.trigger_label.as_deref()
    }

    /// Evaluates the policy. Label comparison is exact and case-sensitive.
    pub fn evaluate(&self, event: &WebhookEvent) -> TriggerDecision {
        if !event.action.is_triggering() {
            return TriggerDecision::IgnoredAction;
        }

        match &self.trigger_label {
            None => TriggerDecision::NoPolicy,
            Some(label) if event.has_label(label) => TriggerDecision::Triggered {
                label: label.clone(),
            },
            Some(label) => TriggerDecision::LabelMissing {
                label: label.clone(),
            },
        }
    }

    pub fn should_trigger(&self, event: &WebhookEvent) -> bool {
        self.evaluate(event).is_triggered()
    }
}
