//! Webhook event domain types

use serde::{Deserialize, Serialize};

use crate::dto::webhook::LinearWebhookPayload;
use crate::error::ValidationError;

/// What happened to the issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WebhookAction {
    Create,
    Update,
    /// Any other action reported by the tracker, kept verbatim for logging
    Other(String),
}

impl WebhookAction {
    /// Classifies a raw action string. Matching is exact.
    pub fn from_raw(action: &str) -> Self {
        match action {
            "create" => WebhookAction::Create,
            "update" => WebhookAction::Update,
            other => WebhookAction::Other(other.to_string()),
        }
    }

    /// Whether this action can lead to pipeline generation at all
    pub fn is_triggering(&self) -> bool {
        matches!(self, WebhookAction::Create | WebhookAction::Update)
    }

    /// The action as it appeared on the wire
    pub fn as_str(&self) -> &str {
        match self {
            WebhookAction::Create => "create",
            WebhookAction::Update => "update",
            WebhookAction::Other(other) => other,
        }
    }
}

impl std::fmt::Display for WebhookAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A label attached to an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueLabel {
    pub id: String,
    pub name: String,
}

/// Normalized issue-tracker event
///
/// Only constructed through [`WebhookEvent::parse`], so a create/update event
/// always carries a non-empty `issue_id`. For other actions the issue fields
/// may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub action: WebhookAction,
    pub issue_id: String,
    pub title: String,
    pub description: String,
    pub state_name: String,
    pub labels: Vec<IssueLabel>,
}

impl WebhookEvent {
    /// Validates a raw webhook payload and normalizes it into an event
    ///
    /// # Arguments
    /// * `raw` - The payload text as stored by the CI agent
    ///
    /// # Errors
    /// Returns an error if:
    /// - The payload is empty or whitespace ([`ValidationError::NoPayload`])
    /// - It is not JSON of the expected shape ([`ValidationError::Malformed`])
    /// - `action` is absent or empty ([`ValidationError::MissingAction`])
    /// - A create/update event has no issue id ([`ValidationError::MissingIssueId`])
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::NoPayload);
        }

        let payload = LinearWebhookPayload::from_json(raw)?;

        let action = match payload.action.as_deref() {
            Some(action) if !action.is_empty() => WebhookAction::from_raw(action),
            _ => return Err(ValidationError::MissingAction),
        };

        let data = payload.data.unwrap_or_default();
        let issue_id = data.id.unwrap_or_default();

        if action.is_triggering() && issue_id.is_empty() {
            return Err(ValidationError::MissingIssueId);
        }

        let labels = data
            .labels
            .unwrap_or_default()
            .into_iter()
            .map(|label| IssueLabel {
                id: label.id,
                name: label.name,
            })
            .collect();

        Ok(Self {
            action,
            issue_id,
            title: data.title.unwrap_or_default(),
            description: data.description.unwrap_or_default(),
            state_name: data.state.map(|state| state.name).unwrap_or_default(),
            labels,
        })
    }

    /// Label names in payload order
    pub fn label_names(&self) -> Vec<&str> {
        self.labels.iter().map(|label| label.name.as_str()).collect()
    }

    /// Whether a label with exactly this name is attached
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAYLOAD: &str = r#"{
        "action": "create",
        "data": {
            "id": "ISSUE-1",
            "title": "Fix the flaky test",
            "description": "It fails on Tuesdays",
            "state": { "name": "Todo" },
            "labels": [
                { "id": "1", "name": "agent-ready" },
                { "id": "2", "name": "bug" }
            ]
        }
    }"#;

    #[test]
    fn test_parse_full_payload() {
        let event = WebhookEvent::parse(FULL_PAYLOAD).unwrap();

        assert_eq!(event.action, WebhookAction::Create);
        assert_eq!(event.issue_id, "ISSUE-1");
        assert_eq!(event.title, "Fix the flaky test");
        assert_eq!(event.description, "It fails on Tuesdays");
        assert_eq!(event.state_name, "Todo");
        assert_eq!(event.label_names(), vec!["agent-ready", "bug"]);
    }

    #[test]
    fn test_parse_trims_surrounding_whitespace() {
        let raw = format!("\n  {}\n\n", FULL_PAYLOAD);
        assert!(WebhookEvent::parse(&raw).is_ok());
    }

    #[test]
    fn test_parse_empty_payload() {
        assert!(matches!(
            WebhookEvent::parse(""),
            Err(ValidationError::NoPayload)
        ));
        assert!(matches!(
            WebhookEvent::parse("  \n"),
            Err(ValidationError::NoPayload)
        ));
    }

    #[test]
    fn test_parse_malformed_payload() {
        for raw in [
            "{not json",
            "42",
            "[]",
            r#""create""#,
            r#"{"action": 5, "data": {}}"#,
            r#"["create", {"id": "ISSUE-1", "labels": [["1", "agent-ready"]]}]"#,
            r#"{"action": "create", "data": {"id": "ISSUE-1", "labels": [["1", "agent-ready"]]}}"#,
        ] {
            assert!(
                matches!(WebhookEvent::parse(raw), Err(ValidationError::Malformed(_))),
                "expected malformed for {}",
                raw
            );
        }
    }

    #[test]
    fn test_parse_missing_or_empty_action() {
        let missing = r#"{ "data": { "id": "ISSUE-1" } }"#;
        let empty = r#"{ "action": "", "data": { "id": "ISSUE-1" } }"#;
        let null = r#"{ "action": null, "data": { "id": "ISSUE-1" } }"#;

        for raw in [missing, empty, null] {
            assert!(matches!(
                WebhookEvent::parse(raw),
                Err(ValidationError::MissingAction)
            ));
        }
    }

    #[test]
    fn test_parse_missing_issue_id() {
        let empty_id = r#"{ "action": "update", "data": { "id": "" } }"#;
        let no_id = r#"{ "action": "create", "data": { "title": "x" } }"#;
        let no_data = r#"{ "action": "create" }"#;

        for raw in [empty_id, no_id, no_data] {
            assert!(matches!(
                WebhookEvent::parse(raw),
                Err(ValidationError::MissingIssueId)
            ));
        }
    }

    #[test]
    fn test_parse_other_action_without_data() {
        let event = WebhookEvent::parse(r#"{ "action": "remove" }"#).unwrap();

        assert_eq!(event.action, WebhookAction::Other("remove".to_string()));
        assert!(!event.action.is_triggering());
        assert!(event.issue_id.is_empty());
        assert!(event.labels.is_empty());
    }

    #[test]
    fn test_parse_defaults_optional_fields() {
        let event = WebhookEvent::parse(r#"{ "action": "update", "data": { "id": "abc" } }"#).unwrap();

        assert_eq!(event.title, "");
        assert_eq!(event.description, "");
        assert_eq!(event.state_name, "");
        assert!(event.labels.is_empty());
    }

    #[test]
    fn test_action_classification_is_exact() {
        assert_eq!(WebhookAction::from_raw("create"), WebhookAction::Create);
        assert_eq!(WebhookAction::from_raw("update"), WebhookAction::Update);
        assert_eq!(
            WebhookAction::from_raw("Create"),
            WebhookAction::Other("Create".to_string())
        );
        assert_eq!(WebhookAction::from_raw("remove").to_string(), "remove");
    }

    #[test]
    fn test_has_label_is_case_sensitive() {
        let event = WebhookEvent::parse(FULL_PAYLOAD).unwrap();

        assert!(event.has_label("agent-ready"));
        assert!(!event.has_label("Agent-Ready"));
        assert!(!event.has_label("agent"));
    }
}
