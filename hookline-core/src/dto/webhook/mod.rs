//! Linear webhook payload
//!
//! Only the fields Hookline reads are modelled; anything else in the payload
//! is ignored. Optional fields default so that a partially populated payload
//! still deserializes, and semantic checks happen in
//! [`crate::WebhookEvent::parse`].

use serde::Deserialize;
use serde::de::Error as _;
use serde_json::Value;

/// Top-level webhook body as delivered by Linear
#[derive(Debug, Clone, Deserialize)]
pub struct LinearWebhookPayload {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub data: Option<IssueData>,
}

impl LinearWebhookPayload {
    /// Parses a payload, requiring every structured field to be a JSON object
    ///
    /// Derived struct deserializers also accept arrays in field order; the
    /// webhook format never uses that form, so it is rejected here.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        expect_object(&value, "payload")?;

        if let Some(data) = present(&value, "data") {
            expect_object(data, "data")?;

            if let Some(state) = present(data, "state") {
                expect_object(state, "data.state")?;
            }
            if let Some(Value::Array(labels)) = present(data, "labels") {
                for label in labels {
                    expect_object(label, "data.labels[]")?;
                }
            }
        }

        serde_json::from_value(value)
    }
}

/// A field that exists and is not `null`
fn present<'v>(value: &'v Value, key: &str) -> Option<&'v Value> {
    value.get(key).filter(|field| !field.is_null())
}

fn expect_object(value: &Value, path: &str) -> serde_json::Result<()> {
    if value.is_object() {
        Ok(())
    } else {
        Err(serde_json::Error::custom(format!(
            "expected {} to be an object",
            path
        )))
    }
}

/// The `data` object of an issue event
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueData {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub state: Option<IssueState>,
    #[serde(default)]
    pub labels: Option<Vec<LabelData>>,
}

/// Workflow state of the issue
#[derive(Debug, Clone, Deserialize)]
pub struct IssueState {
    pub name: String,
}

/// A label attached to the issue
#[derive(Debug, Clone, Deserialize)]
pub struct LabelData {
    #[serde(default)]
    pub id: String,
    pub name: String,
}
