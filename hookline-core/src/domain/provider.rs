//! Capability provider selection

use serde::{Deserialize, Serialize};

/// Backend that performs the issue analysis inside the generated step
///
/// Adding a provider means adding a variant here and a command sequence in
/// the generator; the compiler points at every place that must handle it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelProvider {
    Anthropic,
    /// No provider configured, or one without an implementation
    Unsupported { requested: Option<String> },
}

impl ModelProvider {
    /// Names of providers that have a working command sequence
    pub const SUPPORTED: &'static [&'static str] = &["anthropic"];

    /// Resolves the `MODEL_PROVIDER` setting
    ///
    /// Matching is exact and case-sensitive. An empty value counts as unset.
    pub fn resolve(value: Option<&str>) -> Self {
        match value {
            Some("anthropic") => ModelProvider::Anthropic,
            Some("") | None => ModelProvider::Unsupported { requested: None },
            Some(other) => ModelProvider::Unsupported {
                requested: Some(other.to_string()),
            },
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, ModelProvider::Unsupported { .. })
    }
}

impl std::fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelProvider::Anthropic => write!(f, "anthropic"),
            ModelProvider::Unsupported { requested: None } => write!(f, "<unset>"),
            ModelProvider::Unsupported {
                requested: Some(name),
            } => write!(f, "{} (unsupported)", name),
        }
    }
}
