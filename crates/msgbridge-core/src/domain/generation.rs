//! Types exchanged with a text-generation backend.

use serde::{Deserialize, Serialize};

/// Backend tuning knobs.
///
/// Every field is optional; `GenerateOptions::default()` means "let the
/// backend decide". New knobs are added as fields so callers of
/// [`crate::normalize`] never change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Backend model override. Never set from the inbound request; the
    /// front-protocol model name is echoed, not forwarded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl GenerateOptions {
    /// True when no option is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.model.is_none() && self.max_tokens.is_none() && self.temperature.is_none()
    }
}

/// A flattened prompt together with its backend options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
    #[serde(default)]
    pub options: GenerateOptions,
}

/// Completed text returned by a backend. Treated as final and opaque.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedResult {
    pub text: String,
}

impl GeneratedResult {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
