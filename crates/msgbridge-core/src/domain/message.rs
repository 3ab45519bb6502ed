//! Inbound Messages-API request types.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role of a single conversation turn.
///
/// Only the exact string `"assistant"` maps to [`MessageRole::Assistant`].
/// Any other string, including an empty one or a differently-cased
/// `"Assistant"`, deserializes to [`MessageRole::Other`] and is treated as a
/// user turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    #[serde(other)]
    Other,
}

impl MessageRole {
    /// Label written in front of the turn in the flattened prompt.
    #[must_use]
    pub const fn prompt_label(self) -> &'static str {
        match self {
            Self::Assistant => "Model",
            Self::User | Self::Other => "User",
        }
    }
}

/// One element of an array-form message content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPart {
    /// Block type, e.g. `"text"` or `"image"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Text payload; present for `"text"` blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Message content, either a plain string or an array of content blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl Default for MessageContent {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl MessageContent {
    /// Flatten the content into plain text.
    ///
    /// Text blocks are joined with `'\n'`; non-text blocks are dropped
    /// because the backend only accepts text.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Parts(parts) => {
                let texts: Vec<&str> = parts
                    .iter()
                    .filter(|p| p.kind == "text")
                    .filter_map(|p| p.text.as_deref())
                    .collect();
                match texts.as_slice() {
                    [single] => Cow::Borrowed(single),
                    _ => Cow::Owned(texts.join("\n")),
                }
            }
        }
    }

    /// True when the flattened text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_text().is_empty()
    }
}

/// A single conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub role: MessageRole,
    #[serde(default)]
    pub content: MessageContent,
}

impl IncomingMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: MessageContent::Text(content.into()),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: MessageContent::Text(content.into()),
        }
    }
}

/// Request body of `POST /v1/messages`.
///
/// `model` is echoed back verbatim and never checked against a catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomingRequest {
    #[serde(default)]
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<MessageContent>,
    #[serde(default)]
    pub messages: Vec<IncomingMessage>,
    #[serde(default)]
    pub stream: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}
