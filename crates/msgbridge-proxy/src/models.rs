//! Messages-API wire models.
//!
//! Every payload the proxy writes is a typed struct or enum here; nothing is
//! built from ad-hoc JSON maps. Streaming events are one sum type so the
//! emitter's state machine is checked for exhaustiveness.

use msgbridge_core::MessageRole;
use serde::{Deserialize, Serialize};

// =============================================================================
// Message Types
// =============================================================================

/// Why generation ended. Only natural end of turn is modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
}

/// One unit of response content. Always text here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// Approximate token counts.
///
/// These are estimates, not tokenizer output: callers may only rely on them
/// being non-negative. Swapping in a real tokenizer means changing the two
/// constructors below and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEstimate {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl UsageEstimate {
    /// Fixed input estimate reported for completed messages.
    pub const INPUT_PLACEHOLDER: u32 = 15;

    /// Rough bytes-per-token ratio used for the output estimate.
    pub const BYTES_PER_TOKEN: usize = 4;

    /// Placeholder carried by `message_start`, before any text exists.
    #[must_use]
    pub const fn message_start_placeholder() -> Self {
        Self {
            input_tokens: 10,
            output_tokens: 1,
        }
    }

    /// Estimate for a finished completion.
    #[must_use]
    pub fn for_completion(text: &str) -> Self {
        let output = text.len() / Self::BYTES_PER_TOKEN;
        Self {
            input_tokens: Self::INPUT_PLACEHOLDER,
            output_tokens: u32::try_from(output).unwrap_or(u32::MAX),
        }
    }
}

/// A complete assistant message (non-streaming response body).
///
/// Also used as the stub inside `message_start`, where `content` is empty
/// and `stop_reason` is `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    /// Always `"message"`.
    pub r#type: String,
    pub role: MessageRole,
    pub model: String,
    pub content: Vec<ContentBlock>,
    pub stop_reason: Option<StopReason>,
    pub usage: UsageEstimate,
}

impl MessageResponse {
    /// A finished single-block assistant message.
    pub fn completed(id: String, model: String, text: String) -> Self {
        let usage = UsageEstimate::for_completion(&text);
        Self {
            id,
            r#type: "message".to_string(),
            role: MessageRole::Assistant,
            model,
            content: vec![ContentBlock::text(text)],
            stop_reason: Some(StopReason::EndTurn),
            usage,
        }
    }

    /// The empty message announced by `message_start`.
    pub fn stub(id: String, model: String) -> Self {
        Self {
            id,
            r#type: "message".to_string(),
            role: MessageRole::Assistant,
            model,
            content: Vec::new(),
            stop_reason: None,
            usage: UsageEstimate::message_start_placeholder(),
        }
    }
}

// =============================================================================
// Streaming Types
// =============================================================================

/// Incremental content inside `content_block_delta`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentDelta {
    TextDelta { text: String },
}

/// One server-sent event. The serde tag doubles as the SSE event name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    MessageStart {
        message: MessageResponse,
    },
    ContentBlockStart {
        index: u32,
        content_block: ContentBlock,
    },
    ContentBlockDelta {
        index: u32,
        delta: ContentDelta,
    },
    ContentBlockStop {
        index: u32,
    },
    MessageStop {
        stop_reason: StopReason,
    },
    Error {
        error: ErrorDetail,
    },
}

impl StreamEvent {
    /// SSE `event:` name for this payload.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::MessageStart { .. } => "message_start",
            Self::ContentBlockStart { .. } => "content_block_start",
            Self::ContentBlockDelta { .. } => "content_block_delta",
            Self::ContentBlockStop { .. } => "content_block_stop",
            Self::MessageStop { .. } => "message_stop",
            Self::Error { .. } => "error",
        }
    }

    /// Text carried by a `content_block_delta`, if this is one.
    #[must_use]
    pub fn delta_text(&self) -> Option<&str> {
        match self {
            Self::ContentBlockDelta {
                delta: ContentDelta::TextDelta { text },
                ..
            } => Some(text),
            _ => None,
        }
    }
}

// =============================================================================
// Models Endpoint Types
// =============================================================================

/// Response from the `/v1/models` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ModelsResponse {
    pub data: Vec<ModelInfo>,
    pub has_more: bool,
    pub first_id: Option<String>,
    pub last_id: Option<String>,
}

impl ModelsResponse {
    /// The fixed catalog advertised to clients, stamped with `created_at`.
    pub fn static_catalog(created_at: i64) -> Self {
        let data = vec![
            ModelInfo::new("claude-3-5-sonnet-20240620", "Claude 3.5 Sonnet", created_at),
            ModelInfo::new("claude-3-opus-20240229", "Claude 3 Opus", created_at),
        ];
        Self {
            first_id: data.first().map(|m| m.id.clone()),
            last_id: data.last().map(|m| m.id.clone()),
            has_more: false,
            data,
        }
    }
}

/// Information about a single model.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub id: String,
    pub r#type: String,
    pub created_at: i64,
    pub display_name: String,
}

impl ModelInfo {
    fn new(id: &str, display_name: &str, created_at: i64) -> Self {
        Self {
            id: id.to_string(),
            r#type: "model".to_string(),
            created_at,
            display_name: display_name.to_string(),
        }
    }
}

// =============================================================================
// Error Response Types
// =============================================================================

/// Front-protocol error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidRequestError,
    ApiError,
}

/// Inner error object, shared by error bodies and `error` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub r#type: ErrorKind,
    pub message: String,
}

impl ErrorDetail {
    pub fn api_error(message: impl Into<String>) -> Self {
        Self {
            r#type: ErrorKind::ApiError,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            r#type: ErrorKind::InvalidRequestError,
            message: message.into(),
        }
    }
}

/// Error response body: `{"type":"error","error":{...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `"error"`.
    pub r#type: String,
    pub error: ErrorDetail,
}

impl From<ErrorDetail> for ErrorResponse {
    fn from(error: ErrorDetail) -> Self {
        Self {
            r#type: "error".to_string(),
            error,
        }
    }
}
