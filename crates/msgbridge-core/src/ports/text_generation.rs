//! Text generation port.
//!
//! The backend exposes exactly one operation: turn a complete prompt into
//! complete text. It has no incremental API, so any streaming seen by
//! clients is produced after this call has returned.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::domain::{GeneratedResult, PromptRequest};

/// Errors a backend can report.
///
/// The `Display` text is forwarded to clients verbatim as the `api_error`
/// message, so variants keep their wording plain.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The backend could not be reached.
    #[error("Failed to reach backend: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("Backend returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The backend answered but the body could not be understood.
    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    /// Anything else.
    #[error("{0}")]
    Internal(String),
}

/// Port for the single-shot text generation backend.
///
/// Implementations must be safe to call concurrently; any pooling or rate
/// limiting is their own concern. Callers invoke `generate` at most once
/// per inbound request and never retry.
#[async_trait]
pub trait TextGenerationPort: Send + Sync + fmt::Debug {
    /// Generate the full completion for `request`.
    async fn generate(&self, request: &PromptRequest) -> Result<GeneratedResult, GenerateError>;

    /// Short backend name for logs.
    fn name(&self) -> &str;
}
