#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

// Dev-dependencies used only by unit tests
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tokio as _;

pub mod domain;
pub mod ports;
pub mod prompt;

// Re-export commonly used types for convenience
pub use domain::{
    ContentPart, GenerateOptions, GeneratedResult, IncomingMessage, IncomingRequest,
    MessageContent, MessageRole, PromptRequest,
};
pub use ports::{GenerateError, TextGenerationPort};
pub use prompt::normalize;
