//! Domain types for msgbridge.
//!
//! These types describe a request after it has been parsed off the wire and
//! the result a backend hands back. They carry no HTTP or transport detail.

mod generation;
mod message;

pub use generation::{GenerateOptions, GeneratedResult, PromptRequest};
pub use message::{ContentPart, IncomingMessage, IncomingRequest, MessageContent, MessageRole};
