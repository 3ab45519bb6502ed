//! Request normalization: flatten a multi-turn request into one prompt.
//!
//! The backend only understands a single block of text, so the system
//! instruction and every turn are rendered as labelled lines:
//!
//! ```text
//! System: Be terse
//!
//! User: Hi
//! Model: Hello
//! ```

use crate::domain::{GenerateOptions, IncomingRequest, PromptRequest};

/// Flatten `request` into a prompt string and backend options.
///
/// Turns are written in order with no reordering, deduplication, or
/// truncation. This never fails: an empty request yields an empty prompt.
///
/// `max_tokens` and `temperature` are carried into the options when the
/// client set them; the backend model is left to the adapter.
#[must_use]
pub fn normalize(request: &IncomingRequest) -> PromptRequest {
    let mut prompt = String::new();

    if let Some(system) = request.system.as_ref() {
        let system = system.as_text();
        if !system.is_empty() {
            prompt.push_str("System: ");
            prompt.push_str(&system);
            prompt.push_str("\n\n");
        }
    }

    for message in &request.messages {
        prompt.push_str(message.role.prompt_label());
        prompt.push_str(": ");
        prompt.push_str(&message.content.as_text());
        prompt.push('\n');
    }

    PromptRequest {
        prompt,
        options: GenerateOptions {
            model: None,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        },
    }
}
