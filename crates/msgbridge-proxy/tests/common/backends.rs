//! Fake text generation backends for route tests.

use std::sync::Mutex;

use async_trait::async_trait;
use msgbridge_core::{GenerateError, GeneratedResult, PromptRequest, TextGenerationPort};

/// Backend that returns a canned reply and records every prompt it sees.
#[derive(Debug)]
pub struct ScriptedBackend {
    reply: Result<String, String>,
    prompts: Mutex<Vec<PromptRequest>>,
}

impl ScriptedBackend {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<PromptRequest> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerationPort for ScriptedBackend {
    async fn generate(&self, request: &PromptRequest) -> Result<GeneratedResult, GenerateError> {
        self.prompts.lock().unwrap().push(request.clone());
        self.reply
            .clone()
            .map(GeneratedResult::new)
            .map_err(GenerateError::Internal)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
