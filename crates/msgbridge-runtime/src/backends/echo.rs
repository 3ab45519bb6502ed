use async_trait::async_trait;
use msgbridge_core::{GenerateError, GeneratedResult, PromptRequest, TextGenerationPort};
use tracing::debug;

/// Backend that returns its prompt as the completion.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoBackend;

#[async_trait]
impl TextGenerationPort for EchoBackend {
    async fn generate(&self, request: &PromptRequest) -> Result<GeneratedResult, GenerateError> {
        debug!(bytes = request.prompt.len(), "Echoing prompt");
        Ok(GeneratedResult::new(request.prompt.clone()))
    }

    fn name(&self) -> &str {
        "echo"
    }
}
