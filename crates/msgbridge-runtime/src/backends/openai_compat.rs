//! OpenAI-compatible chat-completions backend.
//!
//! Sends the flattened prompt as one user message with `stream: false` and
//! returns `choices[0].message.content`.

use std::time::Duration;

use async_trait::async_trait;
use msgbridge_core::{GenerateError, GeneratedResult, PromptRequest, TextGenerationPort};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Connection settings for an OpenAI-compatible server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiCompatConfig {
    /// Server root, e.g. `http://127.0.0.1:8080`. `/v1/chat/completions` is appended.
    pub base_url: String,
    /// Model sent upstream when the request options do not name one.
    pub model: Option<String>,
    /// Sent as a bearer token when present.
    pub api_key: Option<String>,
    /// Upper bound on one generation call.
    pub timeout: Duration,
}

impl Default for OpenAiCompatConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            model: None,
            api_key: None,
            timeout: Duration::from_secs(300),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: [ChatMessage<'a>; 1],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Backend adapter for any server speaking the OpenAI chat-completions API.
#[derive(Debug, Clone)]
pub struct OpenAiCompatBackend {
    client: Client,
    endpoint: String,
    config: OpenAiCompatConfig,
}

impl OpenAiCompatBackend {
    /// Build the adapter and its pooled HTTP client.
    pub fn new(config: OpenAiCompatConfig) -> Result<Self, GenerateError> {
        let client = Client::builder()
            .pool_max_idle_per_host(10)
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerateError::Internal(format!("Failed to build HTTP client: {e}")))?;

        let endpoint = format!(
            "{}/v1/chat/completions",
            config.base_url.trim_end_matches('/')
        );

        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_body<'a>(&'a self, request: &'a PromptRequest) -> ChatRequest<'a> {
        let model = request
            .options
            .model
            .as_deref()
            .or(self.config.model.as_deref());

        ChatRequest {
            model,
            messages: [ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            stream: false,
            max_tokens: request.options.max_tokens,
            temperature: request.options.temperature,
        }
    }
}

#[async_trait]
impl TextGenerationPort for OpenAiCompatBackend {
    async fn generate(&self, request: &PromptRequest) -> Result<GeneratedResult, GenerateError> {
        debug!("Forwarding to {}", self.endpoint);

        let mut req_builder = self.client.post(&self.endpoint).json(&self.build_body(request));
        if let Some(key) = self.config.api_key.as_deref() {
            req_builder = req_builder.bearer_auth(key);
        }

        let response = req_builder.send().await.map_err(|e| {
            error!("Failed to connect to backend: {e}");
            GenerateError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let err_bytes = response.bytes().await.unwrap_or_default();
            let message = String::from_utf8_lossy(&err_bytes).trim().to_string();
            error!("Upstream error {status}: {message}");
            return Err(GenerateError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            error!("Failed to read backend response: {e}");
            GenerateError::Transport(e.to_string())
        })?;

        let parsed: ChatResponse = serde_json::from_slice(&bytes).map_err(|e| {
            error!("Failed to parse backend JSON: {e}");
            GenerateError::InvalidResponse(e.to_string())
        })?;

        let message = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GenerateError::InvalidResponse("response has no choices".to_string()))?
            .message;

        Ok(GeneratedResult::new(message.content.unwrap_or_default()))
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msgbridge_core::GenerateOptions;

    fn backend(model: Option<&str>) -> OpenAiCompatBackend {
        OpenAiCompatBackend::new(OpenAiCompatConfig {
            base_url: "http://127.0.0.1:9/".to_string(),
            model: model.map(str::to_string),
            ..OpenAiCompatConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        assert_eq!(
            backend(None).endpoint(),
            "http://127.0.0.1:9/v1/chat/completions"
        );
    }

    #[test]
    fn test_body_uses_configured_model_and_options() {
        let backend = backend(Some("qwen2.5"));
        let request = PromptRequest {
            prompt: "User: hi\n".to_string(),
            options: GenerateOptions {
                max_tokens: Some(64),
                ..GenerateOptions::default()
            },
        };
        let body = serde_json::to_value(backend.build_body(&request)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "model": "qwen2.5",
                "messages": [{"role": "user", "content": "User: hi\n"}],
                "stream": false,
                "max_tokens": 64
            })
        );
    }

    #[test]
    fn test_request_model_overrides_config() {
        let backend = backend(Some("configured"));
        let request = PromptRequest {
            prompt: String::new(),
            options: GenerateOptions {
                model: Some("override".to_string()),
                ..GenerateOptions::default()
            },
        };
        let body = serde_json::to_value(backend.build_body(&request)).unwrap();
        assert_eq!(body["model"], "override");
    }

    #[test]
    fn test_body_omits_unset_fields() {
        let body = serde_json::to_value(backend(None).build_body(&PromptRequest::default())).unwrap();
        assert!(body.get("model").is_none());
        assert!(body.get("temperature").is_none());
        assert!(body.get("max_tokens").is_none());
    }
}
