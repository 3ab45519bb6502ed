//! Axum HTTP server for the Messages-API front end.
//!
//! This module provides the `serve()` function that runs the proxy server
//! using a pre-bound `TcpListener`, plus `create_router()` for tests.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{State, rejection::BytesRejection},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bytes::Bytes;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use msgbridge_core::{IncomingRequest, TextGenerationPort, normalize};

use crate::emitter::{emit_once, new_message_id};
use crate::error::ApiError;
use crate::models::ModelsResponse;
use crate::sse::{StreamJob, event_stream_response, simulated_stream};

/// Default pause between simulated deltas.
pub const DEFAULT_CHUNK_DELAY: Duration = Duration::from_millis(20);

/// Configuration for running the proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Host to bind to (e.g., "127.0.0.1" or "0.0.0.0").
    pub host: String,
    /// Port to bind to (0 for auto-assign).
    pub port: u16,
    /// Pause after each simulated delta.
    pub chunk_delay: Duration,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
            chunk_delay: DEFAULT_CHUNK_DELAY,
        }
    }
}

impl ProxyConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Shared application state for the proxy server.
///
/// Read-only after construction; requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    /// The single-shot generation backend.
    backend: Arc<dyn TextGenerationPort>,
    /// Pause after each simulated delta.
    chunk_delay: Duration,
}

impl AppState {
    pub fn new(backend: Arc<dyn TextGenerationPort>, chunk_delay: Duration) -> Self {
        Self {
            backend,
            chunk_delay,
        }
    }
}

/// Build the router with all proxy routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/models", get(list_models))
        .route("/v1/messages", post(create_message))
        .with_state(state)
}

/// Start the proxy server with a pre-bound listener.
///
/// Runs until the cancellation token is triggered, then drains in-flight
/// requests.
///
/// # Arguments
///
/// * `listener` - Pre-bound TCP listener
/// * `backend` - Text generation backend shared by all requests
/// * `chunk_delay` - Pause after each simulated delta
/// * `cancel` - Cancellation token for graceful shutdown
pub async fn serve(
    listener: TcpListener,
    backend: Arc<dyn TextGenerationPort>,
    chunk_delay: Duration,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    info!(backend = backend.name(), "Proxy server starting on {addr}");

    let app = create_router(AppState::new(backend, chunk_delay));

    info!("Proxy listening on {addr}");
    info!("Point Messages-API clients at: http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await?;

    info!("Proxy server shut down");
    Ok(())
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok"
    }))
}

/// Static model catalog.
async fn list_models() -> impl IntoResponse {
    debug!("GET /v1/models");
    Json(ModelsResponse::static_catalog(chrono::Utc::now().timestamp()))
}

/// Handle `POST /v1/messages`: normalize, call the backend once, emit.
async fn create_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    debug!("POST /v1/messages");

    // Oversized or unreadable bodies get the same error shape as bad JSON.
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            error!("Failed to read request body: {rejection}");
            return ApiError::InvalidRequest(rejection.body_text()).into_response();
        }
    };

    // Presence only; the key is never validated.
    if !headers.contains_key("x-api-key") {
        debug!("Request has no x-api-key header, continuing");
    }

    let request: IncomingRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            error!("Failed to parse request: {e}");
            return ApiError::InvalidRequest(format!("Invalid JSON body: {e}")).into_response();
        }
    };

    let prompt = normalize(&request);

    info!(
        model = %request.model,
        streaming = %request.stream,
        turns = request.messages.len(),
        prompt_bytes = prompt.prompt.len(),
        "Processing message request"
    );

    if request.stream {
        let job = StreamJob {
            backend: Arc::clone(&state.backend),
            prompt,
            message_id: new_message_id(),
            model: request.model,
            chunk_delay: state.chunk_delay,
        };
        return event_stream_response(simulated_stream(job));
    }

    let result = state.backend.generate(&prompt).await;
    match emit_once(result, &request.model) {
        Ok(message) => Json(message).into_response(),
        Err(e) => {
            error!(backend = state.backend.name(), "Backend generation failed: {e}");
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProxyConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:8787");
        assert_eq!(config.chunk_delay, Duration::from_millis(20));
    }
}
