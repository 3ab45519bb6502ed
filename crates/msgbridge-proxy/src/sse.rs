//! Server-sent event framing and the simulated streaming body.
//!
//! Every frame has the same envelope regardless of payload:
//!
//! ```text
//! event: content_block_delta
//! data: {"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"Hello "}}
//!
//! ```
//!
//! A frame is always handed to the body as one chunk, so a client that goes
//! away mid-stream never receives half a frame.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::{BufMut, Bytes, BytesMut};
use futures_util::Stream;
use msgbridge_core::{PromptRequest, TextGenerationPort};
use tracing::{debug, error};

use crate::emitter::EventSequence;
use crate::models::StreamEvent;

/// Encode one event as a complete SSE frame.
pub fn encode_frame(event: &StreamEvent) -> Result<Bytes, serde_json::Error> {
    let data = serde_json::to_vec(event)?;
    let name = event.event_name();

    let mut frame = BytesMut::with_capacity(name.len() + data.len() + 16);
    frame.put_slice(b"event: ");
    frame.put_slice(name.as_bytes());
    frame.put_slice(b"\ndata: ");
    frame.put_slice(&data);
    frame.put_slice(b"\n\n");
    Ok(frame.freeze())
}

/// Everything needed to produce one simulated stream.
pub struct StreamJob {
    pub backend: Arc<dyn TextGenerationPort>,
    pub prompt: PromptRequest,
    pub message_id: String,
    pub model: String,
    /// Pause after each `content_block_delta`.
    pub chunk_delay: Duration,
}

/// State threaded through the `unfold` stream.
enum Phase {
    /// Backend not called yet.
    Fetch(StreamJob),
    /// Result resolved; replaying events.
    Emit {
        events: EventSequence,
        chunk_delay: Duration,
        pause: bool,
    },
    Finished,
}

/// Build the SSE body for a streaming request.
///
/// The backend is awaited once when the body is first polled; after that
/// the resolved result is replayed through [`EventSequence`], sleeping
/// `chunk_delay` after every delta. Dropping the stream (client gone,
/// server shutting down) stops emission at the next frame boundary.
pub fn simulated_stream(
    job: StreamJob,
) -> impl Stream<Item = Result<Bytes, std::io::Error>> + Send {
    futures_util::stream::unfold(Phase::Fetch(job), |mut phase| async move {
        loop {
            match phase {
                Phase::Fetch(job) => {
                    let result = job.backend.generate(&job.prompt).await;
                    if let Err(e) = &result {
                        error!(
                            backend = job.backend.name(),
                            message_id = %job.message_id,
                            "Backend generation failed: {e}"
                        );
                    }
                    phase = Phase::Emit {
                        events: EventSequence::new(job.message_id, job.model, result),
                        chunk_delay: job.chunk_delay,
                        pause: false,
                    };
                }
                Phase::Emit {
                    mut events,
                    chunk_delay,
                    pause,
                } => {
                    if pause {
                        tokio::time::sleep(chunk_delay).await;
                    }
                    let Some(event) = events.next() else {
                        debug!("Simulated stream complete");
                        return None;
                    };
                    let pause = !chunk_delay.is_zero()
                        && matches!(event, StreamEvent::ContentBlockDelta { .. });
                    return match encode_frame(&event) {
                        Ok(frame) => Some((
                            Ok(frame),
                            Phase::Emit {
                                events,
                                chunk_delay,
                                pause,
                            },
                        )),
                        Err(e) => {
                            error!("Failed to encode {} event: {e}", event.event_name());
                            Some((Err(std::io::Error::other(e)), Phase::Finished))
                        }
                    };
                }
                Phase::Finished => return None,
            }
        }
    })
}

/// Wrap an SSE byte stream in a response with event-stream headers.
pub fn event_stream_response<S>(stream: S) -> Response
where
    S: Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static,
{
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::CONNECTION, "keep-alive")
        .header("x-accel-buffering", "no") // Disable nginx buffering
        .body(Body::from_stream(stream))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
