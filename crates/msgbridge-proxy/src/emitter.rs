//! Response emission: re-render one finished completion as a Messages-API
//! response, either whole or as a simulated event stream.
//!
//! Nothing in here talks to the backend. Both entry points take the already
//! resolved backend result, so every output can be checked in unit tests.
//!
//! Streaming follows a fixed state machine, run once per request:
//!
//! ```text
//! START ─ok──▶ BLOCK_OPEN ─▶ CHUNKING* ─▶ BLOCK_CLOSE ─▶ STOP ─▶ done
//!   └─err─▶ ERROR ─▶ done
//! ```

use msgbridge_core::{GenerateError, GeneratedResult};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    ContentBlock, ContentDelta, ErrorDetail, MessageResponse, StopReason, StreamEvent,
};

/// Index of the single content block every response carries.
const BLOCK_INDEX: u32 = 0;

/// Allocate a fresh message identifier.
#[must_use]
pub fn new_message_id() -> String {
    format!("msg_{}", Uuid::new_v4())
}

/// Build the non-streaming response for a backend result.
///
/// The completion text is placed in one text block unaltered and the stop
/// reason is always `end_turn`. A backend failure becomes an `api_error`
/// carrying the backend's message.
pub fn emit_once(
    result: Result<GeneratedResult, GenerateError>,
    model: &str,
) -> Result<MessageResponse, ApiError> {
    let generated = result?;
    Ok(MessageResponse::completed(
        new_message_id(),
        model.to_string(),
        generated.text,
    ))
}

/// Split a completion into delta texts.
///
/// The text is cut at every single space and each piece gets one trailing
/// space back, so the concatenated deltas equal the input plus one final
/// space. An empty completion still yields one `" "` delta.
pub fn word_chunks(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(' ').map(|word| format!("{word} "))
}

enum State {
    Start(Result<GeneratedResult, GenerateError>),
    Failed(GenerateError),
    BlockOpen(String),
    Chunking(std::vec::IntoIter<String>),
    BlockClose,
    Stop,
    Done,
}

/// Lazily produced, ordered stream events for one request.
///
/// Finite and not restartable; a new request builds a new sequence.
pub struct EventSequence {
    message_id: String,
    model: String,
    state: State,
}

impl EventSequence {
    pub fn new(
        message_id: String,
        model: String,
        result: Result<GeneratedResult, GenerateError>,
    ) -> Self {
        Self {
            message_id,
            model,
            state: State::Start(result),
        }
    }
}

impl Iterator for EventSequence {
    type Item = StreamEvent;

    fn next(&mut self) -> Option<StreamEvent> {
        let (event, next) = match std::mem::replace(&mut self.state, State::Done) {
            State::Start(result) => {
                let next = match result {
                    Ok(generated) => State::BlockOpen(generated.text),
                    Err(e) => State::Failed(e),
                };
                let message =
                    MessageResponse::stub(self.message_id.clone(), self.model.clone());
                (StreamEvent::MessageStart { message }, next)
            }
            State::Failed(e) => (
                StreamEvent::Error {
                    error: ErrorDetail::api_error(e.to_string()),
                },
                State::Done,
            ),
            State::BlockOpen(text) => {
                let chunks: Vec<String> = word_chunks(&text).collect();
                (
                    StreamEvent::ContentBlockStart {
                        index: BLOCK_INDEX,
                        content_block: ContentBlock::text(""),
                    },
                    State::Chunking(chunks.into_iter()),
                )
            }
            State::Chunking(mut chunks) => match chunks.next() {
                Some(text) => {
                    let next = if chunks.as_slice().is_empty() {
                        State::BlockClose
                    } else {
                        State::Chunking(chunks)
                    };
                    (
                        StreamEvent::ContentBlockDelta {
                            index: BLOCK_INDEX,
                            delta: ContentDelta::TextDelta { text },
                        },
                        next,
                    )
                }
                None => (
                    StreamEvent::ContentBlockStop { index: BLOCK_INDEX },
                    State::Stop,
                ),
            },
            State::BlockClose => (
                StreamEvent::ContentBlockStop { index: BLOCK_INDEX },
                State::Stop,
            ),
            State::Stop => (
                StreamEvent::MessageStop {
                    stop_reason: StopReason::EndTurn,
                },
                State::Done,
            ),
            State::Done => return None,
        };
        self.state = next;
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(events: &[StreamEvent]) -> Vec<&'static str> {
        events.iter().map(StreamEvent::event_name).collect()
    }

    fn stream_for(result: Result<GeneratedResult, GenerateError>) -> Vec<StreamEvent> {
        EventSequence::new("msg_test".to_string(), "claude-test".to_string(), result).collect()
    }

    #[test]
    fn test_emit_once_wraps_text_unaltered() {
        let text = "line one\n\n  spaced   out ";
        let resp = emit_once(Ok(GeneratedResult::new(text)), "claude-test").unwrap();
        assert_eq!(resp.content, vec![ContentBlock::text(text)]);
        assert_eq!(resp.stop_reason, Some(StopReason::EndTurn));
        assert_eq!(resp.model, "claude-test");
        assert!(resp.id.starts_with("msg_"));
    }

    #[test]
    fn test_emit_once_empty_completion() {
        let resp = emit_once(Ok(GeneratedResult::new("")), "m").unwrap();
        assert_eq!(resp.content, vec![ContentBlock::text("")]);
        assert_eq!(resp.stop_reason, Some(StopReason::EndTurn));
    }

    #[test]
    fn test_emit_once_backend_error() {
        let err = emit_once(Err(GenerateError::Internal("cookie expired".into())), "m")
            .unwrap_err();
        assert_eq!(err.detail(), ErrorDetail::api_error("cookie expired"));
    }

    #[test]
    fn test_emit_once_ids_are_fresh() {
        let a = emit_once(Ok(GeneratedResult::new("x")), "m").unwrap();
        let b = emit_once(Ok(GeneratedResult::new("x")), "m").unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_stream_success_order() {
        let events = stream_for(Ok(GeneratedResult::new("Hello brave world")));
        assert_eq!(
            names(&events),
            vec![
                "message_start",
                "content_block_start",
                "content_block_delta",
                "content_block_delta",
                "content_block_delta",
                "content_block_stop",
                "message_stop",
            ]
        );
        let deltas: Vec<&str> = events.iter().filter_map(StreamEvent::delta_text).collect();
        assert_eq!(deltas, vec!["Hello ", "brave ", "world "]);
    }

    #[test]
    fn test_stream_start_carries_stub() {
        let events = stream_for(Ok(GeneratedResult::new("hi")));
        match &events[0] {
            StreamEvent::MessageStart { message } => {
                assert_eq!(message.id, "msg_test");
                assert_eq!(message.model, "claude-test");
                assert!(message.content.is_empty());
                assert!(message.stop_reason.is_none());
            }
            other => panic!("expected message_start, got {}", other.event_name()),
        }
        assert_eq!(
            events.last(),
            Some(&StreamEvent::MessageStop {
                stop_reason: StopReason::EndTurn
            })
        );
    }

    #[test]
    fn test_stream_deltas_reassemble_text() {
        let text = "a  b\nc d ";
        let events = stream_for(Ok(GeneratedResult::new(text)));
        let joined: String = events.iter().filter_map(StreamEvent::delta_text).collect();
        assert_eq!(joined, format!("{text} "));
    }

    #[test]
    fn test_stream_empty_completion() {
        let events = stream_for(Ok(GeneratedResult::new("")));
        assert_eq!(events.len(), 5);
        let deltas: Vec<&str> = events.iter().filter_map(StreamEvent::delta_text).collect();
        assert_eq!(deltas, vec![" "]);
    }

    #[test]
    fn test_stream_backend_error() {
        let events = stream_for(Err(GenerateError::Transport("connection refused".into())));
        assert_eq!(names(&events), vec!["message_start", "error"]);
        match &events[1] {
            StreamEvent::Error { error } => {
                assert_eq!(
                    error,
                    &ErrorDetail::api_error("Failed to reach backend: connection refused")
                );
            }
            other => panic!("expected error, got {}", other.event_name()),
        }
    }

    #[test]
    fn test_sequence_is_exhausted_for_good() {
        let mut seq = EventSequence::new("id".into(), "m".into(), Ok(GeneratedResult::new("x")));
        assert_eq!(seq.by_ref().count(), 5);
        assert!(seq.next().is_none());
        assert!(seq.next().is_none());
    }

    #[test]
    fn test_word_chunks() {
        let chunks: Vec<String> = word_chunks("one two").collect();
        assert_eq!(chunks, vec!["one ", "two "]);
    }
}
