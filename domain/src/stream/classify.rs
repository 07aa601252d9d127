//! Classification of raw push frames.
//!
//! The server uses two channels for token chunks (unlabeled frames and
//! `chunk` frames). Both are accepted and may interleave; chunk order is the
//! arrival order regardless of channel.

use super::event::{PushEvent, StreamEvent};

/// Label of an unlabeled frame as reported by most SSE decoders.
pub const DEFAULT_EVENT: &str = "message";
/// Label of explicit token chunk frames.
pub const CHUNK_EVENT: &str = "chunk";
/// Label of lifecycle frames.
pub const SYSTEM_EVENT: &str = "system";
/// Label of tool-call progress frames.
pub const TOOL_CALL_EVENT: &str = "tool_call";
/// Trimmed `system` payload that ends the turn.
pub const END_OF_TURN_PAYLOAD: &str = "end";

/// Map a raw frame to the event the controller should act on.
///
/// Returns `None` for frames that carry no action: empty chunks,
/// unrecognized `system` payloads and unknown labels.
pub fn classify(frame: &PushEvent) -> Option<StreamEvent> {
    match frame.event.as_str() {
        "" | DEFAULT_EVENT | CHUNK_EVENT => {
            if frame.data.is_empty() {
                None
            } else {
                Some(StreamEvent::Chunk(frame.data.clone()))
            }
        }
        SYSTEM_EVENT => {
            (frame.data.trim() == END_OF_TURN_PAYLOAD).then_some(StreamEvent::EndOfTurn)
        }
        TOOL_CALL_EVENT => Some(StreamEvent::ToolCall(frame.data.clone())),
        _ => None,
    }
}
