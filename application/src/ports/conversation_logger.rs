//! Port for structured conversation logging.
//!
//! Records what happened on each stream session (opened, chunks, tool calls,
//! end of turn, failures) as a machine-readable transcript. This is separate
//! from `tracing`-based diagnostics.

use serde_json::{Value, json};
use streamchat_domain::ThreadId;

/// A structured conversation event for logging.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "session_opened", "chunk").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    pub fn session_opened(thread_id: &ThreadId, session: u64) -> Self {
        Self::new(
            "session_opened",
            json!({ "thread_id": thread_id.as_str(), "session": session }),
        )
    }

    pub fn session_closed(thread_id: &ThreadId, session: u64, reason: &str) -> Self {
        Self::new(
            "session_closed",
            json!({ "thread_id": thread_id.as_str(), "session": session, "reason": reason }),
        )
    }

    pub fn chunk(session: u64, text: &str) -> Self {
        Self::new(
            "chunk",
            json!({ "session": session, "bytes": text.len(), "text": text }),
        )
    }

    pub fn tool_call(session: u64, payload: &str) -> Self {
        Self::new("tool_call", json!({ "session": session, "payload": payload }))
    }

    pub fn end_of_turn(session: u64) -> Self {
        Self::new("end_of_turn", json!({ "session": session }))
    }

    pub fn transport_error(session: u64, reason: &str) -> Self {
        Self::new(
            "transport_error",
            json!({ "session": session, "reason": reason }),
        )
    }

    pub fn message_sent(thread_id: &ThreadId, message: &str) -> Self {
        Self::new(
            "message_sent",
            json!({ "thread_id": thread_id.as_str(), "bytes": message.len(), "text": message }),
        )
    }
}

/// Port for logging conversation events to a structured log.
///
/// `log` is synchronous and infallible; logging failures are ignored so the
/// stream is never disturbed.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when transcripts are disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
