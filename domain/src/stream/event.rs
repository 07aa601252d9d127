//! Streaming events for a thread's live response channel.

use serde::{Deserialize, Serialize};

/// A raw frame from the server-push channel, before classification.
///
/// `event` is the frame label as sent by the server; unlabeled frames carry
/// an empty label (or `message`, depending on the decoder).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PushEvent {
    pub event: String,
    pub data: String,
}

impl PushEvent {
    pub fn new(event: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            data: data.into(),
        }
    }

    /// An unlabeled frame.
    pub fn unlabeled(data: impl Into<String>) -> Self {
        Self::new("", data)
    }
}

/// An event in a streaming assistant response.
///
/// Bridges transport-level frames to the application layer. Every frame the
/// session controller reacts to is one of these variants; everything else is
/// dropped by [`classify`](super::classify::classify).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A token chunk to append to the in-progress response.
    Chunk(String),
    /// Tool-call progress notice (raw payload, possibly empty).
    ToolCall(String),
    /// The assistant finished its turn.
    EndOfTurn,
    /// The transport failed or closed before the turn ended.
    TransportError(String),
}

impl StreamEvent {
    /// Returns the chunk text if this is a Chunk event.
    pub fn chunk_text(&self) -> Option<&str> {
        match self {
            StreamEvent::Chunk(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if no further event of the session may follow.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::EndOfTurn | StreamEvent::TransportError(_))
    }

    /// Short name used in logs and transcripts.
    pub fn kind(&self) -> &'static str {
        match self {
            StreamEvent::Chunk(_) => "chunk",
            StreamEvent::ToolCall(_) => "tool_call",
            StreamEvent::EndOfTurn => "end_of_turn",
            StreamEvent::TransportError(_) => "transport_error",
        }
    }
}
