//! Stream transport port
//!
//! Opens the unidirectional server-push channel of one thread.

use async_trait::async_trait;
use futures::stream::BoxStream;
use streamchat_domain::{PushEvent, ThreadId};
use thiserror::Error;

/// Errors raised while establishing or reading a push channel
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Connection error: {0}")]
    Connect(String),

    #[error("Stream rejected with HTTP status {0}")]
    Status(u16),

    #[error("Stream error: {0}")]
    Stream(String),
}

/// Raw frames of one push channel, in arrival order.
///
/// The stream ending means the server closed the connection.
pub type PushStream = BoxStream<'static, Result<PushEvent, TransportError>>;

/// Opens push channels scoped to a thread.
///
/// Implementations must not reconnect on their own: a failed or closed
/// stream is terminal for the session that owns it.
#[async_trait]
pub trait StreamTransport: Send + Sync {
    /// `GET /chat/stream?thread_id=<id>`
    async fn connect(&self, thread_id: &ThreadId) -> Result<PushStream, TransportError>;
}
