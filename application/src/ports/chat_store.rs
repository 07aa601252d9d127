//! Chat store port
//!
//! The server owns threads and messages; this port is the client's view of
//! its REST surface.

use async_trait::async_trait;
use streamchat_domain::{Message, Thread, ThreadId};
use thiserror::Error;

/// Errors that can occur during chat store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{operation} failed with HTTP status {status}")]
    Status { operation: &'static str, status: u16 },

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Invalid response body: {0}")]
    Decode(String),
}

/// Server-side storage of threads and messages.
///
/// Every failure is a generic [`StoreError`]; no structured error body is
/// assumed. Implementations live in the infrastructure layer.
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// `GET /threads`
    async fn list_threads(&self) -> Result<Vec<Thread>, StoreError>;

    /// `GET /thread?thread_id=<id>`, messages in display order
    async fn fetch_messages(&self, thread_id: &ThreadId) -> Result<Vec<Message>, StoreError>;

    /// `DELETE /thread?thread_id=<id>`
    async fn delete_thread(&self, thread_id: &ThreadId) -> Result<(), StoreError>;

    /// `PATCH /thread?thread_id=<id>` with `{chat_name}`
    async fn rename_thread(&self, thread_id: &ThreadId, chat_name: &str)
    -> Result<(), StoreError>;

    /// `POST /chat/message`: enqueues a user turn
    async fn submit_message(&self, thread_id: &ThreadId, message: &str) -> Result<(), StoreError>;
}
