//! HTTP adapters for the chat server.
//!
//! - [`HttpChatStore`]: REST routes behind the `ChatStore` port
//! - [`SseStreamTransport`]: `text/event-stream` behind the `StreamTransport` port

mod chat_store;
mod endpoints;
mod error;
mod sse_transport;

pub use chat_store::HttpChatStore;
pub use error::HttpError;
pub use sse_transport::SseStreamTransport;
