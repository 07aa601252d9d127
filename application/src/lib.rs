//! Application layer for streamchat
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::ClientConfig;
pub use ports::{
    chat_store::{ChatStore, StoreError},
    chat_view::{ChatView, ResponseSlot},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    stream_transport::{PushStream, StreamTransport, TransportError},
    thread_id_generator::ThreadIdGenerator,
};
pub use use_cases::input_lock::InputLock;
pub use use_cases::response_accumulator::ResponseAccumulator;
pub use use_cases::session_controller::{SessionController, SessionHandler, SessionId};
pub use use_cases::thread_coordinator::{CoordinatorError, ThreadCoordinator};
pub use use_cases::thread_list::{ThreadListService, sort_by_recent_activity};
