//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod chat_store;
pub mod chat_view;
pub mod conversation_logger;
pub mod stream_transport;
pub mod thread_id_generator;
