//! Conversation content domain.
//!
//! - [`entities::Message`]: a single displayed message of a thread
//! - [`entities::MessageType`]: who authored it

pub mod entities;
