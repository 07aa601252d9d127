//! Domain layer for streamchat
//!
//! This crate contains the entities and value objects of the chat client.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Threads
//!
//! A [`Thread`] is a server-owned conversation. The client only references it
//! by [`ThreadId`] and shows its `chat_name`.
//!
//! ## Stream events
//!
//! The assistant's reply arrives as raw server-push frames ([`PushEvent`]).
//! [`classify`] maps each frame onto the closed set of [`StreamEvent`]s the
//! session controller acts on.

pub mod core;
pub mod session;
pub mod stream;
pub mod thread;

// Re-export commonly used types
pub use core::{error::DomainError, text::preview};
pub use session::entities::{Message, MessageType};
pub use stream::{
    classify::{
        CHUNK_EVENT, DEFAULT_EVENT, END_OF_TURN_PAYLOAD, SYSTEM_EVENT, TOOL_CALL_EVENT, classify,
    },
    event::{PushEvent, StreamEvent},
};
pub use thread::entities::{DEFAULT_CHAT_NAME, Thread, ThreadId};
