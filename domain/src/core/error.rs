//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Thread id cannot be empty")]
    EmptyThreadId,

    #[error("Unknown message type: {0}")]
    UnknownMessageType(String),
}
