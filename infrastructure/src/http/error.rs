//! Error types for the HTTP adapters

use thiserror::Error;

/// Errors raised while setting up the HTTP adapters.
///
/// Request-time failures are reported through the port errors
/// ([`StoreError`](streamchat_application::StoreError),
/// [`TransportError`](streamchat_application::TransportError)) instead.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Invalid server URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
