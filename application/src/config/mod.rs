//! Application-level configuration.
//!
//! - [`ClientConfig`]: server endpoint and request behavior shared by the adapters

pub mod client_config;

pub use client_config::ClientConfig;
