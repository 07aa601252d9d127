//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`text`]: text helpers for log previews

pub mod error;
pub mod text;
