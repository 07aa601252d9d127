//! Stream domain.
//!
//! - [`event::PushEvent`]: a raw frame received on the server-push channel
//! - [`event::StreamEvent`]: the tagged events the session controller acts on
//! - [`classify::classify`]: pure mapping from one to the other

pub mod classify;
pub mod event;
