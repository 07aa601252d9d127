//! Thread domain.
//!
//! - [`entities::ThreadId`]: opaque, stable thread identifier
//! - [`entities::Thread`]: a server-owned conversation as listed in the sidebar

pub mod entities;
