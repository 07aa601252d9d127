//! Presentation layer for streamchat
//!
//! This crate contains the CLI definition, the console rendering of the chat
//! and the interactive REPL.

pub mod chat;
pub mod cli;
pub mod output;

// Re-export commonly used types
pub use chat::{ChatRepl, ReplCommand};
pub use cli::commands::Cli;
pub use output::console::ConsoleChatView;
