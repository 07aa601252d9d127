//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface over the thread
//! coordinator.

mod command;
mod repl;

pub use command::ReplCommand;
pub use repl::ChatRepl;
