//! Chat view port
//!
//! The rendering surface (sidebar, title, message list). The session
//! controller and coordinator only talk to the screen through this trait.

use streamchat_domain::{Message, Thread, ThreadId};

/// Handle to an assistant message entry that is still being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResponseSlot(pub u64);

/// Output port for everything the user sees.
///
/// Methods take `&self`; implementations use interior mutability. They are
/// called from the session's stream task as well as from the coordinator,
/// never concurrently for the same session.
pub trait ChatView: Send + Sync {
    /// Title of the open conversation.
    fn set_title(&self, title: &str);

    /// Replace the thread list, already in display order.
    fn render_threads(&self, threads: &[Thread]);

    /// Mark one sidebar entry active and every other inactive.
    fn set_active_thread(&self, thread_id: Option<&ThreadId>);

    /// Remove every displayed message.
    fn clear_messages(&self);

    /// Append a complete message (history replay, optimistic user message).
    fn append_message(&self, message: &Message);

    /// Append a new, empty assistant entry and return its handle.
    fn begin_response(&self) -> ResponseSlot;

    /// Append chunk text to an in-progress assistant entry.
    fn append_chunk(&self, slot: ResponseSlot, chunk: &str);

    /// Show the tool-call indicator on `slot`, or replace its text.
    fn show_tool_indicator(&self, slot: ResponseSlot, text: &str);

    /// Remove the tool-call indicator from `slot`.
    fn clear_tool_indicator(&self, slot: ResponseSlot);

    /// The entry will receive no more chunks.
    fn end_response(&self, _slot: ResponseSlot) {}
}
