//! Console rendering of the chat: messages, streamed replies, thread list.
//!
//! Streamed chunks are written as they arrive, on the line opened by
//! `begin_response`. The tool-call indicator is an `indicatif` spinner; text
//! written while it spins is printed through [`ProgressBar::suspend`].

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use streamchat_application::{ChatView, ResponseSlot};
use streamchat_domain::{Message, MessageType, Thread, ThreadId};

struct ConsoleState {
    out: Box<dyn Write + Send>,
    title: String,
    threads: Vec<Thread>,
    active: Option<ThreadId>,
    open_slot: Option<ResponseSlot>,
    next_slot: u64,
    spinner: Option<ProgressBar>,
}

impl ConsoleState {
    fn write(&mut self, text: &str) {
        let out = &mut self.out;
        let mut emit = || {
            let _ = out.write_all(text.as_bytes());
            let _ = out.flush();
        };
        match &self.spinner {
            Some(spinner) => spinner.suspend(emit),
            None => emit(),
        }
    }

    /// Terminate a partially written reply line before printing anything else.
    fn close_open_line(&mut self) {
        if self.open_slot.take().is_some() {
            self.write("\n");
        }
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

/// [`ChatView`] writing to a terminal (or any writer, for tests).
pub struct ConsoleChatView {
    state: Mutex<ConsoleState>,
    show_spinner: bool,
}

impl ConsoleChatView {
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            state: Mutex::new(ConsoleState {
                out,
                title: String::new(),
                threads: Vec::new(),
                active: None,
                open_slot: None,
                next_slot: 0,
                spinner: None,
            }),
            show_spinner: true,
        }
    }

    /// Hide the animated tool-call spinner (e.g. `--quiet`).
    pub fn with_spinner(mut self, show: bool) -> Self {
        self.show_spinner = show;
        self
    }

    fn lock(&self) -> MutexGuard<'_, ConsoleState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn title(&self) -> String {
        self.lock().title.clone()
    }

    /// Print the cached thread list, 1-based, marking the active entry.
    pub fn print_threads(&self) {
        let mut state = self.lock();
        state.close_open_line();
        if state.threads.is_empty() {
            state.write(&format!("{}\n", "No threads yet.".dimmed()));
            return;
        }
        let lines: Vec<String> = state
            .threads
            .iter()
            .enumerate()
            .map(|(i, thread)| {
                let active = state.active.as_ref() == Some(&thread.id);
                let marker = if active { "*" } else { " " };
                let name = if active {
                    thread.display_name().green().bold()
                } else {
                    thread.display_name().normal()
                };
                let when = thread.last_activity_time.as_deref().unwrap_or("");
                format!(
                    "{} {:>3}. {} {}\n",
                    marker,
                    i + 1,
                    name,
                    format!("{} {}", thread.id, when).trim_end().dimmed()
                )
            })
            .collect();
        state.write(&format!("{}\n", "Threads:".cyan().bold()));
        for line in lines {
            state.write(&line);
        }
    }

    /// Informational line from the REPL.
    pub fn notice(&self, text: &str) {
        let mut state = self.lock();
        state.close_open_line();
        state.write(&format!("{}\n", text.dimmed()));
    }

    pub fn error(&self, text: &str) {
        let mut state = self.lock();
        state.close_open_line();
        state.write(&format!("{} {}\n", "Error:".red().bold(), text));
    }
}

impl Default for ConsoleChatView {
    fn default() -> Self {
        Self::new()
    }
}

fn author_label(message_type: MessageType) -> colored::ColoredString {
    match message_type {
        MessageType::Human => "you>".green().bold(),
        MessageType::Ai => "ai>".blue().bold(),
    }
}

impl ChatView for ConsoleChatView {
    fn set_title(&self, title: &str) {
        let mut state = self.lock();
        state.title = title.to_string();
        state.close_open_line();
        state.write(&format!("{}\n", format!("── {} ──", title).cyan().bold()));
    }

    fn render_threads(&self, threads: &[Thread]) {
        self.lock().threads = threads.to_vec();
    }

    fn set_active_thread(&self, thread_id: Option<&ThreadId>) {
        self.lock().active = thread_id.cloned();
    }

    fn clear_messages(&self) {
        let mut state = self.lock();
        state.stop_spinner();
        state.close_open_line();
    }

    fn append_message(&self, message: &Message) {
        let mut state = self.lock();
        state.close_open_line();
        state.write(&format!(
            "{} {}\n",
            author_label(message.message_type),
            message.content
        ));
    }

    fn begin_response(&self) -> ResponseSlot {
        let mut state = self.lock();
        state.close_open_line();
        state.next_slot += 1;
        let slot = ResponseSlot(state.next_slot);
        state.write(&format!("{} ", author_label(MessageType::Ai)));
        state.open_slot = Some(slot);
        slot
    }

    fn append_chunk(&self, slot: ResponseSlot, chunk: &str) {
        let mut state = self.lock();
        if state.open_slot == Some(slot) {
            state.write(chunk);
        }
    }

    fn show_tool_indicator(&self, slot: ResponseSlot, text: &str) {
        if !self.show_spinner {
            return;
        }
        let mut state = self.lock();
        if state.open_slot != Some(slot) {
            return;
        }
        match &state.spinner {
            Some(spinner) => spinner.set_message(text.to_string()),
            None => {
                let spinner = ProgressBar::new_spinner();
                if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.yellow} {msg}")
                {
                    spinner.set_style(style);
                }
                spinner.set_message(text.to_string());
                spinner.enable_steady_tick(Duration::from_millis(100));
                state.spinner = Some(spinner);
            }
        }
    }

    fn clear_tool_indicator(&self, _slot: ResponseSlot) {
        self.lock().stop_spinner();
    }

    fn end_response(&self, slot: ResponseSlot) {
        let mut state = self.lock();
        if state.open_slot == Some(slot) {
            state.stop_spinner();
            state.close_open_line();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn view() -> (SharedBuffer, ConsoleChatView) {
        colored::control::set_override(false);
        let buffer = SharedBuffer::default();
        let view = ConsoleChatView::with_writer(Box::new(buffer.clone())).with_spinner(false);
        (buffer, view)
    }

    #[test]
    fn streams_chunks_on_one_line() {
        let (buffer, view) = view();
        view.append_message(&Message::human("hi"));
        let slot = view.begin_response();
        view.append_chunk(slot, "Hel");
        view.append_chunk(slot, "lo");
        view.end_response(slot);

        assert_eq!(buffer.contents(), "you> hi\nai> Hello\n");
    }

    #[test]
    fn stale_slot_is_ignored() {
        let (buffer, view) = view();
        let old = view.begin_response();
        view.end_response(old);
        let _new = view.begin_response();
        view.append_chunk(old, "late");

        assert!(!buffer.contents().contains("late"));
    }

    #[test]
    fn interrupted_reply_line_is_terminated() {
        let (buffer, view) = view();
        let slot = view.begin_response();
        view.append_chunk(slot, "partial");
        view.clear_messages();
        view.set_title("Other");

        assert_eq!(buffer.contents(), "ai> partial\n── Other ──\n");
        assert_eq!(view.title(), "Other");
    }

    #[test]
    fn prints_numbered_threads_with_active_marker() {
        let (buffer, view) = view();
        view.render_threads(&[
            Thread::new(ThreadId::new("a"), "Alpha"),
            Thread::new(ThreadId::new("b"), "Beta"),
        ]);
        view.set_active_thread(Some(&ThreadId::new("b")));
        view.print_threads();

        let out = buffer.contents();
        assert!(out.contains("    1. Alpha a"));
        assert!(out.contains("*   2. Beta b"));
    }

    #[test]
    fn empty_thread_list() {
        let (buffer, view) = view();
        view.print_threads();
        assert_eq!(buffer.contents(), "No threads yet.\n");
    }
}
