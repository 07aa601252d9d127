//! Response accumulator: the in-progress assistant reply of one session.
//!
//! Holds at most one response buffer and at most one tool-call indicator.
//! The buffer is the plain concatenation of every chunk since the last turn
//! boundary, in arrival order. The indicator shows only the latest tool-call
//! notice and disappears as soon as the model produces text again.

use crate::ports::chat_view::{ChatView, ResponseSlot};
use std::sync::Arc;
use tracing::trace;

#[derive(Debug)]
struct ResponseBuffer {
    slot: ResponseSlot,
    text: String,
}

/// Per-turn response state bound to a [`ChatView`].
pub struct ResponseAccumulator {
    view: Arc<dyn ChatView>,
    buffer: Option<ResponseBuffer>,
    indicator: Option<String>,
    show_tool_calls: bool,
}

impl ResponseAccumulator {
    pub fn new(view: Arc<dyn ChatView>) -> Self {
        Self {
            view,
            buffer: None,
            indicator: None,
            show_tool_calls: true,
        }
    }

    /// When disabled, tool-call notices neither create an entry nor an
    /// indicator.
    pub fn with_tool_calls(mut self, show: bool) -> Self {
        self.show_tool_calls = show;
        self
    }

    /// Text received so far in this turn, if a response entry exists.
    pub fn response_text(&self) -> Option<&str> {
        self.buffer.as_ref().map(|b| b.text.as_str())
    }

    /// Text of the tool-call indicator, if one is shown.
    pub fn tool_indicator(&self) -> Option<&str> {
        self.indicator.as_deref()
    }

    pub fn has_response(&self) -> bool {
        self.buffer.is_some()
    }

    /// Append a token chunk; clears a pending tool-call indicator.
    pub fn on_chunk(&mut self, chunk: &str) {
        let slot = self.ensure_buffer();
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.text.push_str(chunk);
        }
        self.view.append_chunk(slot, chunk);

        if self.indicator.take().is_some() {
            self.view.clear_tool_indicator(slot);
        }
    }

    /// Show or overwrite the tool-call indicator with the trimmed payload.
    pub fn on_tool_call(&mut self, payload: &str) {
        if !self.show_tool_calls {
            trace!("Tool call hidden: {}", payload.trim());
            return;
        }
        let slot = self.ensure_buffer();
        let text = payload.trim().to_string();
        self.view.show_tool_indicator(slot, &text);
        self.indicator = Some(text);
    }

    /// Turn boundary: drop the buffer and the indicator.
    ///
    /// Returns the final response text, if any was produced.
    pub fn end_turn(&mut self) -> Option<String> {
        let buffer = self.buffer.take();
        let had_indicator = self.indicator.take().is_some();

        let buffer = buffer?;
        if had_indicator {
            self.view.clear_tool_indicator(buffer.slot);
        }
        self.view.end_response(buffer.slot);
        Some(buffer.text)
    }

    fn ensure_buffer(&mut self) -> ResponseSlot {
        match &self.buffer {
            Some(buffer) => buffer.slot,
            None => {
                let slot = self.view.begin_response();
                self.buffer = Some(ResponseBuffer {
                    slot,
                    text: String::new(),
                });
                slot
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingView;

    fn accumulator() -> (Arc<RecordingView>, ResponseAccumulator) {
        let view = Arc::new(RecordingView::default());
        let acc = ResponseAccumulator::new(view.clone());
        (view, acc)
    }

    #[test]
    fn first_chunk_creates_a_single_entry() {
        let (view, mut acc) = accumulator();
        assert!(!acc.has_response());

        acc.on_chunk("Hel");
        acc.on_chunk("lo");
        acc.on_chunk(" world");

        assert_eq!(acc.response_text(), Some("Hello world"));
        assert_eq!(view.ai_texts(), vec!["Hello world".to_string()]);
    }

    #[test]
    fn chunks_are_not_deduplicated() {
        let (_view, mut acc) = accumulator();
        acc.on_chunk("na");
        acc.on_chunk("na");
        assert_eq!(acc.response_text(), Some("nana"));
    }

    #[test]
    fn tool_calls_overwrite_and_chunk_clears_indicator() {
        let (view, mut acc) = accumulator();

        acc.on_tool_call("searching");
        assert_eq!(acc.tool_indicator(), Some("searching"));
        acc.on_tool_call("  reading\n");
        assert_eq!(acc.tool_indicator(), Some("reading"));

        acc.on_chunk("answer");
        assert_eq!(acc.tool_indicator(), None);
        assert_eq!(acc.response_text(), Some("answer"));

        assert_eq!(
            view.indicator_history(),
            vec!["searching".to_string(), "reading".to_string()]
        );
        assert_eq!(view.current_indicator(), None);
        // the tool call created the entry the chunk was appended to
        assert_eq!(view.ai_texts(), vec!["answer".to_string()]);
    }

    #[test]
    fn tool_call_creates_empty_entry() {
        let (view, mut acc) = accumulator();
        acc.on_tool_call("");
        assert_eq!(acc.response_text(), Some(""));
        assert_eq!(acc.tool_indicator(), Some(""));
        assert_eq!(view.ai_texts(), vec![String::new()]);
    }

    #[test]
    fn end_turn_clears_indicator_and_resets() {
        let (view, mut acc) = accumulator();
        acc.on_chunk("partial");
        acc.on_tool_call("calling tool");

        assert_eq!(acc.end_turn(), Some("partial".to_string()));
        assert!(!acc.has_response());
        assert_eq!(acc.tool_indicator(), None);
        assert_eq!(view.current_indicator(), None);
        assert_eq!(view.ended_responses(), 1);

        // next turn starts a fresh entry
        acc.on_chunk("second");
        assert_eq!(
            view.ai_texts(),
            vec!["partial".to_string(), "second".to_string()]
        );
    }

    #[test]
    fn end_turn_without_response_is_noop() {
        let (view, mut acc) = accumulator();
        assert_eq!(acc.end_turn(), None);
        assert_eq!(acc.end_turn(), None);
        assert_eq!(view.ended_responses(), 0);
        assert!(view.ai_texts().is_empty());
    }

    #[test]
    fn hidden_tool_calls_do_not_touch_the_view() {
        let view = Arc::new(RecordingView::default());
        let mut acc = ResponseAccumulator::new(view.clone()).with_tool_calls(false);
        acc.on_tool_call("searching");
        assert!(!acc.has_response());
        assert!(view.indicator_history().is_empty());
    }
}
