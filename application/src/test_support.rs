//! In-memory port implementations shared by the use case tests.

use crate::ports::chat_store::{ChatStore, StoreError};
use crate::ports::chat_view::{ChatView, ResponseSlot};
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::stream_transport::{PushStream, StreamTransport, TransportError};
use crate::ports::thread_id_generator::ThreadIdGenerator;
use crate::use_cases::session_controller::SessionHandler;
use async_trait::async_trait;
use futures::StreamExt;
use futures::channel::mpsc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use streamchat_domain::{Message, MessageType, PushEvent, Thread, ThreadId};

/// Let spawned tasks run until they are all idle.
pub async fn settle() {
    for _ in 0..64 {
        tokio::task::yield_now().await;
    }
}

/// Yield until `cond` holds; panics after two seconds.
pub async fn wait_for(mut cond: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while !cond() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("condition not reached in time");
}

// ==================== View ====================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEntry {
    pub author: MessageType,
    pub text: String,
    pub slot: Option<ResponseSlot>,
    pub indicator: Option<String>,
}

#[derive(Default)]
struct ViewState {
    title: String,
    active: Option<ThreadId>,
    threads: Vec<Thread>,
    entries: Vec<ViewEntry>,
    indicator_history: Vec<String>,
    ended: usize,
    next_slot: u64,
    clears: usize,
}

/// Records everything rendered; slots that were cleared away are ignored.
#[derive(Default)]
pub struct RecordingView {
    state: Mutex<ViewState>,
}

impl RecordingView {
    pub fn title(&self) -> String {
        self.state.lock().unwrap().title.clone()
    }

    pub fn active(&self) -> Option<ThreadId> {
        self.state.lock().unwrap().active.clone()
    }

    pub fn thread_ids(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .threads
            .iter()
            .map(|t| t.id.to_string())
            .collect()
    }

    pub fn thread_names(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .threads
            .iter()
            .map(|t| t.display_name().to_string())
            .collect()
    }

    pub fn entries(&self) -> Vec<ViewEntry> {
        self.state.lock().unwrap().entries.clone()
    }

    /// `(author, text)` of every displayed entry, in order.
    pub fn transcript(&self) -> Vec<(MessageType, String)> {
        self.entries()
            .into_iter()
            .map(|e| (e.author, e.text))
            .collect()
    }

    pub fn ai_texts(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.author == MessageType::Ai)
            .map(|e| e.text)
            .collect()
    }

    pub fn indicator_history(&self) -> Vec<String> {
        self.state.lock().unwrap().indicator_history.clone()
    }

    pub fn current_indicator(&self) -> Option<String> {
        self.entries().into_iter().find_map(|e| e.indicator)
    }

    pub fn ended_responses(&self) -> usize {
        self.state.lock().unwrap().ended
    }

    pub fn clears(&self) -> usize {
        self.state.lock().unwrap().clears
    }

    fn with_slot(&self, slot: ResponseSlot, f: impl FnOnce(&mut ViewEntry)) {
        let mut state = self.state.lock().unwrap();
        if let Some(entry) = state.entries.iter_mut().find(|e| e.slot == Some(slot)) {
            f(entry);
        }
    }
}

impl ChatView for RecordingView {
    fn set_title(&self, title: &str) {
        self.state.lock().unwrap().title = title.to_string();
    }

    fn render_threads(&self, threads: &[Thread]) {
        self.state.lock().unwrap().threads = threads.to_vec();
    }

    fn set_active_thread(&self, thread_id: Option<&ThreadId>) {
        self.state.lock().unwrap().active = thread_id.cloned();
    }

    fn clear_messages(&self) {
        let mut state = self.state.lock().unwrap();
        state.entries.clear();
        state.clears += 1;
    }

    fn append_message(&self, message: &Message) {
        self.state.lock().unwrap().entries.push(ViewEntry {
            author: message.message_type,
            text: message.content.clone(),
            slot: None,
            indicator: None,
        });
    }

    fn begin_response(&self) -> ResponseSlot {
        let mut state = self.state.lock().unwrap();
        state.next_slot += 1;
        let slot = ResponseSlot(state.next_slot);
        state.entries.push(ViewEntry {
            author: MessageType::Ai,
            text: String::new(),
            slot: Some(slot),
            indicator: None,
        });
        slot
    }

    fn append_chunk(&self, slot: ResponseSlot, chunk: &str) {
        self.with_slot(slot, |e| e.text.push_str(chunk));
    }

    fn show_tool_indicator(&self, slot: ResponseSlot, text: &str) {
        self.state
            .lock()
            .unwrap()
            .indicator_history
            .push(text.to_string());
        self.with_slot(slot, |e| e.indicator = Some(text.to_string()));
    }

    fn clear_tool_indicator(&self, slot: ResponseSlot) {
        self.with_slot(slot, |e| e.indicator = None);
    }

    fn end_response(&self, _slot: ResponseSlot) {
        self.state.lock().unwrap().ended += 1;
    }
}

// ==================== Transport ====================

type FrameSender = mpsc::UnboundedSender<Result<PushEvent, TransportError>>;

#[derive(Default)]
struct TransportState {
    connections: Vec<(ThreadId, Option<FrameSender>)>,
    attempts: usize,
    fail_next: Option<TransportError>,
}

/// Each successful connect opens a channel the test feeds by index.
#[derive(Default)]
pub struct ChannelTransport {
    state: Mutex<TransportState>,
}

impl ChannelTransport {
    pub fn connections(&self) -> usize {
        self.state.lock().unwrap().connections.len()
    }

    pub fn connect_attempts(&self) -> usize {
        self.state.lock().unwrap().attempts
    }

    pub fn connected_thread(&self, index: usize) -> ThreadId {
        self.state.lock().unwrap().connections[index].0.clone()
    }

    pub fn fail_next_connect(&self, error: TransportError) {
        self.state.lock().unwrap().fail_next = Some(error);
    }

    /// Send a frame on connection `index`; false if the session went away.
    pub fn push(&self, index: usize, frame: PushEvent) -> bool {
        self.send(index, Ok(frame))
    }

    pub fn push_error(&self, index: usize, error: TransportError) -> bool {
        self.send(index, Err(error))
    }

    /// Server closes connection `index`.
    pub fn disconnect(&self, index: usize) {
        self.state.lock().unwrap().connections[index].1 = None;
    }

    fn send(&self, index: usize, item: Result<PushEvent, TransportError>) -> bool {
        let state = self.state.lock().unwrap();
        match &state.connections[index].1 {
            Some(tx) => tx.unbounded_send(item).is_ok(),
            None => false,
        }
    }
}

#[async_trait]
impl StreamTransport for ChannelTransport {
    async fn connect(&self, thread_id: &ThreadId) -> Result<PushStream, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.attempts += 1;
        if let Some(error) = state.fail_next.take() {
            return Err(error);
        }
        let (tx, rx) = mpsc::unbounded();
        state.connections.push((thread_id.clone(), Some(tx)));
        Ok(rx.boxed())
    }
}

// ==================== Store ====================

#[derive(Default)]
struct StoreState {
    threads: Vec<Thread>,
    messages: HashMap<ThreadId, Vec<Message>>,
    submitted: Vec<(ThreadId, String)>,
    renamed: Vec<(ThreadId, String)>,
    deleted: Vec<ThreadId>,
    list_calls: usize,
    fail_list: bool,
    fail_fetch: bool,
    fail_submit: bool,
    fail_rename: bool,
    fail_delete: bool,
}

/// Scripted store; failures are toggled per operation.
#[derive(Default)]
pub struct FakeStore {
    state: Mutex<StoreState>,
}

impl FakeStore {
    pub fn with_threads(threads: Vec<Thread>) -> Self {
        let store = Self::default();
        store.state.lock().unwrap().threads = threads;
        store
    }

    pub fn set_messages(&self, thread_id: &ThreadId, messages: Vec<Message>) {
        self.state
            .lock()
            .unwrap()
            .messages
            .insert(thread_id.clone(), messages);
    }

    pub fn set_threads(&self, threads: Vec<Thread>) {
        self.state.lock().unwrap().threads = threads;
    }

    pub fn submitted(&self) -> Vec<(ThreadId, String)> {
        self.state.lock().unwrap().submitted.clone()
    }

    pub fn renamed(&self) -> Vec<(ThreadId, String)> {
        self.state.lock().unwrap().renamed.clone()
    }

    pub fn deleted(&self) -> Vec<ThreadId> {
        self.state.lock().unwrap().deleted.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    pub fn fail_list(&self, fail: bool) {
        self.state.lock().unwrap().fail_list = fail;
    }

    pub fn fail_fetch(&self, fail: bool) {
        self.state.lock().unwrap().fail_fetch = fail;
    }

    pub fn fail_submit(&self, fail: bool) {
        self.state.lock().unwrap().fail_submit = fail;
    }

    pub fn fail_rename(&self, fail: bool) {
        self.state.lock().unwrap().fail_rename = fail;
    }

    pub fn fail_delete(&self, fail: bool) {
        self.state.lock().unwrap().fail_delete = fail;
    }
}

fn server_error(operation: &'static str) -> StoreError {
    StoreError::Status {
        operation,
        status: 500,
    }
}

#[async_trait]
impl ChatStore for FakeStore {
    async fn list_threads(&self) -> Result<Vec<Thread>, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.list_calls += 1;
        if state.fail_list {
            return Err(server_error("list threads"));
        }
        Ok(state.threads.clone())
    }

    async fn fetch_messages(&self, thread_id: &ThreadId) -> Result<Vec<Message>, StoreError> {
        let state = self.state.lock().unwrap();
        if state.fail_fetch {
            return Err(server_error("fetch messages"));
        }
        Ok(state.messages.get(thread_id).cloned().unwrap_or_default())
    }

    async fn delete_thread(&self, thread_id: &ThreadId) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_delete {
            return Err(server_error("delete thread"));
        }
        state.deleted.push(thread_id.clone());
        state.threads.retain(|t| &t.id != thread_id);
        Ok(())
    }

    async fn rename_thread(&self, thread_id: &ThreadId, chat_name: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_rename {
            return Err(server_error("rename thread"));
        }
        state.renamed.push((thread_id.clone(), chat_name.to_string()));
        if let Some(thread) = state.threads.iter_mut().find(|t| &t.id == thread_id) {
            thread.chat_name = Some(chat_name.to_string());
        }
        Ok(())
    }

    async fn submit_message(&self, thread_id: &ThreadId, message: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_submit {
            return Err(server_error("send message"));
        }
        state
            .submitted
            .push((thread_id.clone(), message.to_string()));
        Ok(())
    }
}

// ==================== Ids / handlers / logger ====================

/// Yields `draft-1`, `draft-2`, ...
#[derive(Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl ThreadIdGenerator for SequentialIds {
    fn generate(&self) -> ThreadId {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        ThreadId::new(format!("draft-{n}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Chunk(String),
    ToolCall(String),
    End,
    TransportError(String),
}

/// Handler whose calls stay observable after it is boxed into a session.
#[derive(Default, Clone)]
pub struct RecordingHandler {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl RecordingHandler {
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn chunk_text(&self) -> String {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                RecordedCall::Chunk(text) => Some(text),
                _ => None,
            })
            .collect()
    }
}

impl SessionHandler for RecordingHandler {
    fn on_chunk(&mut self, chunk: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall::Chunk(chunk.to_string()));
    }

    fn on_tool_call(&mut self, payload: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall::ToolCall(payload.to_string()));
    }

    fn on_end(&mut self) {
        self.calls.lock().unwrap().push(RecordedCall::End);
    }

    fn on_transport_error(&mut self, reason: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall::TransportError(reason.to_string()));
    }
}

/// Keeps every logged event type.
#[derive(Default)]
pub struct MemoryLogger {
    events: Mutex<Vec<&'static str>>,
}

impl MemoryLogger {
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

impl ConversationLogger for MemoryLogger {
    fn log(&self, event: ConversationEvent) {
        self.events.lock().unwrap().push(event.event_type);
    }
}
