//! Thread coordinator: which thread is open, and the send-message flow.
//!
//! Selecting a thread supersedes the live session before any history of the
//! new thread is rendered, replays the history, then opens a fresh session
//! for the thread. Sending from the draft state mints a new thread id first.
//!
//! Sending is a two-step protocol: the user message is shown immediately,
//! then submitted. A failed submission is reported but the optimistic
//! message stays on screen.

use crate::config::ClientConfig;
use crate::ports::chat_store::{ChatStore, StoreError};
use crate::ports::chat_view::ChatView;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::thread_id_generator::ThreadIdGenerator;
use crate::use_cases::input_lock::InputLock;
use crate::use_cases::response_accumulator::ResponseAccumulator;
use crate::use_cases::session_controller::{SessionController, SessionHandler, SessionId};
use crate::use_cases::thread_list::ThreadListService;
use std::sync::Arc;
use streamchat_domain::{DEFAULT_CHAT_NAME, Message, Thread, ThreadId, preview};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors of the turn-critical coordinator operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinatorError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("Failed to load thread history: {0}")]
    History(#[source] StoreError),

    #[error("Failed to send message: {0}")]
    Send(#[source] StoreError),
}

/// Session handler of one turn: feeds the accumulator, refreshes the
/// thread list once the turn ends.
struct TurnHandler {
    thread_id: ThreadId,
    accumulator: ResponseAccumulator,
    threads: ThreadListService,
}

impl SessionHandler for TurnHandler {
    fn on_chunk(&mut self, chunk: &str) {
        self.accumulator.on_chunk(chunk);
    }

    fn on_tool_call(&mut self, payload: &str) {
        self.accumulator.on_tool_call(payload);
    }

    fn on_end(&mut self) {
        if let Some(text) = self.accumulator.end_turn() {
            debug!(
                "Turn on {} finished: {}",
                self.thread_id,
                preview(&text, 60)
            );
        }
        let threads = self.threads.clone();
        tokio::spawn(async move {
            threads.refresh_best_effort().await;
        });
    }

    fn on_transport_error(&mut self, reason: &str) {
        // an idle thread's stream may close without end-of-turn; the
        // controller already reports the failure
        debug!("Stream for thread {} ended early: {}", self.thread_id, reason);
        self.accumulator.end_turn();
    }
}

impl Drop for TurnHandler {
    // superseded or closed mid-turn
    fn drop(&mut self) {
        self.accumulator.end_turn();
    }
}

/// Owns the active-thread state and drives the [`SessionController`].
pub struct ThreadCoordinator {
    store: Arc<dyn ChatStore>,
    view: Arc<dyn ChatView>,
    controller: SessionController,
    ids: Arc<dyn ThreadIdGenerator>,
    threads: ThreadListService,
    conversation_logger: Arc<dyn ConversationLogger>,
    show_tool_calls: bool,
    active: Option<ThreadId>,
    title: String,
}

impl ThreadCoordinator {
    pub fn new(
        store: Arc<dyn ChatStore>,
        view: Arc<dyn ChatView>,
        controller: SessionController,
        ids: Arc<dyn ThreadIdGenerator>,
    ) -> Self {
        let threads = ThreadListService::new(Arc::clone(&store), Arc::clone(&view));
        Self {
            store,
            view,
            controller,
            ids,
            threads,
            conversation_logger: Arc::new(NoConversationLogger),
            show_tool_calls: true,
            active: None,
            title: DEFAULT_CHAT_NAME.to_string(),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn with_config(mut self, config: &ClientConfig) -> Self {
        self.show_tool_calls = config.show_tool_calls;
        self
    }

    pub fn active_thread(&self) -> Option<&ThreadId> {
        self.active.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_draft(&self) -> bool {
        self.active.is_none()
    }

    pub fn input_lock(&self) -> &InputLock {
        self.controller.input_lock()
    }

    pub fn is_streaming(&self) -> bool {
        self.controller.is_open()
    }

    /// Threads of the last successful refresh, most recent first.
    pub fn threads(&self) -> Vec<Thread> {
        self.threads.snapshot()
    }

    /// Load the thread list and open the most recent thread, if any.
    pub async fn bootstrap(&mut self) -> Result<(), CoordinatorError> {
        self.refresh_threads().await;
        match self.threads.snapshot().into_iter().next() {
            Some(first) => {
                let name = first.display_name().to_string();
                self.select_thread(first.id, Some(&name)).await
            }
            None => {
                self.start_new_draft();
                Ok(())
            }
        }
    }

    /// Switch to `thread_id`: supersede, replay history, open a session.
    ///
    /// `display_name` falls back to the cached list entry, then to
    /// `"New Chat"`. When the history fetch fails the error is returned and
    /// no session is opened.
    pub async fn select_thread(
        &mut self,
        thread_id: ThreadId,
        display_name: Option<&str>,
    ) -> Result<(), CoordinatorError> {
        self.controller.close_session();

        let title = display_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .or_else(|| {
                self.threads
                    .find(&thread_id)
                    .map(|t| t.display_name().to_string())
            })
            .unwrap_or_else(|| DEFAULT_CHAT_NAME.to_string());
        info!("Selecting thread {} ({})", thread_id, title);

        self.active = Some(thread_id.clone());
        self.set_title(title);
        self.threads.select(Some(&thread_id));
        self.view.clear_messages();

        let history = self
            .store
            .fetch_messages(&thread_id)
            .await
            .map_err(CoordinatorError::History)?;
        debug!("Replaying {} messages of {}", history.len(), thread_id);
        for message in &history {
            self.view.append_message(message);
        }

        self.open_session(thread_id);
        Ok(())
    }

    /// Leave the current thread for an unsaved draft.
    pub fn start_new_draft(&mut self) {
        self.controller.close_session();
        self.active = None;
        self.set_title(DEFAULT_CHAT_NAME.to_string());
        self.view.clear_messages();
        self.threads.select(None);
        debug!("Started new draft");
    }

    /// Send `text` on the active thread, minting one from the draft state.
    ///
    /// Returns the thread the message was sent on.
    pub async fn send_message(&mut self, text: &str) -> Result<ThreadId, CoordinatorError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CoordinatorError::EmptyMessage);
        }

        let thread_id = match &self.active {
            Some(id) => id.clone(),
            None => {
                let id = self.ids.generate();
                info!("Minted thread {} for draft", id);
                self.active = Some(id.clone());
                self.set_title(DEFAULT_CHAT_NAME.to_string());
                self.threads.select(Some(&id));
                id
            }
        };

        // nothing from the previous turn may land after the new message
        self.controller.close_session();

        let message = Message::human(text);
        self.view.append_message(&message);
        self.conversation_logger
            .log(ConversationEvent::message_sent(&thread_id, text));

        self.store
            .submit_message(&thread_id, text)
            .await
            .map_err(CoordinatorError::Send)?;

        self.open_session(thread_id.clone());
        Ok(thread_id)
    }

    /// Refetch and rerender the thread list; failures only log.
    pub async fn refresh_threads(&self) {
        self.threads.refresh_best_effort().await;
    }

    /// Rename a thread. Blank names are ignored.
    pub async fn rename_thread(&mut self, thread_id: &ThreadId, chat_name: &str) {
        let chat_name = chat_name.trim();
        if chat_name.is_empty() {
            debug!("Ignoring blank name for {}", thread_id);
            return;
        }

        self.threads.rename_local(thread_id, chat_name);
        if self.active.as_ref() == Some(thread_id) {
            self.set_title(chat_name.to_string());
        }

        match self.store.rename_thread(thread_id, chat_name).await {
            Ok(()) => self.threads.refresh_best_effort().await,
            Err(e) => warn!("Failed to rename thread {}: {}", thread_id, e),
        }
    }

    /// Delete a thread; the active one falls back to the most recent
    /// remaining thread, or the draft state when none is left.
    pub async fn delete_thread(&mut self, thread_id: &ThreadId) {
        if let Err(e) = self.store.delete_thread(thread_id).await {
            warn!("Failed to delete thread {}: {}", thread_id, e);
        }

        if self.active.as_ref() != Some(thread_id) {
            self.threads.refresh_best_effort().await;
            return;
        }

        self.start_new_draft();
        self.threads.refresh_best_effort().await;
        if let Some(next) = self.threads.snapshot().into_iter().next() {
            let name = next.display_name().to_string();
            if let Err(e) = self.select_thread(next.id, Some(&name)).await {
                warn!("Failed to open thread after delete: {}", e);
            }
        }
    }

    /// Explicitly stop the live session. Returns whether one was open.
    pub fn close_session(&self) -> bool {
        self.controller.close_session()
    }

    fn set_title(&mut self, title: String) {
        self.view.set_title(&title);
        self.title = title;
    }

    fn open_session(&self, thread_id: ThreadId) -> SessionId {
        let accumulator =
            ResponseAccumulator::new(Arc::clone(&self.view)).with_tool_calls(self.show_tool_calls);
        let handler = TurnHandler {
            thread_id: thread_id.clone(),
            accumulator,
            threads: self.threads.clone(),
        };
        self.controller.open_session(thread_id, Box::new(handler))
    }
}
