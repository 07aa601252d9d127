//! Session controller: owns the live stream session of one client.
//!
//! At most one session exists per controller. Opening a session always
//! closes the previous one first, and closing detaches its handler before
//! returning, so events of a superseded session never reach the handler of
//! the next one.
//!
//! # Dispatch
//!
//! ```text
//! open_session ──► spawn pump ──► transport.connect(thread)
//!                                   │
//!                                   ▼
//!                  PushEvent ──► classify ──► StreamEvent
//!                                   │
//!            ┌──────────────┬───────┴──────┬────────────────────┐
//!            ▼              ▼              ▼                    ▼
//!        on_chunk     on_tool_call     on_end + close   on_transport_error + close
//! ```
//!
//! Dispatch and close both run under the same guard. A pump whose session
//! is no longer the active one stops at its next event.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::stream_transport::StreamTransport;
use crate::use_cases::input_lock::InputLock;
use futures::StreamExt;
use std::sync::{Arc, Mutex, MutexGuard};
use streamchat_domain::{StreamEvent, ThreadId, classify, preview};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

/// Receives the classified events of one session.
///
/// Callbacks run while the controller's session guard is held: they must
/// not call back into the [`SessionController`].
pub trait SessionHandler: Send {
    fn on_chunk(&mut self, chunk: &str);

    fn on_tool_call(&mut self, payload: &str);

    /// End of turn. The session is closed right after this returns.
    fn on_end(&mut self);

    /// The transport failed or closed early. No retry follows.
    fn on_transport_error(&mut self, _reason: &str) {}
}

/// Identifier of one opened session, unique per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct ActiveSession {
    id: SessionId,
    thread_id: ThreadId,
    handler: Box<dyn SessionHandler>,
    cancel: CancellationToken,
}

#[derive(Default)]
struct SessionSlot {
    active: Option<ActiveSession>,
    next_id: u64,
}

/// State shared between the controller and the pump task of its session.
struct SessionCore {
    slot: Mutex<SessionSlot>,
    input_lock: InputLock,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl SessionCore {
    fn lock_slot(&self) -> MutexGuard<'_, SessionSlot> {
        // A panicking handler poisons the guard; the slot itself stays valid.
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Detach and cancel whatever session `slot` holds, leaving the lock as is.
    fn detach_locked(&self, slot: &mut SessionSlot, reason: &str) -> bool {
        let Some(session) = slot.active.take() else {
            return false;
        };
        session.cancel.cancel();
        debug!(
            "Session {} on thread {} closed ({})",
            session.id, session.thread_id, reason
        );
        self.conversation_logger.log(ConversationEvent::session_closed(
            &session.thread_id,
            session.id.as_u64(),
            reason,
        ));
        true
    }

    /// Close whatever session `slot` holds and release the input lock.
    fn close_locked(&self, slot: &mut SessionSlot, reason: &str) -> bool {
        let closed = self.detach_locked(slot, reason);
        self.input_lock.set(false);
        closed
    }

    /// Deliver one event to session `id`. Returns false once the pump must stop.
    fn dispatch(&self, id: SessionId, event: StreamEvent) -> bool {
        let mut slot = self.lock_slot();
        let Some(session) = slot.active.as_mut().filter(|s| s.id == id) else {
            trace!("Dropping {} for stale session {}", event.kind(), id);
            return false;
        };

        match event {
            StreamEvent::Chunk(text) => {
                trace!("Session {} chunk: {}", id, preview(&text, 60));
                self.conversation_logger
                    .log(ConversationEvent::chunk(id.as_u64(), &text));
                session.handler.on_chunk(&text);
                true
            }
            StreamEvent::ToolCall(payload) => {
                debug!("Session {} tool call: {}", id, preview(payload.trim(), 80));
                self.conversation_logger
                    .log(ConversationEvent::tool_call(id.as_u64(), &payload));
                session.handler.on_tool_call(&payload);
                true
            }
            StreamEvent::EndOfTurn => {
                info!("Session {} reached end of turn", id);
                self.conversation_logger
                    .log(ConversationEvent::end_of_turn(id.as_u64()));
                session.handler.on_end();
                self.close_locked(&mut slot, "end_of_turn");
                false
            }
            StreamEvent::TransportError(reason) => {
                warn!("Session {} transport error: {}", id, reason);
                self.conversation_logger
                    .log(ConversationEvent::transport_error(id.as_u64(), &reason));
                session.handler.on_transport_error(&reason);
                self.close_locked(&mut slot, "transport_error");
                false
            }
        }
    }
}

/// Owns at most one live stream session.
///
/// Independent controllers (e.g. one per window, or one per test) share
/// nothing.
pub struct SessionController {
    transport: Arc<dyn StreamTransport>,
    core: Arc<SessionCore>,
}

impl SessionController {
    pub fn new(transport: Arc<dyn StreamTransport>) -> Self {
        Self::with_parts(transport, InputLock::new(), Arc::new(NoConversationLogger))
    }

    /// Create with an existing lock handle and a conversation logger.
    pub fn with_parts(
        transport: Arc<dyn StreamTransport>,
        input_lock: InputLock,
        conversation_logger: Arc<dyn ConversationLogger>,
    ) -> Self {
        Self {
            transport,
            core: Arc::new(SessionCore {
                slot: Mutex::new(SessionSlot::default()),
                input_lock,
                conversation_logger,
            }),
        }
    }

    /// Handle to the send-control lock.
    pub fn input_lock(&self) -> &InputLock {
        &self.core.input_lock
    }

    pub fn is_open(&self) -> bool {
        self.core.lock_slot().active.is_some()
    }

    /// Thread of the open session, if any.
    pub fn active_thread(&self) -> Option<ThreadId> {
        self.core
            .lock_slot()
            .active
            .as_ref()
            .map(|s| s.thread_id.clone())
    }

    /// Identifier of the open session, if any.
    pub fn active_session(&self) -> Option<SessionId> {
        self.core.lock_slot().active.as_ref().map(|s| s.id)
    }

    /// Open a session on `thread_id`, superseding any open session.
    ///
    /// Returns immediately; connecting and event delivery happen on a
    /// spawned task. Must be called within a Tokio runtime.
    pub fn open_session(
        &self,
        thread_id: ThreadId,
        handler: Box<dyn SessionHandler>,
    ) -> SessionId {
        let cancel = CancellationToken::new();
        let id = {
            let mut slot = self.core.lock_slot();
            // the lock stays set across a supersede
            self.core.detach_locked(&mut slot, "superseded");

            slot.next_id += 1;
            let id = SessionId(slot.next_id);
            slot.active = Some(ActiveSession {
                id,
                thread_id: thread_id.clone(),
                handler,
                cancel: cancel.clone(),
            });
            self.core.input_lock.set(true);
            id
        };

        info!("Opening session {} on thread {}", id, thread_id);
        self.core
            .conversation_logger
            .log(ConversationEvent::session_opened(&thread_id, id.as_u64()));

        tokio::spawn(pump(
            Arc::clone(&self.transport),
            Arc::clone(&self.core),
            thread_id,
            id,
            cancel,
        ));
        id
    }

    /// Close the open session, if any, and release the input lock.
    ///
    /// Idempotent. Returns whether a session was actually closed.
    pub fn close_session(&self) -> bool {
        let mut slot = self.core.lock_slot();
        self.core.close_locked(&mut slot, "closed")
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        let mut slot = self.core.lock_slot();
        self.core.close_locked(&mut slot, "dropped");
    }
}

/// Read the push channel of session `id` until it ends or is cancelled.
async fn pump(
    transport: Arc<dyn StreamTransport>,
    core: Arc<SessionCore>,
    thread_id: ThreadId,
    id: SessionId,
    cancel: CancellationToken,
) {
    let connected = tokio::select! {
        biased;
        _ = cancel.cancelled() => return,
        result = transport.connect(&thread_id) => result,
    };

    let mut stream = match connected {
        Ok(stream) => stream,
        Err(e) => {
            core.dispatch(id, StreamEvent::TransportError(e.to_string()));
            return;
        }
    };
    debug!("Session {} connected", id);

    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => return,
            next = stream.next() => next,
        };

        let event = match next {
            Some(Ok(frame)) => match classify(&frame) {
                Some(event) => event,
                None => {
                    trace!(
                        "Session {} ignoring frame '{}': {}",
                        id,
                        frame.event,
                        preview(&frame.data, 40)
                    );
                    continue;
                }
            },
            Some(Err(e)) => StreamEvent::TransportError(e.to_string()),
            None => StreamEvent::TransportError("stream closed before end of turn".to_string()),
        };

        if !core.dispatch(id, event) {
            return;
        }
    }
}
