//! Input lock: the gate on the message-send control.
//!
//! Owned by the [`SessionController`](super::session_controller::SessionController):
//! set when a session opens, cleared when it ends, fails, is closed or is
//! superseded. Presentation code observes it to decide whether a new message
//! may be submitted.

use std::sync::Arc;
use tokio::sync::watch;

/// Shared, observable boolean lock.
///
/// Cloning yields another handle to the same lock.
#[derive(Debug, Clone)]
pub struct InputLock {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for InputLock {
    fn default() -> Self {
        Self::new()
    }
}

impl InputLock {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// True while a session is open and sending is disabled.
    pub fn is_locked(&self) -> bool {
        *self.tx.borrow()
    }

    pub(crate) fn set(&self, locked: bool) {
        self.tx.send_replace(locked);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unlocked() {
        assert!(!InputLock::new().is_locked());
    }

    #[test]
    fn clones_share_state() {
        let lock = InputLock::new();
        let other = lock.clone();
        lock.set(true);
        assert!(other.is_locked());
        other.set(false);
        assert!(!lock.is_locked());
    }
}
