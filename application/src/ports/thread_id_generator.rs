//! Thread identifier generation port

use streamchat_domain::ThreadId;

/// Mints identifiers for threads created by the client.
///
/// Production implementations must be collision resistant across clients;
/// tests inject deterministic sequences.
pub trait ThreadIdGenerator: Send + Sync {
    fn generate(&self) -> ThreadId;
}
