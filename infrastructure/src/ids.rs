//! Thread identifier generation

use streamchat_application::ThreadIdGenerator;
use streamchat_domain::ThreadId;
use uuid::Uuid;

/// Mints random (v4) UUIDs, hyphenated lowercase.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidThreadIdGenerator;

impl ThreadIdGenerator for UuidThreadIdGenerator {
    fn generate(&self) -> ThreadId {
        ThreadId::new(Uuid::new_v4().to_string())
    }
}
