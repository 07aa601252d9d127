//! Thread domain entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Display name used when a thread has no name yet.
pub const DEFAULT_CHAT_NAME: &str = "New Chat";

/// Opaque identifier of a conversation thread.
///
/// Identifiers are either issued by the server (listed threads) or minted by
/// the client when the first message of a draft is sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadId(String);

impl ThreadId {
    /// Creates a ThreadId, rejecting empty or whitespace-only input.
    pub fn parse(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::EmptyThreadId);
        }
        Ok(Self(id))
    }

    /// Creates a ThreadId without validation.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ThreadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ThreadId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A conversation thread (Entity, owned by the server)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: ThreadId,
    #[serde(default)]
    pub chat_name: Option<String>,
    /// ISO-8601 timestamp of the last activity, used for list ordering only.
    #[serde(default)]
    pub last_activity_time: Option<String>,
}

impl Thread {
    pub fn new(id: ThreadId, chat_name: impl Into<String>) -> Self {
        Self {
            id,
            chat_name: Some(chat_name.into()),
            last_activity_time: None,
        }
    }

    pub fn with_last_activity(mut self, time: impl Into<String>) -> Self {
        self.last_activity_time = Some(time.into());
        self
    }

    /// Name shown in the sidebar and title bar.
    pub fn display_name(&self) -> &str {
        match self.chat_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => DEFAULT_CHAT_NAME,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_blank_ids() {
        assert_eq!(ThreadId::parse(""), Err(DomainError::EmptyThreadId));
        assert_eq!(ThreadId::parse("   "), Err(DomainError::EmptyThreadId));
        assert_eq!(ThreadId::parse("abc").unwrap().as_str(), "abc");
    }

    #[test]
    fn display_name_falls_back_to_default() {
        let mut thread = Thread::new(ThreadId::new("t1"), "Rust questions");
        assert_eq!(thread.display_name(), "Rust questions");

        thread.chat_name = None;
        assert_eq!(thread.display_name(), DEFAULT_CHAT_NAME);

        thread.chat_name = Some(String::new());
        assert_eq!(thread.display_name(), DEFAULT_CHAT_NAME);
    }

    #[test]
    fn deserializes_server_record() {
        let json = r#"{"id":"abc","chat_name":"Trip plan","last_activity_time":"2024-05-01T10:00:00"}"#;
        let thread: Thread = serde_json::from_str(json).unwrap();
        assert_eq!(thread.id, ThreadId::new("abc"));
        assert_eq!(thread.display_name(), "Trip plan");
        assert_eq!(
            thread.last_activity_time.as_deref(),
            Some("2024-05-01T10:00:00")
        );
    }

    #[test]
    fn deserializes_record_without_optional_fields() {
        let thread: Thread = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert_eq!(thread.chat_name, None);
        assert_eq!(thread.last_activity_time, None);
    }
}
