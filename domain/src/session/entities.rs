//! Message entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Author of a message in a thread.
///
/// The server stores human turns as either `human` or `user`; both map to
/// [`MessageType::Human`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[serde(alias = "user")]
    Human,
    Ai,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Human => "human",
            MessageType::Ai => "ai",
        }
    }
}

impl std::str::FromStr for MessageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" | "user" => Ok(MessageType::Human),
            "ai" => Ok(MessageType::Ai),
            other => Err(DomainError::UnknownMessageType(other.to_string())),
        }
    }
}

/// A message in a thread (Entity)
///
/// Insertion order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

impl Message {
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            message_type: MessageType::Human,
            content: content.into(),
        }
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self {
            message_type: MessageType::Ai,
            content: content.into(),
        }
    }

    pub fn is_human(&self) -> bool {
        self.message_type == MessageType::Human
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
