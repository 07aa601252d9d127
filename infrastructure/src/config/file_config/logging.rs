//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for daily diagnostic log files; stderr when unset
    pub dir: Option<String>,
    /// Write a JSONL transcript of every session
    pub transcript: bool,
}
