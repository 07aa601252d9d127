//! Server configuration from TOML (`[server]` section)

use serde::{Deserialize, Serialize};
use streamchat_application::config::client_config::DEFAULT_BASE_URL;

/// Raw server configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Base URL of the chat server (scheme, host, optional path prefix)
    pub base_url: String,
    /// Timeout for one-shot requests; the live stream is never timed out
    pub request_timeout_seconds: Option<u64>,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_seconds: Some(30),
        }
    }
}
