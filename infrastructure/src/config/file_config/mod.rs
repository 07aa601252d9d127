//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! [`FileConfig::to_client_config`] turns them into the application's
//! [`ClientConfig`].

mod logging;
mod output;
mod repl;
mod server;

pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use repl::FileReplConfig;
pub use server::FileServerConfig;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use streamchat_application::ClientConfig;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("server.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("server.base_url '{url}' is not a valid http(s) URL")]
    InvalidBaseUrl { url: String },

    #[error("server.request_timeout_seconds cannot be 0")]
    InvalidTimeout,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chat server settings
    pub server: FileServerConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Log file and transcript settings
    pub logging: FileLoggingConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning every problem found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        let url = self.server.base_url.trim();
        if url.is_empty() {
            errors.push(ConfigValidationError::EmptyBaseUrl);
        } else if !is_http_url(url) {
            errors.push(ConfigValidationError::InvalidBaseUrl {
                url: url.to_string(),
            });
        }

        if self.server.request_timeout_seconds == Some(0) {
            errors.push(ConfigValidationError::InvalidTimeout);
        }

        errors
    }

    /// Settings the application layer and the HTTP adapters consume.
    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_base_url(self.server.base_url.trim())
            .with_request_timeout(self.server.request_timeout_seconds.map(Duration::from_secs))
            .with_show_tool_calls(self.output.show_tool_calls)
    }
}

fn is_http_url(url: &str) -> bool {
    url.strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .is_some_and(|rest| !rest.is_empty() && !rest.starts_with('/'))
}
