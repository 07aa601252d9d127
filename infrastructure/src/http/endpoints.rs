//! Server routes, resolved against the configured base URL.

use super::error::HttpError;
use reqwest::Url;

pub(crate) const THREADS: &str = "threads";
pub(crate) const THREAD: &str = "thread";
pub(crate) const CHAT_MESSAGE: &str = "chat/message";
pub(crate) const CHAT_STREAM: &str = "chat/stream";

/// Query parameter naming the thread on every per-thread route.
pub(crate) const THREAD_ID_PARAM: &str = "thread_id";

/// Base URL of the chat server. A path prefix (`https://host/api`) is kept.
#[derive(Debug, Clone)]
pub(crate) struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub(crate) fn new(base_url: &str) -> Result<Self, HttpError> {
        let invalid = |reason: String| HttpError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let mut base = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", base.scheme())));
        }
        // a trailing slash makes `join` append instead of replacing the last segment
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    pub(crate) fn url(&self, route: &str) -> Url {
        let mut url = self.base.clone();
        let path = format!("{}{}", self.base.path(), route);
        url.set_path(&path);
        url
    }

    pub(crate) fn thread_url(&self, route: &str, thread_id: &str) -> Url {
        let mut url = self.url(route);
        url.query_pairs_mut().append_pair(THREAD_ID_PARAM, thread_id);
        url
    }

    pub(crate) fn base(&self) -> &Url {
        &self.base
    }
}
