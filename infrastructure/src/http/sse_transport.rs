//! Server-sent events adapter for the [`StreamTransport`] port.
//!
//! Opens `GET /chat/stream?thread_id=<id>` and yields every SSE frame as a
//! raw [`PushEvent`]; classification happens in the session controller.
//! The stream is never re-opened here: the first failure ends it.

use super::endpoints::{CHAT_STREAM, Endpoints};
use super::error::HttpError;
use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures::StreamExt;
use reqwest::Client;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use streamchat_application::{ClientConfig, PushStream, StreamTransport, TransportError};
use streamchat_domain::{PushEvent, ThreadId};
use tracing::debug;

/// [`StreamTransport`] over `text/event-stream`.
#[derive(Clone)]
pub struct SseStreamTransport {
    client: Client,
    endpoints: Endpoints,
}

impl SseStreamTransport {
    /// No request timeout is applied: a stream lives as long as its turn.
    pub fn new(config: &ClientConfig) -> Result<Self, HttpError> {
        Ok(Self {
            client: Client::builder().build()?,
            endpoints: Endpoints::new(config.normalized_base_url())?,
        })
    }
}

#[async_trait]
impl StreamTransport for SseStreamTransport {
    async fn connect(&self, thread_id: &ThreadId) -> Result<PushStream, TransportError> {
        let url = self.endpoints.thread_url(CHAT_STREAM, thread_id.as_str());
        debug!("Opening event stream {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "text/event-stream")
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| TransportError::Connect(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let frames = response.bytes_stream().eventsource().map(|item| {
            item.map(|event| PushEvent::new(event.event, event.data))
                .map_err(|e| TransportError::Stream(e.to_string()))
        });
        Ok(frames.boxed())
    }
}
