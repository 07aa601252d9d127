//! REST adapter for the [`ChatStore`] port.

use super::endpoints::{CHAT_MESSAGE, Endpoints, THREAD, THREADS};
use super::error::HttpError;
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use streamchat_application::{ChatStore, ClientConfig, StoreError};
use streamchat_domain::{Message, Thread, ThreadId};
use tracing::debug;

#[derive(Serialize)]
struct RenameBody<'a> {
    chat_name: &'a str,
}

#[derive(Serialize)]
struct SubmitBody<'a> {
    thread_id: &'a str,
    message: &'a str,
}

/// [`ChatStore`] backed by the chat server's REST routes.
#[derive(Clone)]
pub struct HttpChatStore {
    client: Client,
    endpoints: Endpoints,
}

impl HttpChatStore {
    pub fn new(config: &ClientConfig) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoints: Endpoints::new(config.normalized_base_url())?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.endpoints.base().as_str()
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        operation: &'static str,
    ) -> Result<T, StoreError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(request_error)?;
        let response = ensure_success(response, operation)?;
        response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

fn request_error(e: reqwest::Error) -> StoreError {
    StoreError::Request(e.to_string())
}

fn ensure_success(response: Response, operation: &'static str) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(StoreError::Status {
            operation,
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl ChatStore for HttpChatStore {
    async fn list_threads(&self) -> Result<Vec<Thread>, StoreError> {
        self.get_json(self.endpoints.url(THREADS), "Fetching threads")
            .await
    }

    async fn fetch_messages(&self, thread_id: &ThreadId) -> Result<Vec<Message>, StoreError> {
        self.get_json(
            self.endpoints.thread_url(THREAD, thread_id.as_str()),
            "Fetching thread messages",
        )
        .await
    }

    async fn delete_thread(&self, thread_id: &ThreadId) -> Result<(), StoreError> {
        let url = self.endpoints.thread_url(THREAD, thread_id.as_str());
        debug!("DELETE {}", url);
        let response = self.client.delete(url).send().await.map_err(request_error)?;
        ensure_success(response, "Deleting thread").map(|_| ())
    }

    async fn rename_thread(&self, thread_id: &ThreadId, chat_name: &str) -> Result<(), StoreError> {
        let url = self.endpoints.thread_url(THREAD, thread_id.as_str());
        debug!("PATCH {}", url);
        let response = self
            .client
            .patch(url)
            .json(&RenameBody { chat_name })
            .send()
            .await
            .map_err(request_error)?;
        ensure_success(response, "Renaming thread").map(|_| ())
    }

    async fn submit_message(&self, thread_id: &ThreadId, message: &str) -> Result<(), StoreError> {
        let url = self.endpoints.url(CHAT_MESSAGE);
        debug!("POST {} (thread {})", url, thread_id);
        let response = self
            .client
            .post(url)
            .json(&SubmitBody {
                thread_id: thread_id.as_str(),
                message,
            })
            .send()
            .await
            .map_err(request_error)?;
        ensure_success(response, "Sending message").map(|_| ())
    }
}
