//! HTTP client for the conversation endpoint.
//!
//! One `POST` per exchange, JSON in and JSON out. No auth, no streaming.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::client::{ConversationClient, SendError};
use super::types::{ExchangeRequest, Message, Reply};

/// Joins a base URL and an endpoint path with exactly one `/` between them.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}

/// Talks to a conversation endpoint over plain HTTP(S).
pub struct HttpConversationClient {
    url: String,
    client: reqwest::Client,
}

impl HttpConversationClient {
    /// `url` is the full endpoint URL (see [`endpoint_url`]).
    /// `timeout` of `None` waits forever, like a browser `fetch`.
    pub fn new(url: String, timeout: Option<Duration>) -> Result<Self, SendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SendError::Network(e.to_string()))?;
        Ok(Self { url, client })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ConversationClient for HttpConversationClient {
    fn name(&self) -> &str {
        &self.url
    }

    async fn exchange(&self, user_message: &str, prior: &[Message]) -> Result<Reply, SendError> {
        let request = ExchangeRequest {
            user_message,
            messages: prior,
        };

        info!(
            "Conversation request: url={}, prior_count={}, user_len={}",
            self.url,
            prior.len(),
            user_message.len()
        );

        // `.json()` sets Content-Type: application/json
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SendError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Conversation response status: {}", status);

        if !status.is_success() {
            let message = response
                .text()
                .await
                .ok()
                .filter(|body| !body.trim().is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
            warn!("Conversation endpoint error: {} - {}", status.as_u16(), message);
            return Err(SendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SendError::Network(e.to_string()))?;
        let reply: Reply =
            serde_json::from_str(&body).map_err(|e| SendError::Parse(e.to_string()))?;

        info!(
            "Conversation reply: {} messages, response_len={}",
            reply.messages.len(),
            reply.response.len()
        );
        Ok(reply)
    }
}
