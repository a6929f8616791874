use std::fmt;

use async_trait::async_trait;
use log::warn;

use super::types::{Message, Reply};

/// Errors that can occur while exchanging a message with the endpoint.
///
/// All of these collapse into the same fallback reply for the user, but the
/// variant is kept so logs and tests can tell the causes apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The endpoint answered with a non-2xx status.
    Api { status: u16, message: String },
    /// The body could not be decoded as a reply.
    Parse(String),
}

/// Coarse tag for a [`SendError`], cheap to copy into app state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Api,
    Parse,
}

impl FailureKind {
    pub fn label(self) -> &'static str {
        match self {
            FailureKind::Network => "network",
            FailureKind::Api => "server",
            FailureKind::Parse => "malformed reply",
        }
    }
}

impl SendError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SendError::Network(_) => FailureKind::Network,
            SendError::Api { .. } => FailureKind::Api,
            SendError::Parse(_) => FailureKind::Parse,
        }
    }
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::Network(msg) => write!(f, "network error: {msg}"),
            SendError::Api { status, message } => {
                write!(f, "API request failed (HTTP {status}): {message}")
            }
            SendError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for SendError {}

/// Result of [`ConversationClient::send_message`]: always a usable reply,
/// plus the failure that forced the fallback, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub reply: Reply,
    pub failure: Option<SendError>,
}

impl Outcome {
    pub fn succeeded(reply: Reply) -> Self {
        Self {
            reply,
            failure: None,
        }
    }

    pub fn failed(error: SendError) -> Self {
        Self {
            reply: Reply::fallback(),
            failure: Some(error),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

#[async_trait]
pub trait ConversationClient: Send + Sync {
    /// Returns the name of the client, used in logs and the title bar.
    fn name(&self) -> &str;

    /// Sends `user_message` along with the full prior transcript and returns
    /// the endpoint's merged transcript and reply text.
    async fn exchange(&self, user_message: &str, prior: &[Message]) -> Result<Reply, SendError>;

    /// Like [`exchange`](Self::exchange), but never fails: errors are logged
    /// and replaced with [`Reply::fallback`].
    async fn send_message(&self, user_message: &str, prior: &[Message]) -> Outcome {
        match self.exchange(user_message, prior).await {
            Ok(reply) => Outcome::succeeded(reply),
            Err(e) => {
                warn!("Error while sending message: {e}");
                Outcome::failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedClient;

    #[test]
    fn test_send_message_passes_reply_through() {
        let reply = Reply {
            messages: vec![Message::user("hi"), Message::assistant("hello")],
            response: "hello".to_string(),
        };
        let client = ScriptedClient::replying(reply.clone());

        let outcome = tokio_test::block_on(client.send_message("hi", &[]));
        assert_eq!(outcome, Outcome::succeeded(reply));
        assert!(!outcome.is_failure());
    }

    #[test]
    fn test_send_message_substitutes_fallback_on_error() {
        let client = ScriptedClient::failing(SendError::Api {
            status: 503,
            message: "Service Unavailable".to_string(),
        });

        let prior = vec![Message::user("earlier"), Message::assistant("answer")];
        let outcome = tokio_test::block_on(client.send_message("hi", &prior));

        assert!(outcome.reply.messages.is_empty());
        assert_eq!(outcome.reply.response, "Error while sending message");
        assert_eq!(outcome.failure.map(|e| e.kind()), Some(FailureKind::Api));
    }

    #[test]
    fn test_error_display_and_kind() {
        let err = SendError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "network error: connection refused");
        assert_eq!(err.kind(), FailureKind::Network);

        let err = SendError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API request failed (HTTP 500): boom");

        let err = SendError::Parse("missing field `response`".to_string());
        assert_eq!(err.kind().label(), "malformed reply");
    }
}
