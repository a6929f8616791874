use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Who authored a message.
///
/// Roles travel as plain JSON strings and the endpoint is free to use ones
/// we don't know about (`"system"` is common), so anything unrecognized is
/// kept verbatim in `Other` and written back out unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Role {
    User,
    Assistant,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Other(name) => name,
        }
    }

    /// Label shown above a message in the transcript view.
    pub fn label(&self) -> &str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
            Role::Other(name) => name,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => Role::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single exchanged message. Immutable once created.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Request body for `POST .../conversation`.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRequest<'a> {
    pub user_message: &'a str,
    pub messages: &'a [Message],
}

/// What the endpoint sends back: the merged transcript and the reply text.
///
/// The conversation service historically named the reply field `botMessage`;
/// both spellings are accepted. It also sends `"messages": null` for a
/// conversation it has no history for, which decodes as an empty transcript.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub messages: Vec<Message>,
    #[serde(alias = "botMessage")]
    pub response: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Message>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Message>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Assistant text used when an exchange fails.
pub const FALLBACK_RESPONSE: &str = "Error while sending message";

impl Reply {
    /// The degraded reply handed to callers when an exchange fails.
    /// Note the empty transcript: callers must tolerate it.
    pub fn fallback() -> Self {
        Self {
            messages: Vec::new(),
            response: FALLBACK_RESPONSE.to_string(),
        }
    }
}
