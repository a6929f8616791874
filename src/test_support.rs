//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::conversation::{ConversationClient, Message, Reply, SendError};
use crate::core::state::App;
use crate::core::theme::ThemePreference;

/// A client that answers every exchange with the same canned result and
/// records what it was asked.
pub struct ScriptedClient {
    result: Result<Reply, SendError>,
    pub calls: Mutex<Vec<(String, Vec<Message>)>>,
}

impl ScriptedClient {
    pub fn replying(reply: Reply) -> Self {
        Self {
            result: Ok(reply),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: SendError) -> Self {
        Self {
            result: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ConversationClient for ScriptedClient {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn exchange(&self, user_message: &str, prior: &[Message]) -> Result<Reply, SendError> {
        self.calls
            .lock()
            .unwrap()
            .push((user_message.to_string(), prior.to_vec()));
        self.result.clone()
    }
}

/// Creates a test App backed by a client that echoes nothing useful.
pub fn test_app() -> App {
    let client = ScriptedClient::replying(Reply {
        messages: Vec::new(),
        response: String::new(),
    });
    App::new(Arc::new(client), ThemePreference::Light)
}

/// A fresh path under the system temp dir, unique to this process and
/// `name`. Any leftover file from an earlier run is removed.
pub fn scratch_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("parley-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = std::fs::remove_file(&path);
    path
}
