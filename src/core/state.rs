//! # Application State
//!
//! Core business state for Parley. No TUI types in here; presentation state
//! lives in the `tui` module.
//!
//! ```text
//! App
//! ├── client: Arc<dyn ConversationClient>  // the endpoint
//! ├── transcript: Vec<Message>             // server-authoritative history
//! ├── view: Vec<ViewEntry>                 // what has been displayed
//! ├── phase: Phase                         // Idle | Sending
//! ├── status_message: String               // status bar text
//! ├── theme: ThemePreference               // light | dark
//! ├── last_failure: Option<FailureKind>    // cause of the last fallback
//! └── preserve_history_on_failure: bool
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::conversation::{ConversationClient, FailureKind, Message, Role};
use crate::core::config::ResolvedConfig;
use crate::core::theme::ThemePreference;
use crate::core::view::ViewEntry;

pub const WELCOME_STATUS: &str = "Welcome to Parley!";

/// Whether an exchange is in flight. At most one ever is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Sending,
}

pub struct App {
    pub client: Arc<dyn ConversationClient>,
    pub transcript: Vec<Message>,
    pub view: Vec<ViewEntry>,
    pub phase: Phase,
    pub status_message: String,
    pub theme: ThemePreference,
    pub last_failure: Option<FailureKind>,
    /// Id of the most recently started exchange. Replies tagged with any
    /// other id are stale.
    pub exchange_id: u64,
    /// Keep the previous transcript when an exchange fails instead of
    /// adopting the fallback's empty one.
    pub preserve_history_on_failure: bool,
}

impl App {
    pub fn new(client: Arc<dyn ConversationClient>, theme: ThemePreference) -> Self {
        Self {
            client,
            transcript: Vec::new(),
            view: Vec::new(),
            phase: Phase::Idle,
            status_message: String::from(WELCOME_STATUS),
            theme,
            last_failure: None,
            exchange_id: 0,
            preserve_history_on_failure: false,
        }
    }

    pub fn from_config(
        client: Arc<dyn ConversationClient>,
        config: &ResolvedConfig,
        theme: ThemePreference,
    ) -> Self {
        Self {
            preserve_history_on_failure: config.preserve_history_on_failure,
            ..Self::new(client, theme)
        }
    }

    pub fn is_sending(&self) -> bool {
        self.phase == Phase::Sending
    }

    /// Append a labelled entry to the view. Content is escaped first.
    pub fn display(&mut self, role: Role, content: &str) {
        self.view.push(ViewEntry::new(role, content));
    }

    pub fn endpoint_name(&self) -> &str {
        self.client.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{ParleyConfig, resolve};
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, WELCOME_STATUS);
        assert_eq!(app.phase, Phase::Idle);
        assert!(app.transcript.is_empty());
        assert!(app.view.is_empty());
        assert_eq!(app.theme, ThemePreference::Light);
        assert_eq!(app.endpoint_name(), "scripted");
    }

    #[test]
    fn test_display_appends_escaped_entry() {
        let mut app = test_app();
        app.display(Role::User, "one");
        app.display(Role::Assistant, "\u{1b}[1mtwo");
        assert_eq!(app.view.len(), 2);
        assert_eq!(app.view[1].content, "two");
        // Displaying never touches the transcript
        assert!(app.transcript.is_empty());
    }

    #[test]
    fn test_from_config_carries_failure_policy_and_theme() {
        let mut config = resolve(&ParleyConfig::default(), &Default::default());
        config.preserve_history_on_failure = true;
        let app = App::from_config(test_app().client, &config, ThemePreference::Dark);
        assert!(app.preserve_history_on_failure);
        assert!(app.theme.is_dark());
    }
}
