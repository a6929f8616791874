//! # Actions
//!
//! Everything that can happen in Parley becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The endpoint answers? That's `Action::ReplyReceived { exchange_id, outcome }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any I/O the caller must
//! perform. No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! The submit flow is a two-state machine:
//!
//! ```text
//!            Submit (non-blank)
//!   ┌──────┐ ─────────────────▶ ┌─────────┐
//!   │ Idle │                    │ Sending │ ── Submit → rejected
//!   └──────┘ ◀───────────────── └─────────┘
//!        ReplyReceived / CancelSend
//! ```

use log::{debug, info, warn};

use crate::conversation::{Message, Outcome, Role};
use crate::core::state::{App, Phase};
use crate::core::theme::ThemePreference;

#[derive(Debug)]
pub enum Action {
    /// The user submitted text from the input box.
    Submit(String),
    /// An exchange finished (success or fallback).
    ReplyReceived { exchange_id: u64, outcome: Outcome },
    /// The user gave up waiting on the in-flight exchange.
    CancelSend,
    ToggleTheme,
    /// Throw away all conversation state and start over.
    ResetSession,
    Quit,
}

/// I/O the event loop performs after an `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Start an exchange. `prior` is a snapshot of the transcript at submit time.
    SpawnExchange {
        exchange_id: u64,
        user_message: String,
        prior: Vec<Message>,
    },
    /// Abort the in-flight exchange task.
    AbortExchange,
    PersistTheme(ThemePreference),
    Reset,
    Quit,
}

pub const SENDING_STATUS: &str = "Waiting for reply...";
pub const BUSY_STATUS: &str = "Still waiting for a reply";

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => submit(app, text),
        Action::ReplyReceived {
            exchange_id,
            outcome,
        } => reply_received(app, exchange_id, outcome),
        Action::CancelSend => {
            if !app.is_sending() {
                return Effect::None;
            }
            info!("Exchange cancelled by user");
            app.phase = Phase::Idle;
            app.status_message = String::from("Cancelled");
            Effect::AbortExchange
        }
        Action::ToggleTheme => {
            app.theme = app.theme.toggled();
            app.status_message = format!("Theme: {}", app.theme.label());
            Effect::PersistTheme(app.theme)
        }
        Action::ResetSession => {
            info!(
                "Session reset ({} transcript messages discarded)",
                app.transcript.len()
            );
            Effect::Reset
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit(app: &mut App, text: String) -> Effect {
    let user_message = text.trim();
    if user_message.is_empty() {
        return Effect::None;
    }

    if app.is_sending() {
        debug!("Submit rejected: exchange already in flight");
        app.status_message = String::from(BUSY_STATUS);
        return Effect::None;
    }

    // Shown immediately; the transcript itself waits for the endpoint.
    app.display(Role::User, user_message);
    app.phase = Phase::Sending;
    app.status_message = String::from(SENDING_STATUS);
    app.exchange_id += 1;

    Effect::SpawnExchange {
        exchange_id: app.exchange_id,
        user_message: user_message.to_string(),
        prior: app.transcript.clone(),
    }
}

fn reply_received(app: &mut App, exchange_id: u64, outcome: Outcome) -> Effect {
    if !app.is_sending() || exchange_id != app.exchange_id {
        debug!(
            "Ignoring stale reply (exchange {}, current {}, sending: {})",
            exchange_id,
            app.exchange_id,
            app.is_sending()
        );
        return Effect::None;
    }

    let Outcome { reply, failure } = outcome;
    app.phase = Phase::Idle;

    match failure {
        Some(error) => {
            let kind = error.kind();
            warn!("Exchange failed ({}): {}", kind.label(), error);
            app.last_failure = Some(kind);
            app.status_message = format!("Send failed ({})", kind.label());
            if app.preserve_history_on_failure {
                debug!("Keeping {} transcript messages", app.transcript.len());
            } else {
                app.transcript = reply.messages;
            }
        }
        None => {
            app.last_failure = None;
            app.status_message = String::from("Ready");
            app.transcript = reply.messages;
        }
    }

    app.display(Role::Assistant, &reply.response);
    Effect::None
}
