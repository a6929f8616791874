//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Sending**: draws every ~80ms so the typing indicator animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
mod theme;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::ops::ControlFlow;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::conversation::{ConversationClient, HttpConversationClient, Message, SendError};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::core::theme::ThemePreference;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Build the HTTP client for the resolved endpoint.
pub fn build_client(config: &ResolvedConfig) -> Result<Arc<dyn ConversationClient>, SendError> {
    let client = HttpConversationClient::new(config.endpoint_url.clone(), config.request_timeout)?;
    Ok(Arc::new(client))
}

/// Read the stored theme preference, as a page load would.
fn load_theme(config: &ResolvedConfig) -> ThemePreference {
    config
        .theme_store()
        .map(|store| store.load())
        .unwrap_or_default()
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let client = build_client(&config).map_err(std::io::Error::other)?;
    info!("Talking to {}", client.name());

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Theme is known before the first frame is drawn
    let mut session = Session::new(client, config, tx);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        let animating = session.app.is_sending();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let frame_index = (start_time.elapsed().as_secs_f32() * 4.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &session.app, &mut session.tui, frame_index))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before next draw.
        // Each one is fully applied before the next is routed.
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if session.handle_event(&event).is_break() {
                break 'main;
            }
        }

        // Background task results
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if session.apply(action).is_break() {
                break 'main;
            }
        }
    }

    session.abort_exchange();
    ratatui::restore();
    Ok(())
}

/// Everything the event loop mutates between frames.
struct Session {
    config: ResolvedConfig,
    app: App,
    tui: TuiState,
    /// Abort handle for the in-flight exchange (Esc and Ctrl+N)
    active_exchange: Option<AbortHandle>,
    tx: mpsc::Sender<Action>,
}

impl Session {
    fn new(
        client: Arc<dyn ConversationClient>,
        config: ResolvedConfig,
        tx: mpsc::Sender<Action>,
    ) -> Self {
        let app = App::from_config(client, &config, load_theme(&config));
        Self {
            config,
            app,
            tui: TuiState::new(),
            active_exchange: None,
            tx,
        }
    }

    fn handle_event(&mut self, event: &TuiEvent) -> ControlFlow<()> {
        match route_event(event, &mut self.tui) {
            Some(action) => self.apply(action),
            None => ControlFlow::Continue(()),
        }
    }

    /// Run one action through `update()` and perform its effect.
    fn apply(&mut self, action: Action) -> ControlFlow<()> {
        let flow = match update(&mut self.app, action) {
            Effect::None => ControlFlow::Continue(()),
            Effect::SpawnExchange {
                exchange_id,
                user_message,
                prior,
            } => {
                let handle =
                    spawn_exchange(&self.app, exchange_id, user_message, prior, self.tx.clone());
                self.active_exchange = Some(handle);
                ControlFlow::Continue(())
            }
            Effect::AbortExchange => {
                self.abort_exchange();
                ControlFlow::Continue(())
            }
            Effect::PersistTheme(preference) => {
                persist_theme(&self.config, preference);
                ControlFlow::Continue(())
            }
            Effect::Reset => {
                self.reset_session();
                ControlFlow::Continue(())
            }
            Effect::Quit => ControlFlow::Break(()),
        };
        // Enter must be locked for the very next event, not the next frame
        self.tui.input_box.locked = self.app.is_sending();
        flow
    }

    /// Start over as a page reload would: fresh state, theme re-read from
    /// disk. The exchange counter survives so replies already queued for the
    /// old session stay stale.
    fn reset_session(&mut self) {
        self.abort_exchange();
        let exchange_id = self.app.exchange_id;
        self.app = App::from_config(
            self.app.client.clone(),
            &self.config,
            load_theme(&self.config),
        );
        self.app.exchange_id = exchange_id;
        self.tui = TuiState::new();
        info!("Session reset complete");
    }

    fn abort_exchange(&mut self) {
        if let Some(handle) = self.active_exchange.take() {
            debug!("Aborting in-flight exchange");
            handle.abort();
        }
    }
}

/// Turn a terminal event into at most one core action. Purely local events
/// (editing, scrolling) are consumed by the components here.
fn route_event(event: &TuiEvent, tui: &mut TuiState) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit | TuiEvent::Quit => Some(Action::Quit),
        TuiEvent::Escape => Some(Action::CancelSend),
        TuiEvent::ToggleTheme => Some(Action::ToggleTheme),
        TuiEvent::ResetSession => Some(Action::ResetSession),
        TuiEvent::Resize => None,
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.message_list.handle_event(event);
            None
        }
        _ => match tui.input_box.handle_event(event)? {
            InputEvent::Submit(text) => Some(Action::Submit(text)),
            // Re-submitted so the core can report that it is still busy
            InputEvent::SubmitBlocked => Some(Action::Submit(tui.input_box.buffer.clone())),
            InputEvent::ContentChanged => None,
        },
    }
}

fn spawn_exchange(
    app: &App,
    exchange_id: u64,
    user_message: String,
    prior: Vec<Message>,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!(
        "Spawning exchange {} ({} prior messages) to {}",
        exchange_id,
        prior.len(),
        app.endpoint_name()
    );
    let client = app.client.clone();
    let handle = tokio::spawn(async move {
        let outcome = client.send_message(&user_message, &prior).await;
        let action = Action::ReplyReceived {
            exchange_id,
            outcome,
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver reply: receiver dropped");
        }
    });
    handle.abort_handle()
}

fn persist_theme(config: &ResolvedConfig, preference: ThemePreference) {
    let Some(store) = config.theme_store() else {
        debug!("No theme file configured, preference not persisted");
        return;
    };
    match store.save(preference) {
        Ok(()) => info!("Theme preference saved: {}", preference.label()),
        Err(e) => warn!(
            "Failed to save theme preference to {}: {}",
            store.path().display(),
            e
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Role;
    use crate::core::config::{ParleyConfig, resolve};
    use crate::core::state::Phase;
    use crate::core::theme::ThemeStore;
    use crate::test_support::{scratch_path, test_app};

    /// A session over the scripted client, with its theme file at `theme_file`.
    fn test_session(theme_file: &str) -> (Session, mpsc::Receiver<Action>) {
        let mut config = resolve(&ParleyConfig::default(), &Default::default());
        config.theme_path = Some(scratch_path(theme_file));
        let (tx, rx) = mpsc::channel();
        (Session::new(test_app().client, config, tx), rx)
    }

    fn feed(session: &mut Session, events: &[TuiEvent]) {
        for event in events {
            assert!(session.handle_event(event).is_continue());
        }
    }

    fn chars(text: &str) -> Vec<TuiEvent> {
        text.chars().map(TuiEvent::InputChar).collect()
    }

    fn type_text(tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            assert!(route_event(&TuiEvent::InputChar(c), tui).is_none());
        }
    }

    #[test]
    fn test_enter_submits_typed_text() {
        let mut tui = TuiState::new();
        type_text(&mut tui, "hello");

        match route_event(&TuiEvent::Submit, &mut tui) {
            Some(Action::Submit(text)) => assert_eq!(text, "hello"),
            other => panic!("Expected Submit, got {other:?}"),
        }
        assert!(tui.input_box.buffer.is_empty());
    }

    #[test]
    fn test_blank_enter_produces_no_action() {
        let mut tui = TuiState::new();
        type_text(&mut tui, "  ");
        assert!(route_event(&TuiEvent::Submit, &mut tui).is_none());
    }

    #[test]
    fn test_locked_enter_keeps_draft_and_reports_busy() {
        let mut app = crate::test_support::test_app();
        let mut tui = TuiState::new();
        update(&mut app, Action::Submit("first".to_string()));
        tui.input_box.locked = app.is_sending();
        type_text(&mut tui, "second");

        let action = route_event(&TuiEvent::Submit, &mut tui).unwrap();
        let view_len = app.view.len();
        assert_eq!(update(&mut app, action), Effect::None);
        assert_eq!(app.status_message, crate::core::action::BUSY_STATUS);
        assert_eq!(app.view.len(), view_len);
        assert_eq!(tui.input_box.buffer, "second");
    }

    #[test]
    fn test_global_keys_map_to_actions() {
        let mut tui = TuiState::new();
        assert!(matches!(route_event(&TuiEvent::ForceQuit, &mut tui), Some(Action::Quit)));
        assert!(matches!(route_event(&TuiEvent::Quit, &mut tui), Some(Action::Quit)));
        assert!(matches!(
            route_event(&TuiEvent::Escape, &mut tui),
            Some(Action::CancelSend)
        ));
        assert!(matches!(
            route_event(&TuiEvent::ToggleTheme, &mut tui),
            Some(Action::ToggleTheme)
        ));
        assert!(matches!(
            route_event(&TuiEvent::ResetSession, &mut tui),
            Some(Action::ResetSession)
        ));
    }

    #[test]
    fn test_scroll_up_unpins_message_list() {
        let mut tui = TuiState::new();
        assert!(route_event(&TuiEvent::ScrollUp, &mut tui).is_none());
        assert!(!tui.message_list.stick_to_bottom);
        route_event(&TuiEvent::ScrollToBottom, &mut tui);
        assert!(tui.message_list.stick_to_bottom);
    }

    #[tokio::test]
    async fn test_spawned_exchange_reports_back() {
        let mut app = crate::test_support::test_app();
        let (tx, rx) = mpsc::channel();
        let effect = update(&mut app, Action::Submit("hello".to_string()));
        let Effect::SpawnExchange {
            exchange_id,
            user_message,
            prior,
        } = effect
        else {
            panic!("Expected SpawnExchange, got {effect:?}");
        };

        let handle = spawn_exchange(&app, exchange_id, user_message, prior, tx);
        while !handle.is_finished() {
            tokio::task::yield_now().await;
        }
        let action = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        update(&mut app, action);
        assert!(!app.is_sending());
    }

    #[tokio::test]
    async fn test_second_enter_in_one_batch_keeps_draft() {
        let (mut session, _rx) = test_session("batch-theme");

        // Enter, more typing, Enter: all drained before the next frame
        let mut batch = chars("first");
        batch.push(TuiEvent::Submit);
        batch.extend(chars("second"));
        batch.push(TuiEvent::Submit);
        feed(&mut session, &batch);

        assert!(session.app.is_sending());
        assert!(session.tui.input_box.locked);
        assert_eq!(session.tui.input_box.buffer, "second");
        assert_eq!(session.app.view.len(), 1);
        assert_eq!(session.app.status_message, crate::core::action::BUSY_STATUS);
        session.abort_exchange();
    }

    #[tokio::test]
    async fn test_reset_session_starts_over() {
        let (mut session, _rx) = test_session("reset-theme");
        feed(&mut session, &chars("hello"));
        feed(&mut session, &[TuiEvent::Submit]);
        feed(&mut session, &chars("draft"));
        session.app.transcript = vec![crate::conversation::Message::user("hello")];
        let exchange_id = session.app.exchange_id;

        // Theme changed on disk since start-up; reset picks it up
        if let Some(path) = session.config.theme_path.clone() {
            ThemeStore::new(path).save(ThemePreference::Dark).unwrap();
        }

        feed(&mut session, &[TuiEvent::ResetSession]);

        assert!(session.app.transcript.is_empty());
        assert!(session.app.view.is_empty());
        assert_eq!(session.app.phase, Phase::Idle);
        assert!(session.tui.input_box.buffer.is_empty());
        assert!(!session.tui.input_box.locked);
        assert!(session.active_exchange.is_none());
        assert_eq!(session.app.theme, ThemePreference::Dark);
        assert_eq!(session.app.exchange_id, exchange_id);
    }

    #[tokio::test]
    async fn test_reply_queued_before_reset_is_ignored() {
        let (mut session, _rx) = test_session("stale-theme");
        feed(&mut session, &chars("A"));
        feed(&mut session, &[TuiEvent::Submit]);
        let old_exchange = session.app.exchange_id;
        feed(&mut session, &[TuiEvent::ResetSession]);
        feed(&mut session, &chars("B"));
        feed(&mut session, &[TuiEvent::Submit]);

        let late = Action::ReplyReceived {
            exchange_id: old_exchange,
            outcome: crate::conversation::Outcome::succeeded(crate::conversation::Reply {
                messages: vec![crate::conversation::Message::user("A")],
                response: "answer to A".to_string(),
            }),
        };
        assert!(session.apply(late).is_continue());

        assert!(session.app.is_sending());
        assert!(session.app.transcript.is_empty());
        assert_eq!(session.app.view.len(), 1);
        assert_eq!(session.app.view[0].role, Role::User);
        assert_eq!(session.app.view[0].content, "B");
        session.abort_exchange();
    }

    #[tokio::test]
    async fn test_quit_breaks_the_loop() {
        let (mut session, _rx) = test_session("quit-theme");
        assert!(session.handle_event(&TuiEvent::Quit).is_break());
        assert!(session.handle_event(&TuiEvent::ForceQuit).is_break());
    }
}
