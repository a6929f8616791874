//! # TitleBar Component
//!
//! Top status bar: endpoint, status message, the dark-mode switch, and a
//! "↓ New" marker when entries exist below the scroll position.
//!
//! Purely presentational. All fields are props:
//! - `endpoint`: Core App state (configuration)
//! - `status_message`: Core App state
//! - `theme`: Core App state (the switch position)
//! - `has_unseen_content`: TUI state (scroll position)
//!
//! Sections are joined with ` | ` and empty ones are skipped, so the
//! endpoint stays visible on narrow terminals.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::Span;

use crate::core::theme::ThemePreference;
use crate::tui::component::Component;
use crate::tui::theme::Palette;

pub struct TitleBar {
    pub endpoint: String,
    pub status_message: String,
    pub theme: ThemePreference,
    pub has_unseen_content: bool,
    pub palette: Palette,
}

impl TitleBar {
    pub fn new(
        endpoint: String,
        status_message: String,
        theme: ThemePreference,
        has_unseen_content: bool,
    ) -> Self {
        Self {
            endpoint,
            status_message,
            theme,
            has_unseen_content,
            palette: Palette::for_preference(theme),
        }
    }

    fn text(&self) -> String {
        let mut parts = vec![format!("Parley ({})", self.endpoint)];
        if !self.status_message.is_empty() {
            parts.push(self.status_message.clone());
        }
        let switch = if self.theme.is_dark() { "on" } else { "off" };
        parts.push(format!("Dark mode [{switch}]"));
        if self.has_unseen_content {
            parts.push("↓ New".to_string());
        }
        parts.join(" | ")
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = self
            .palette
            .base()
            .fg(self.palette.accent)
            .add_modifier(Modifier::BOLD);
        frame.render_widget(Span::styled(self.text(), style), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(mut title_bar: TitleBar) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 1)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                title_bar.render(f, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_title_bar_shows_endpoint_status_and_switch() {
        let text = rendered(TitleBar::new(
            "http://localhost:8080/conversation".to_string(),
            "Ready".to_string(),
            ThemePreference::Dark,
            false,
        ));
        assert!(text.contains("Parley (http://localhost:8080/conversation)"));
        assert!(text.contains("Ready"));
        assert!(text.contains("Dark mode [on]"));
        assert!(!text.contains("↓ New"));
    }

    #[test]
    fn test_title_bar_light_with_unseen_content() {
        let text = rendered(TitleBar::new(
            "e".to_string(),
            String::new(),
            ThemePreference::Light,
            true,
        ));
        assert!(text.contains("Dark mode [off]"));
        assert!(text.contains("↓ New"));
    }

    #[test]
    fn test_empty_status_is_skipped() {
        let bar = TitleBar::new("e".to_string(), String::new(), ThemePreference::Light, false);
        assert_eq!(bar.text(), "Parley (e) | Dark mode [off]");
    }
}
