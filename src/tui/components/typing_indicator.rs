//! # TypingIndicator Component
//!
//! One-line footer under the transcript. While an exchange is in flight it
//! shows an animated "Assistant is typing" line and hides the send hint;
//! otherwise it shows the key hints, including how to send.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::theme::Palette;

pub const IDLE_HINT: &str = "Enter send · Ctrl+J newline · Ctrl+T theme · Ctrl+N new chat · Ctrl+Q quit";
pub const TYPING_TEXT: &str = "Assistant is typing";
pub const CANCEL_HINT: &str = "Esc cancel";

const DOT_FRAMES: [&str; 4] = ["   ", ".  ", ".. ", "..."];

pub struct TypingIndicator {
    pub active: bool,
    /// Animation tick, advanced by the event loop while active
    pub frame_index: usize,
    pub palette: Palette,
}

impl TypingIndicator {
    pub fn new(active: bool, frame_index: usize, palette: Palette) -> Self {
        Self {
            active,
            frame_index,
            palette,
        }
    }

    fn line(&self) -> Line<'static> {
        if self.active {
            let dots = DOT_FRAMES[self.frame_index % DOT_FRAMES.len()];
            Line::from(vec![
                Span::styled(
                    format!("{TYPING_TEXT}{dots}"),
                    self.palette.role(&crate::conversation::Role::Assistant),
                ),
                Span::styled(format!("  {CANCEL_HINT}"), self.palette.hint()),
            ])
        } else {
            Line::from(Span::styled(IDLE_HINT, self.palette.hint()))
        }
    }
}

impl Component for TypingIndicator {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new(self.line()), area);
    }
}
