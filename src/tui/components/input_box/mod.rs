//! # InputBox Component
//!
//! Captures the user's next message.
//!
//! - Text editing (insert, paste, backspace, delete, left/right/home/end)
//! - Submission on Enter, only for non-blank text
//! - Locked while an exchange is in flight: typing still works, Enter
//!   doesn't, so a second message can be drafted but not sent
//!
//! The buffer is internal state. `locked` and `palette` are props.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

use cursor::CursorState;
use text_wrap::{
    MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width, next_char_boundary, prev_char_boundary,
    wrap_line_count, wrap_options,
};

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed). The buffer has been cleared.
    Submit(String),
    /// Enter was pressed while locked; the buffer is kept.
    SubmitBlocked,
    ContentChanged,
}

pub struct InputBox {
    pub buffer: String,
    /// True while an exchange is in flight (Prop)
    pub locked: bool,
    pub palette: Palette,
    cursor: CursorState,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            locked: false,
            palette: Palette::LIGHT,
            cursor: CursorState::new(),
        }
    }

    /// Height for the current buffer, between one and `MAX_VISIBLE_LINES`
    /// content lines plus borders.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let lines = wrap_line_count(&self.buffer, inner_width(area_width));
        lines.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// The wrapped lines currently inside the box's window.
    fn visible_text(&self, area_width: u16) -> String {
        let width = inner_width(area_width);
        if width == 0 {
            return String::new();
        }
        textwrap::wrap(&self.buffer, wrap_options(width))
            .iter()
            .skip(self.cursor.scroll_offset as usize)
            .take(MAX_VISIBLE_LINES as usize)
            .map(|l| l.as_ref())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn title(&self) -> &'static str {
        if self.locked {
            "Message (waiting for reply, Enter disabled)"
        } else {
            "Message"
        }
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.update_scroll_offset(&self.buffer, area.width);

        let border_style = if self.locked {
            self.palette.hint()
        } else {
            self.palette.role(&crate::conversation::Role::User)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title())
            .padding(Padding::horizontal(1));

        let input = Paragraph::new(self.visible_text(area.width))
            .block(block)
            .style(self.palette.base());
        frame.render_widget(input, area);

        frame.set_cursor_position(self.cursor.screen_pos(&self.buffer, area));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let pos = self.cursor.pos;
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(pos, *c);
                self.cursor.pos += c.len_utf8();
            }
            TuiEvent::Paste(text) => {
                // Normalize CRLF pastes so the cursor math stays in step
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.buffer.insert_str(pos, &text);
                self.cursor.pos += text.len();
            }
            TuiEvent::Backspace if pos > 0 => {
                let prev = prev_char_boundary(&self.buffer, pos);
                self.buffer.drain(prev..pos);
                self.cursor.pos = prev;
            }
            TuiEvent::Delete if pos < self.buffer.len() => {
                let next = next_char_boundary(&self.buffer, pos);
                self.buffer.drain(pos..next);
            }
            TuiEvent::CursorLeft if pos > 0 => {
                self.cursor.pos = prev_char_boundary(&self.buffer, pos);
            }
            TuiEvent::CursorRight if pos < self.buffer.len() => {
                self.cursor.pos = next_char_boundary(&self.buffer, pos);
            }
            TuiEvent::CursorHome => {
                self.cursor.pos = self.buffer[..pos].rfind('\n').map_or(0, |i| i + 1);
            }
            TuiEvent::CursorEnd => {
                self.cursor.pos = self.buffer[pos..]
                    .find('\n')
                    .map_or(self.buffer.len(), |i| pos + i);
            }
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    return None;
                }
                if self.locked {
                    return Some(InputEvent::SubmitBlocked);
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor.reset();
                return Some(InputEvent::Submit(text));
            }
            _ => return None,
        }
        Some(InputEvent::ContentChanged)
    }
}
