//! Cursor position and internal scroll for the InputBox.
//!
//! The text lives in `InputBox::buffer`; every method here takes it as a
//! parameter so the dependency stays visible.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use super::text_wrap::{
    CONTENT_OFFSET_X, CONTENT_OFFSET_Y, MAX_VISIBLE_LINES, inner_width, wrap_line_count,
    wrap_options,
};

pub(super) struct CursorState {
    /// Byte offset into the buffer (always on a char boundary)
    pub pos: usize,
    /// First visible wrapped line when the content is taller than the box
    pub scroll_offset: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// (wrapped line, display column) of the cursor.
    fn line_and_column(&self, buffer: &str, width: u16) -> (u16, u16) {
        let before = &buffer[..self.pos];
        let lines = textwrap::wrap(before, wrap_options(width));
        let mut line = lines.len().saturating_sub(1) as u16;

        // Column counted from the last logical line start: textwrap trims
        // trailing spaces, which would put the cursor behind typed spaces.
        let logical_start = before.rfind('\n').map_or(0, |i| i + 1);
        let logical = &before[logical_start..];
        let segments = textwrap::wrap(logical, wrap_options(width));
        let consumed: usize = segments
            .iter()
            .take(segments.len().saturating_sub(1))
            .map(|seg| seg.width())
            .sum();
        let column = logical.width().saturating_sub(consumed) as u16;

        // A trailing newline starts a line textwrap doesn't report
        if before.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
            line += 1;
        }

        (line, column)
    }

    /// Keep the cursor's line inside the visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, area_width: u16) {
        let width = inner_width(area_width);
        if width == 0 || wrap_line_count(buffer, width) <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let (line, _) = self.line_and_column(buffer, width);
        if line < self.scroll_offset {
            self.scroll_offset = line;
        } else if line >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = line + 1 - MAX_VISIBLE_LINES;
        }
    }

    /// Screen (x, y) of the cursor inside `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        if width == 0 {
            return (area.x + CONTENT_OFFSET_X, area.y + CONTENT_OFFSET_Y);
        }
        let (line, column) = self.line_and_column(buffer, width);
        (
            area.x + CONTENT_OFFSET_X + column.min(width),
            area.y + CONTENT_OFFSET_Y + line.saturating_sub(self.scroll_offset),
        )
    }
}
