use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::view::ViewEntry;
use crate::tui::component::Component;
use crate::tui::theme::Palette;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders one view entry as a role-labelled block.
///
/// `Message` is transient: `MessageList` creates one per visible entry each
/// frame. The border and title take the role's colour from the palette; the
/// body uses the palette foreground so long replies stay readable in both
/// themes.
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered height
/// with `textwrap` options matching Ratatui's `Paragraph` wrapping, so the list
/// can lay out scroll positions without rendering.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub entry: &'a ViewEntry,
    pub palette: Palette,
    /// The newest entry is drawn with a bright border, older ones dimmed.
    pub is_latest: bool,
}

impl<'a> Message<'a> {
    pub fn new(entry: &'a ViewEntry, palette: Palette, is_latest: bool) -> Self {
        Self {
            entry,
            palette,
            is_latest,
        }
    }

    /// Calculate the height required for this entry given a width.
    pub fn calculate_height(entry: &ViewEntry, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding; still occupy a row.
            return 1;
        }

        let content = entry.content.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let role_style = self.palette.role(&self.entry.role);
        let border_style = if self.is_latest {
            role_style.add_modifier(Modifier::BOLD)
        } else {
            role_style.add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .title(self.entry.role.label())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.entry.content.trim())
            .style(self.palette.base())
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
