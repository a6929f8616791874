//! Colours for the light and dark themes.
//!
//! Components take a `Palette` as a prop instead of hard-coding colours, so
//! flipping the theme is a single prop change at the top of `draw_ui`.

use ratatui::style::{Color, Modifier, Style};

use crate::conversation::Role;
use crate::core::theme::ThemePreference;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub user: Color,
    pub assistant: Color,
    pub other: Color,
    pub accent: Color,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        background: Color::White,
        foreground: Color::Black,
        muted: Color::Gray,
        user: Color::Blue,
        assistant: Color::Magenta,
        other: Color::Rgb(150, 110, 0),
        accent: Color::Cyan,
    };

    pub const DARK: Palette = Palette {
        background: Color::Rgb(24, 24, 27),
        foreground: Color::Rgb(228, 228, 231),
        muted: Color::DarkGray,
        user: Color::Green,
        assistant: Color::LightBlue,
        other: Color::Yellow,
        accent: Color::Cyan,
    };

    pub fn for_preference(preference: ThemePreference) -> Self {
        match preference {
            ThemePreference::Light => Self::LIGHT,
            ThemePreference::Dark => Self::DARK,
        }
    }

    /// Base style painted under everything.
    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn hint(&self) -> Style {
        Style::default().fg(self.muted).add_modifier(Modifier::ITALIC)
    }

    pub fn role(&self, role: &Role) -> Style {
        let fg = match role {
            Role::User => self.user,
            Role::Assistant => self.assistant,
            Role::Other(_) => self.other,
        };
        Style::default().fg(fg)
    }
}
