// Colors for each theme.
// Every view draws through a palette so the theme toggle applies everywhere at once.

use ratatui::style::{Color, Modifier, Style};

use crate::state::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub link: Color,
    pub selection: Color,
    pub warning: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::White,
                text: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                link: Color::Magenta,
                selection: Color::Rgb(220, 220, 235),
                warning: Color::Rgb(180, 120, 0),
                error: Color::Red,
            },
            Theme::Dark => Self {
                background: Color::Black,
                text: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                link: Color::LightMagenta,
                selection: Color::DarkGray,
                warning: Color::Yellow,
                error: Color::LightRed,
            },
        }
    }

    /// Base style for page backgrounds.
    pub fn base(&self) -> Style {
        Style::default().bg(self.background).fg(self.text)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn heading(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .bg(self.selection)
            .add_modifier(Modifier::BOLD)
    }
}
