//! Card color palettes
//!
//! Theme selection affects colors only; layout is identical across
//! themes.

use playcard_common::options::Theme;
use ratatui::style::{Color, Modifier, Style};

/// Resolved colors for one theme
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub border: Color,
    pub dim: Color,
    pub accent: Color,
    pub danger: Color,
    /// Media viewport backdrop (dark in both themes)
    pub viewport_bg: Color,
    pub viewport_fg: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                fg: Color::White,
                bg: Color::Black,
                border: Color::DarkGray,
                dim: Color::Gray,
                accent: Color::Blue,
                danger: Color::Red,
                viewport_bg: Color::Black,
                viewport_fg: Color::White,
            },
            Theme::Light => Self {
                fg: Color::Black,
                bg: Color::White,
                border: Color::Gray,
                dim: Color::DarkGray,
                accent: Color::Blue,
                danger: Color::Red,
                viewport_bg: Color::Black,
                viewport_fg: Color::White,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::new().fg(self.fg).bg(self.bg)
    }

    pub fn dim_text(&self) -> Style {
        Style::new().fg(self.dim).bg(self.bg)
    }

    pub fn title(&self) -> Style {
        Style::new()
            .fg(self.fg)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn button(&self) -> Style {
        Style::new().fg(self.fg).bg(self.bg)
    }

    pub fn button_active(&self) -> Style {
        Style::new()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn viewport(&self) -> Style {
        Style::new().fg(self.viewport_fg).bg(self.viewport_bg)
    }

    pub fn danger_text(&self) -> Style {
        Style::new().fg(self.danger).bg(self.bg)
    }
}
