//! UI theme: the frontend's colours in one place.
//!
//! Only the 16 base ANSI colours are used so every terminal renders the same palette.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct UiTheme {
    pub header_fg: Color,
    pub focus_border: Color,
    pub inactive_border: Color,
    pub gutter_fg: Color,
    pub tab_active_bg: Color,
    pub tab_active_fg: Color,
    pub tab_inactive_fg: Color,
    /// The unsaved marker next to a file name.
    pub unsaved_fg: Color,
    pub notice_fg: Color,
    pub status_fg: Color,
    pub palette_border: Color,
    pub palette_selected_bg: Color,
    pub palette_selected_fg: Color,
    pub palette_muted_fg: Color,
}

impl Default for UiTheme {
    fn default() -> Self {
        Self {
            header_fg: Color::Indexed(6),       // Cyan
            focus_border: Color::Indexed(6),    // Cyan
            inactive_border: Color::Indexed(8), // DarkGray
            gutter_fg: Color::Indexed(8),       // DarkGray
            tab_active_bg: Color::Indexed(8),   // DarkGray
            tab_active_fg: Color::Indexed(15),  // White
            tab_inactive_fg: Color::Indexed(7), // Gray
            unsaved_fg: Color::Indexed(1),      // Red
            notice_fg: Color::Indexed(3),       // Yellow
            status_fg: Color::Indexed(7),       // Gray
            palette_border: Color::Indexed(6),  // Cyan
            palette_selected_bg: Color::Indexed(8),
            palette_selected_fg: Color::Indexed(15),
            palette_muted_fg: Color::Indexed(8),
        }
    }
}

impl UiTheme {
    pub fn border(&self, focused: bool) -> Style {
        let fg = if focused {
            self.focus_border
        } else {
            self.inactive_border
        };
        Style::default().fg(fg)
    }

    /// `marked` underlines the entry Ctrl+W would close.
    pub fn tab(&self, active: bool, marked: bool) -> Style {
        let style = if active {
            Style::default()
                .bg(self.tab_active_bg)
                .fg(self.tab_active_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.tab_inactive_fg)
        };
        if marked {
            style.add_modifier(Modifier::UNDERLINED)
        } else {
            style
        }
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.palette_selected_bg)
            .fg(self.palette_selected_fg)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/theme.rs"]
mod tests;
