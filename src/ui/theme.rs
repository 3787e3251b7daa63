//! Theme and styling configuration.

use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the application.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Accent color for titles and focused labels.
    pub accent: Color,
    /// Default border color.
    pub border: Color,
    /// Border color of the focused widget.
    pub border_focused: Color,
    /// Foreground of selected rows and pressed buttons.
    pub selection_fg: Color,
    /// Background of selected rows.
    pub selection_bg: Color,
    /// Muted text (placeholders, hints).
    pub muted: Color,
    /// Success color.
    pub success: Color,
    /// Warning color.
    pub warning: Color,
    /// Error color.
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            accent: Color::Cyan,
            border: Color::DarkGray,
            border_focused: Color::Yellow,
            selection_fg: Color::Black,
            selection_bg: Color::Cyan,
            muted: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }
}

impl Theme {
    /// Style for table headers.
    pub fn header_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Style for the selected table row.
    pub fn selected_style(&self) -> Style {
        Style::default().fg(self.selection_fg).bg(self.selection_bg)
    }
}

static THEME: OnceLock<Theme> = OnceLock::new();

/// Get the active theme.
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_is_shared() {
        assert!(std::ptr::eq(theme(), theme()));
    }

    #[test]
    fn test_selected_style_uses_selection_colors() {
        let t = Theme::default();
        let style = t.selected_style();
        assert_eq!(style.fg, Some(t.selection_fg));
        assert_eq!(style.bg, Some(t.selection_bg));
    }
}
