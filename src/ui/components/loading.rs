//! Loading indicator component.
//!
//! An animated spinner shown while a screen waits for its initial fetch.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::theme;

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A loading indicator with an animated spinner.
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    /// The message to display.
    message: String,
    /// Current spinner frame index.
    frame: usize,
    /// Whether the loading indicator is active.
    active: bool,
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self::with_message("Loading...")
    }
}

impl LoadingIndicator {
    /// Create a loading indicator with a custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            frame: 0,
            active: false,
        }
    }

    /// Get the current message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Start the loading indicator.
    pub fn start(&mut self) {
        self.active = true;
        self.frame = 0;
    }

    /// Stop the loading indicator.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Check if the loading indicator is active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the spinner animation. Called on each tick.
    pub fn tick(&mut self) {
        if self.active {
            self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
        }
    }

    /// Get the current spinner frame.
    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.frame]
    }

    /// Render the loading indicator centered in the given area.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.active {
            return;
        }

        let text = format!("{} {}", self.spinner_frame(), self.message);
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(theme().accent))
            .alignment(Alignment::Center);

        let y = area.y + area.height / 2;
        frame.render_widget(paragraph, Rect::new(area.x, y, area.width, 1.min(area.height)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_stop() {
        let mut loading = LoadingIndicator::with_message("Loading students...");
        assert!(!loading.is_active());
        loading.start();
        assert!(loading.is_active());
        loading.stop();
        assert!(!loading.is_active());
        assert_eq!(loading.message(), "Loading students...");
    }

    #[test]
    fn test_tick_only_when_active() {
        let mut loading = LoadingIndicator::default();
        loading.tick();
        assert_eq!(loading.spinner_frame(), SPINNER_FRAMES[0]);

        loading.start();
        loading.tick();
        assert_eq!(loading.spinner_frame(), SPINNER_FRAMES[1]);
    }

    #[test]
    fn test_tick_wraps() {
        let mut loading = LoadingIndicator::default();
        loading.start();
        for _ in 0..SPINNER_FRAMES.len() {
            loading.tick();
        }
        assert_eq!(loading.spinner_frame(), SPINNER_FRAMES[0]);
    }
}
