//! Search bar component for filtering the student table.
//!
//! Holds the search term and whether the user is currently typing into it.
//! The filtering itself lives on `Student::matches_search`; this component
//! only edits the term and highlights matches in rendered cells.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};

use super::input::TextInput;
use crate::ui::theme::theme;

/// Outcome of a key press in the search bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchAction {
    /// The term changed; the filtered rows must be recomputed.
    Changed,
    /// Typing finished; the term stays applied.
    Done,
    /// Nothing changed.
    None,
}

/// Search bar state.
#[derive(Debug, Clone)]
pub struct SearchBar {
    input: TextInput,
    active: bool,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBar {
    /// Create an empty, inactive search bar.
    pub fn new() -> Self {
        let mut input = TextInput::new();
        input.set_placeholder("Search students...");
        Self {
            input,
            active: false,
        }
    }

    /// Start typing into the search bar, keeping the current term.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Check if search mode is active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Get the current search term.
    pub fn query(&self) -> &str {
        self.input.value()
    }

    /// Replace the search term.
    pub fn set_query(&mut self, query: &str) {
        self.input.set_value(query);
    }

    /// Insert pasted text into the term.
    pub fn paste(&mut self, text: &str) -> SearchAction {
        let before = self.input.value().len();
        self.input.insert_str(text);
        if self.input.value().len() == before {
            SearchAction::None
        } else {
            SearchAction::Changed
        }
    }

    /// Handle a key while the search bar is active.
    pub fn handle_input(&mut self, key: KeyEvent) -> SearchAction {
        match key.code {
            KeyCode::Enter => {
                self.active = false;
                SearchAction::Done
            }
            KeyCode::Esc => {
                self.active = false;
                if self.input.is_empty() {
                    SearchAction::Done
                } else {
                    self.input.clear();
                    SearchAction::Changed
                }
            }
            _ => {
                if self.input.handle_input(key) {
                    SearchAction::Changed
                } else {
                    SearchAction::None
                }
            }
        }
    }

    /// Render the search bar.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        self.input.render_with_label(frame, area, "Search", self.active);
    }
}

/// Highlight occurrences of `query` in `text`, ignoring case.
///
/// Each character is lowercased on its own, so a match always maps back to
/// whole characters of `text` even when lowercasing changes their width.
pub fn highlight_text(text: &str, query: &str) -> Line<'static> {
    if query.is_empty() {
        return Line::from(text.to_string());
    }
    let needle: String = query.chars().flat_map(char::to_lowercase).collect();

    let mut folded = String::with_capacity(text.len());
    // Byte range in `text` of the character each byte of `folded` came from
    let mut origin = Vec::with_capacity(text.len());
    for (start, c) in text.char_indices() {
        let end = start + c.len_utf8();
        for lower in c.to_lowercase() {
            folded.push(lower);
            origin.extend(std::iter::repeat((start, end)).take(lower.len_utf8()));
        }
    }

    let ranges = folded
        .match_indices(&needle)
        .map(|(start, matched)| (origin[start].0, origin[start + matched.len() - 1].1));
    highlight_ranges(text, ranges)
}

/// Highlight exact occurrences of `query` in `text`.
pub fn highlight_exact(text: &str, query: &str) -> Line<'static> {
    if query.is_empty() {
        return Line::from(text.to_string());
    }
    let ranges = text
        .match_indices(query)
        .map(|(start, matched)| (start, start + matched.len()));
    highlight_ranges(text, ranges)
}

/// Split `text` into plain and highlighted spans.
///
/// Ranges must be ascending byte ranges on character boundaries. A range
/// overlapping the previous one is skipped.
fn highlight_ranges(text: &str, ranges: impl Iterator<Item = (usize, usize)>) -> Line<'static> {
    let highlight = Style::default()
        .fg(theme().selection_fg)
        .bg(theme().warning)
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    let mut last_end = 0;

    for (start, end) in ranges {
        if start < last_end {
            continue;
        }
        if start > last_end {
            spans.push(Span::raw(text[last_end..start].to_string()));
        }
        spans.push(Span::styled(text[start..end].to_string(), highlight));
        last_end = end;
    }

    if last_end < text.len() || spans.is_empty() {
        spans.push(Span::raw(text[last_end..].to_string()));
    }

    Line::from(spans)
}
