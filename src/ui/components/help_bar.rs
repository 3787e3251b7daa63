//! Contextual help bar component.
//!
//! Displays context-sensitive keyboard shortcut hints at the bottom of the screen.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::events::{get_context_hints, KeyContext};
use crate::ui::theme::theme;

/// Render the key hints for `context`, prefixed by an optional status.
pub fn render_context_help(frame: &mut Frame, area: Rect, context: KeyContext, status: Option<&str>) {
    let mut spans = Vec::new();
    if let Some(status) = status {
        spans.push(Span::styled(
            format!(" {} ", status),
            Style::default().fg(theme().selection_fg).bg(theme().accent),
        ));
        spans.push(Span::raw(" "));
    }
    spans.extend(parse_hints_to_spans(get_context_hints(context)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Parse hint text into styled spans.
///
/// Highlights the key portion (in brackets) differently from the description.
fn parse_hints_to_spans(hints: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for c in hints.chars() {
        match c {
            '[' => {
                if !current.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut current),
                        Style::default().fg(theme().muted),
                    ));
                }
                in_bracket = true;
                current.push(c);
            }
            ']' => {
                current.push(c);
                if in_bracket {
                    spans.push(Span::styled(
                        std::mem::take(&mut current),
                        Style::default().fg(theme().accent),
                    ));
                    in_bracket = false;
                }
            }
            _ => {
                current.push(c);
            }
        }
    }

    if !current.is_empty() {
        spans.push(Span::styled(current, Style::default().fg(theme().muted)));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hints_to_spans_simple() {
        let hints = "[/] search";
        let spans = parse_hints_to_spans(hints);
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn test_parse_hints_to_spans_multiple_keys() {
        let hints = get_context_hints(KeyContext::ConfirmDelete);
        let spans = parse_hints_to_spans(hints);
        // "[y]", " delete  ", "[n/Esc]", " cancel"
        assert_eq!(spans.len(), 4);
        assert_eq!(spans[2].content, "[n/Esc]");
    }

    #[test]
    fn test_parse_hints_to_spans_empty() {
        let hints = "";
        let spans = parse_hints_to_spans(hints);
        assert!(spans.is_empty());
    }

    #[test]
    fn test_parse_hints_to_spans_no_brackets() {
        let hints = "just text";
        let spans = parse_hints_to_spans(hints);
        assert_eq!(spans.len(), 1);
    }
}
