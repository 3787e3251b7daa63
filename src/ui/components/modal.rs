//! Modal dialogs: blocking alerts and the delete confirmation.
//!
//! Both dialogs capture all keyboard input while visible.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::api::StudentId;
use crate::ui::theme::theme;

/// Severity of an alert, which decides its colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// Operation succeeded.
    Success,
    /// Operation failed or input was rejected.
    Error,
}

/// A blocking alert with a single acknowledgement.
#[derive(Debug, Clone)]
pub struct AlertDialog {
    kind: AlertKind,
    title: String,
    message: String,
    visible: bool,
}

impl Default for AlertDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertDialog {
    /// Create a hidden alert.
    pub fn new() -> Self {
        Self {
            kind: AlertKind::Error,
            title: String::new(),
            message: String::new(),
            visible: false,
        }
    }

    /// Show an alert, replacing any alert already visible.
    pub fn show(&mut self, kind: AlertKind, title: impl Into<String>, message: impl Into<String>) {
        self.kind = kind;
        self.title = title.into();
        self.message = message.into();
        self.visible = true;
    }

    /// Show an error alert.
    pub fn error(&mut self, message: impl Into<String>) {
        self.show(AlertKind::Error, "Error", message);
    }

    /// Show a success alert.
    pub fn success(&mut self, message: impl Into<String>) {
        self.show(AlertKind::Success, "Success", message);
    }

    /// Hide the alert.
    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    /// Check if the alert is visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The alert kind.
    pub fn kind(&self) -> AlertKind {
        self.kind
    }

    /// The alert message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Handle a key while the alert is visible.
    ///
    /// Enter and Esc dismiss; every other key is swallowed.
    pub fn handle_input(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.dismiss();
        }
    }

    /// Render the alert centered in `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let t = theme();
        let color = match self.kind {
            AlertKind::Success => t.success,
            AlertKind::Error => t.error,
        };

        let dialog = centered_rect(area, 50, 7);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(self.message.as_str(), Style::default().fg(t.fg))),
            Line::from(""),
            Line::from(Span::styled("[Enter] OK", Style::default().fg(t.muted))),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, dialog);
    }
}

/// Result of a key press in the confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    /// The user confirmed deleting this student.
    Confirm(StudentId),
    /// The user backed out.
    Cancel,
}

/// Two-step delete confirmation holding the pending student id.
///
/// Confirming does not close the dialog; the caller closes it once the
/// delete has succeeded.
#[derive(Debug, Clone, Default)]
pub struct ConfirmDialog {
    pending: Option<StudentId>,
    busy: bool,
}

impl ConfirmDialog {
    /// Create a closed dialog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the dialog for a student.
    pub fn open(&mut self, id: StudentId) {
        self.pending = Some(id);
        self.busy = false;
    }

    /// Close the dialog and forget the pending id.
    pub fn close(&mut self) {
        self.pending = None;
        self.busy = false;
    }

    /// Check if the dialog is open.
    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// The id awaiting confirmation.
    pub fn pending(&self) -> Option<&StudentId> {
        self.pending.as_ref()
    }

    /// Whether a confirmed delete is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Mark the in-flight delete as finished without closing.
    pub fn set_idle(&mut self) {
        self.busy = false;
    }

    /// Handle a key while the dialog is open.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ConfirmAction> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                if self.busy {
                    return None;
                }
                let id = self.pending.clone()?;
                self.busy = true;
                Some(ConfirmAction::Confirm(id))
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.close();
                Some(ConfirmAction::Cancel)
            }
            _ => None,
        }
    }

    /// Render the confirmation centered in `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.is_open() {
            return;
        }

        let t = theme();
        let dialog = centered_rect(area, 48, 8);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(Span::styled(
                " Delete Confirmation ",
                Style::default().fg(t.error).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.error));
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .margin(1)
            .split(inner);

        let message = Paragraph::new(Line::from(Span::styled(
            "Are you sure you want to delete this record?",
            Style::default().fg(t.warning),
        )))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
        frame.render_widget(message, chunks[0]);

        let hint = if self.busy {
            Line::from(Span::styled("Deleting...", Style::default().fg(t.muted)))
        } else {
            Line::from(vec![
                Span::styled("y", Style::default().fg(t.success)),
                Span::raw(": delete  "),
                Span::styled("n/Esc", Style::default().fg(t.error)),
                Span::raw(": cancel"),
            ])
        };
        frame.render_widget(Paragraph::new(hint).alignment(Alignment::Center), chunks[1]);
    }
}

/// Calculate a centered rectangle within the given area.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
