//! Student list view.
//!
//! Shows the whole collection as a table, narrowed by the search term,
//! and guards deletion behind a confirmation dialog.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use tracing::debug;

use super::LoadState;
use crate::api::{Student, StudentId};
use crate::ui::components::{
    highlight_exact, highlight_text, ConfirmAction, ConfirmDialog, LoadingIndicator,
    SearchAction, SearchBar,
};
use crate::ui::theme::theme;

/// Actions returned from the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    /// Open the create screen.
    AddStudent,
    /// Open the edit screen for a student.
    EditStudent(StudentId),
    /// The user confirmed deleting a student.
    ConfirmDelete(StudentId),
    /// Fetch the collection again.
    Refresh,
    /// Leave the application.
    Quit,
}

/// The listing screen.
#[derive(Debug)]
pub struct StudentListView {
    state: LoadState,
    /// Collection in server order.
    students: Vec<Student>,
    /// Indices into `students` that match the search term.
    filtered: Vec<usize>,
    search: SearchBar,
    /// Selected row within `filtered`.
    selected: usize,
    table_state: TableState,
    confirm: ConfirmDialog,
    loading: LoadingIndicator,
}

impl Default for StudentListView {
    fn default() -> Self {
        Self::new()
    }
}

impl StudentListView {
    /// Create an empty list view.
    pub fn new() -> Self {
        Self {
            state: LoadState::Idle,
            students: Vec::new(),
            filtered: Vec::new(),
            search: SearchBar::new(),
            selected: 0,
            table_state: TableState::default(),
            confirm: ConfirmDialog::new(),
            loading: LoadingIndicator::with_message("Loading students..."),
        }
    }

    /// Load progress.
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Mark a collection fetch as in flight.
    pub fn set_loading(&mut self) {
        self.state = LoadState::Loading;
        self.loading.start();
    }

    /// Replace the collection with freshly fetched records.
    pub fn set_students(&mut self, students: Vec<Student>) {
        debug!(count = students.len(), "Student list loaded");
        self.students = students;
        self.state = LoadState::Loaded;
        self.loading.stop();
        self.refilter();
    }

    /// Record a failed fetch. Whatever was shown before stays.
    pub fn set_failed(&mut self, message: impl Into<String>) {
        self.state = LoadState::Failed(message.into());
        self.loading.stop();
    }

    /// The full collection.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Records matching the search term, in collection order.
    pub fn filtered_students(&self) -> Vec<&Student> {
        self.filtered.iter().map(|&i| &self.students[i]).collect()
    }

    /// The record under the cursor.
    pub fn selected_student(&self) -> Option<&Student> {
        self.filtered
            .get(self.selected)
            .map(|&i| &self.students[i])
    }

    /// The current search term.
    pub fn search_query(&self) -> &str {
        self.search.query()
    }

    /// Replace the search term.
    pub fn set_search_query(&mut self, query: &str) {
        self.search.set_query(query);
        self.refilter();
    }

    /// Whether the search bar is taking keystrokes.
    pub fn is_searching(&self) -> bool {
        self.search.is_active()
    }

    /// Whether the delete confirmation is open.
    pub fn is_confirming(&self) -> bool {
        self.confirm.is_open()
    }

    /// The delete confirmation.
    pub fn confirm_dialog(&self) -> &ConfirmDialog {
        &self.confirm
    }

    /// Open the delete confirmation for a student.
    pub fn request_delete(&mut self, id: StudentId) {
        self.confirm.open(id);
    }

    /// A delete finished successfully: drop the record and close the dialog.
    pub fn delete_succeeded(&mut self, id: &StudentId) {
        self.remove_student(id);
        if self.confirm.pending() == Some(id) {
            self.confirm.close();
        }
    }

    /// A delete failed: leave everything as it was, but allow a retry.
    pub fn delete_failed(&mut self) {
        self.confirm.set_idle();
    }

    /// Remove the record with this id. Returns whether one was removed.
    pub fn remove_student(&mut self, id: &StudentId) -> bool {
        let Some(index) = self.students.iter().position(|s| &s.id == id) else {
            return false;
        };
        self.students.remove(index);
        self.refilter();
        true
    }

    /// Paste into the search bar when it is active.
    pub fn paste(&mut self, text: &str) {
        if self.search.is_active() && self.search.paste(text) == SearchAction::Changed {
            self.refilter();
        }
    }

    /// Advance the spinner.
    pub fn tick(&mut self) {
        self.loading.tick();
    }

    /// Recompute the filtered rows and keep the cursor in range.
    fn refilter(&mut self) {
        let query = self.search.query();
        self.filtered = self
            .students
            .iter()
            .enumerate()
            .filter(|(_, student)| student.matches_search(query))
            .map(|(i, _)| i)
            .collect();

        if self.filtered.is_empty() {
            self.selected = 0;
            self.table_state.select(None);
        } else {
            self.selected = self.selected.min(self.filtered.len() - 1);
            self.table_state.select(Some(self.selected));
        }
    }

    fn move_down(&mut self) {
        if self.selected + 1 < self.filtered.len() {
            self.selected += 1;
            self.table_state.select(Some(self.selected));
        }
    }

    fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.table_state.select(Some(self.selected));
        }
    }

    fn move_to_first(&mut self) {
        if !self.filtered.is_empty() {
            self.selected = 0;
            self.table_state.select(Some(0));
        }
    }

    fn move_to_last(&mut self) {
        if !self.filtered.is_empty() {
            self.selected = self.filtered.len() - 1;
            self.table_state.select(Some(self.selected));
        }
    }

    /// Handle keyboard input.
    ///
    /// Returns an optional action to be handled by the parent.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ListAction> {
        if self.confirm.is_open() {
            return match self.confirm.handle_input(key)? {
                ConfirmAction::Confirm(id) => Some(ListAction::ConfirmDelete(id)),
                ConfirmAction::Cancel => {
                    debug!("Delete cancelled");
                    None
                }
            };
        }

        if self.search.is_active() {
            if self.search.handle_input(key) == SearchAction::Changed {
                self.refilter();
            }
            return None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.move_down();
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.move_up();
                None
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => {
                self.move_to_first();
                None
            }
            (KeyCode::Char('G'), _) | (KeyCode::End, _) => {
                self.move_to_last();
                None
            }
            (KeyCode::Char('/'), KeyModifiers::NONE) => {
                self.search.activate();
                None
            }
            (KeyCode::Esc, _) => {
                if !self.search.query().is_empty() {
                    self.set_search_query("");
                }
                None
            }
            (KeyCode::Char('a'), KeyModifiers::NONE) => Some(ListAction::AddStudent),
            (KeyCode::Char('e'), KeyModifiers::NONE) | (KeyCode::Enter, _) => self
                .selected_student()
                .map(|s| ListAction::EditStudent(s.id.clone())),
            (KeyCode::Char('d'), KeyModifiers::NONE) | (KeyCode::Delete, _) => {
                if let Some(id) = self.selected_student().map(|s| s.id.clone()) {
                    self.request_delete(id);
                }
                None
            }
            (KeyCode::Char('r'), KeyModifiers::NONE) => Some(ListAction::Refresh),
            (KeyCode::Char('q'), KeyModifiers::NONE) => Some(ListAction::Quit),
            _ => None,
        }
    }

    /// Render the view.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        self.search.render(frame, chunks[0]);
        self.render_table(frame, chunks[1]);
        self.confirm.render(frame, area);
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let title = if self.search.query().is_empty() {
            format!(" Students ({}) ", self.students.len())
        } else {
            format!(" Students ({}/{}) ", self.filtered.len(), self.students.len())
        };
        let block = Block::default()
            .title(Span::styled(
                title,
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.border));

        if self.students.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            if self.state.is_loading() {
                self.loading.render(frame, inner);
            } else {
                let message = match &self.state {
                    LoadState::Failed(_) => "Could not load students. Press r to retry.",
                    _ => "No students yet. Press a to add one.",
                };
                let paragraph = Paragraph::new(vec![Line::from(""), Line::from(message)])
                    .style(Style::default().fg(t.muted))
                    .alignment(Alignment::Center);
                frame.render_widget(paragraph, inner);
            }
            return;
        }

        let query = self.search.query();
        let rows: Vec<Row> = self
            .filtered
            .iter()
            .map(|&i| Row::new(highlighted_cells(&self.students[i], query).map(Cell::from)))
            .collect();

        let header = Row::new(vec!["ID", "NAME", "AGE", "NIC", "PHONE"]).style(t.header_style());
        let widths = [
            Constraint::Length(8),
            Constraint::Min(20),
            Constraint::Length(5),
            Constraint::Length(14),
            Constraint::Length(14),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .highlight_style(t.selected_style())
            .highlight_symbol("> ");

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }
}

/// Table cells for a student, highlighting `query` where it made the row match.
///
/// Names and NIC match ignoring case; id, age and phone match exactly. The
/// middle name is not searched, so it is never highlighted.
fn highlighted_cells(student: &Student, query: &str) -> [Line<'static>; 5] {
    let mut name = highlight_text(&student.first_name, query).spans;
    if !student.middle_name.is_empty() {
        name.push(Span::raw(format!(" {}", student.middle_name)));
    }
    name.push(Span::raw(" "));
    name.extend(highlight_text(&student.last_name, query).spans);

    [
        highlight_exact(student.id.as_str(), query),
        Line::from(name),
        highlight_exact(&student.age_text(), query),
        highlight_text(&student.nic, query),
        highlight_exact(&student.tel, query),
    ]
}
