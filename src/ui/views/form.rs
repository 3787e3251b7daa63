//! The student draft form shared by the create and edit screens.
//!
//! Six text fields followed by Submit and Cancel buttons, navigated with
//! Tab and Shift+Tab. Enter inside a text field submits the form, the same
//! way a browser form does.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::api::Student;
use crate::ui::components::TextInput;
use crate::ui::theme::theme;

/// Focusable elements of the form, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    FirstName,
    MiddleName,
    LastName,
    Age,
    Nic,
    Tel,
    Submit,
    Cancel,
}

impl FormField {
    const ORDER: [FormField; 8] = [
        FormField::FirstName,
        FormField::MiddleName,
        FormField::LastName,
        FormField::Age,
        FormField::Nic,
        FormField::Tel,
        FormField::Submit,
        FormField::Cancel,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// The next element, wrapping around.
    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    /// The previous element, wrapping around.
    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }

    /// Index into the text inputs, for text fields only.
    fn input_index(self) -> Option<usize> {
        match self {
            FormField::Submit | FormField::Cancel => None,
            field => Some(field.position()),
        }
    }

    /// Label shown in the field border.
    pub fn label(self) -> &'static str {
        match self {
            FormField::FirstName => "First Name",
            FormField::MiddleName => "Middle Name",
            FormField::LastName => "Last Name",
            FormField::Age => "Age",
            FormField::Nic => "NIC",
            FormField::Tel => "Phone",
            FormField::Submit => "Submit",
            FormField::Cancel => "Cancel",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            FormField::FirstName => "Enter Student First Name",
            FormField::MiddleName => "Enter Student Middle Name",
            FormField::LastName => "Enter Student Last Name",
            FormField::Age => "Enter Student Age",
            FormField::Nic => "Enter Student NIC",
            FormField::Tel => "Enter Student Phone Number",
            FormField::Submit | FormField::Cancel => "",
        }
    }
}

/// Actions returned from the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    /// Send the draft.
    Submit,
    /// Discard the draft and leave.
    Cancel,
}

/// The in-progress draft of one student record.
#[derive(Debug, Clone)]
pub struct StudentForm {
    inputs: [TextInput; 6],
    focus: FormField,
    submitting: bool,
}

impl Default for StudentForm {
    fn default() -> Self {
        Self::new()
    }
}

impl StudentForm {
    /// Create a blank draft with focus on the first field.
    pub fn new() -> Self {
        let inputs = std::array::from_fn(|i| {
            let mut input = TextInput::new();
            input.set_placeholder(FormField::ORDER[i].placeholder());
            input
        });
        Self {
            inputs,
            focus: FormField::default(),
            submitting: false,
        }
    }

    /// Reset every field to empty and refocus the first one.
    pub fn clear(&mut self) {
        for input in &mut self.inputs {
            input.clear();
        }
        self.focus = FormField::default();
        self.submitting = false;
    }

    /// Replace every field with the record's values.
    pub fn fill(&mut self, student: &Student) {
        self.set_value(FormField::FirstName, &student.first_name);
        self.set_value(FormField::MiddleName, &student.middle_name);
        self.set_value(FormField::LastName, &student.last_name);
        self.set_value(FormField::Age, &student.age_text());
        self.set_value(FormField::Nic, &student.nic);
        self.set_value(FormField::Tel, &student.tel);
    }

    /// Text of a field. Buttons have no text.
    pub fn value(&self, field: FormField) -> &str {
        field
            .input_index()
            .map(|i| self.inputs[i].value())
            .unwrap_or("")
    }

    /// Set the text of a field. Ignored for buttons.
    pub fn set_value(&mut self, field: FormField, value: &str) {
        if let Some(i) = field.input_index() {
            self.inputs[i].set_value(value);
        }
    }

    /// The focused element.
    pub fn focus(&self) -> FormField {
        self.focus
    }

    /// Move focus to an element.
    pub fn set_focus(&mut self, field: FormField) {
        self.focus = field;
    }

    /// Set the submitting state.
    pub fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    /// Check if currently submitting.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Insert pasted text into the focused field.
    pub fn paste(&mut self, text: &str) {
        if self.submitting {
            return;
        }
        if let Some(i) = self.focus.input_index() {
            self.inputs[i].insert_str(text);
        }
    }

    /// Handle keyboard input.
    ///
    /// Returns an optional action to be handled by the parent.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<FormAction> {
        if self.submitting {
            return None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Tab, KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.focus = self.focus.next();
                None
            }
            (KeyCode::BackTab, _) | (KeyCode::Tab, KeyModifiers::SHIFT) | (KeyCode::Up, _) => {
                self.focus = self.focus.prev();
                None
            }
            (KeyCode::Esc, _) => Some(FormAction::Cancel),
            (KeyCode::Enter, _) => match self.focus {
                FormField::Cancel => Some(FormAction::Cancel),
                _ => Some(FormAction::Submit),
            },
            _ => {
                if let Some(i) = self.focus.input_index() {
                    self.inputs[i].handle_input(key);
                }
                None
            }
        }
    }

    /// Render the form inside a titled block.
    pub fn render(&self, frame: &mut Frame, area: Rect, title: &str, submit_label: &str) {
        let t = theme();
        let width = 64u16.min(area.width);
        let form_area = Rect::new(
            area.x + (area.width - width) / 2,
            area.y,
            width,
            area.height,
        );

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", title),
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.border));
        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let mut constraints = vec![Constraint::Length(3); self.inputs.len()];
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(constraints)
            .split(inner);

        for (i, input) in self.inputs.iter().enumerate() {
            let field = FormField::ORDER[i];
            input.render_with_label(frame, chunks[i], field.label(), self.focus == field);
        }

        self.render_buttons(frame, chunks[self.inputs.len() + 1], submit_label);
    }

    fn render_buttons(&self, frame: &mut Frame, area: Rect, submit_label: &str) {
        let t = theme();

        let submit_text = if self.submitting {
            " Saving... ".to_string()
        } else {
            format!(" {} ", submit_label)
        };
        let submit_style = if self.focus == FormField::Submit {
            Style::default()
                .fg(t.selection_fg)
                .bg(t.success)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(t.success)
        };
        let cancel_style = if self.focus == FormField::Cancel {
            Style::default()
                .fg(t.selection_fg)
                .bg(t.error)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(t.error)
        };

        let line = Line::from(vec![
            Span::styled(submit_text, submit_style),
            Span::raw("   "),
            Span::styled(" Cancel ", cancel_style),
        ]);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::StudentId;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut StudentForm, text: &str) {
        for c in text.chars() {
            form.handle_input(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_new_form_is_blank() {
        let form = StudentForm::new();
        for field in FormField::ORDER {
            assert_eq!(form.value(field), "");
        }
        assert_eq!(form.focus(), FormField::FirstName);
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_focus_cycles() {
        let mut form = StudentForm::new();
        for _ in 0..FormField::ORDER.len() {
            form.handle_input(key(KeyCode::Tab));
        }
        assert_eq!(form.focus(), FormField::FirstName);

        form.handle_input(key(KeyCode::BackTab));
        assert_eq!(form.focus(), FormField::Cancel);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = StudentForm::new();
        type_text(&mut form, "Ann");
        form.handle_input(key(KeyCode::Tab));
        form.handle_input(key(KeyCode::Tab));
        type_text(&mut form, "Lee");

        assert_eq!(form.value(FormField::FirstName), "Ann");
        assert_eq!(form.value(FormField::MiddleName), "");
        assert_eq!(form.value(FormField::LastName), "Lee");
    }

    #[test]
    fn test_enter_submits_from_text_field() {
        let mut form = StudentForm::new();
        assert_eq!(form.handle_input(key(KeyCode::Enter)), Some(FormAction::Submit));
    }

    #[test]
    fn test_enter_on_cancel_cancels() {
        let mut form = StudentForm::new();
        form.set_focus(FormField::Cancel);
        assert_eq!(form.handle_input(key(KeyCode::Enter)), Some(FormAction::Cancel));
        assert_eq!(form.handle_input(key(KeyCode::Esc)), Some(FormAction::Cancel));
    }

    #[test]
    fn test_input_ignored_while_submitting() {
        let mut form = StudentForm::new();
        form.set_submitting(true);
        assert_eq!(form.handle_input(key(KeyCode::Enter)), None);
        type_text(&mut form, "x");
        form.paste("y");
        assert_eq!(form.value(FormField::FirstName), "");
    }

    #[test]
    fn test_fill_keeps_empty_middle_name() {
        let student = Student {
            id: StudentId::from(3),
            first_name: "Ann".into(),
            middle_name: String::new(),
            last_name: "Lee".into(),
            age: Some(20),
            nic: "N1".into(),
            tel: "0771234567".into(),
        };
        let mut form = StudentForm::new();
        form.set_value(FormField::MiddleName, "stale");
        form.fill(&student);

        assert_eq!(form.value(FormField::FirstName), "Ann");
        assert_eq!(form.value(FormField::MiddleName), "");
        assert_eq!(form.value(FormField::Age), "20");
        assert_eq!(form.value(FormField::Tel), "0771234567");
    }

    #[test]
    fn test_clear_resets() {
        let mut form = StudentForm::new();
        type_text(&mut form, "Ann");
        form.set_focus(FormField::Age);
        form.set_submitting(true);
        form.clear();
        assert_eq!(form.value(FormField::FirstName), "");
        assert_eq!(form.focus(), FormField::FirstName);
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_buttons_have_no_value() {
        let mut form = StudentForm::new();
        form.set_value(FormField::Submit, "ignored");
        assert_eq!(form.value(FormField::Submit), "");
    }
}
