//! Create view for adding new students.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use super::form::{FormAction, FormField, StudentForm};
use crate::api::{parse_leading_int, StudentPayload};

/// The create screen: a blank draft sent with `POST /students`.
#[derive(Debug, Clone, Default)]
pub struct CreateStudentView {
    form: StudentForm,
}

impl CreateStudentView {
    /// Create the view with every field empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// The draft.
    pub fn form(&self) -> &StudentForm {
        &self.form
    }

    /// The draft, mutably.
    pub fn form_mut(&mut self) -> &mut StudentForm {
        &mut self.form
    }

    /// Discard the draft.
    pub fn clear(&mut self) {
        self.form.clear();
    }

    /// Build the request body from the draft.
    ///
    /// The age is not validated here: text without a leading integer is
    /// sent as `null` and left for the service to judge.
    pub fn build_payload(&self) -> StudentPayload {
        StudentPayload {
            first_name: self.form.value(FormField::FirstName).to_string(),
            middle_name: self.form.value(FormField::MiddleName).to_string(),
            last_name: self.form.value(FormField::LastName).to_string(),
            age: parse_leading_int(self.form.value(FormField::Age)),
            nic: self.form.value(FormField::Nic).to_string(),
            tel: self.form.value(FormField::Tel).to_string(),
        }
    }

    /// Handle keyboard input.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<FormAction> {
        self.form.handle_input(key)
    }

    /// Render the view.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        self.form.render(frame, area, "Add Student", "Add Student");
    }
}
