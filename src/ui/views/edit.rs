//! Edit view for updating an existing student.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use super::form::{FormAction, FormField, StudentForm};
use super::LoadState;
use crate::api::{parse_leading_int, Student, StudentId, StudentPayload};
use crate::error::ValidationError;
use crate::ui::components::LoadingIndicator;
use crate::ui::theme::theme;

/// The edit screen: loads one record, then sends it back with `PUT`.
#[derive(Debug, Clone)]
pub struct EditStudentView {
    id: StudentId,
    state: LoadState,
    form: StudentForm,
    loading: LoadingIndicator,
}

impl EditStudentView {
    /// Create the view for a student. The draft stays blank until loaded.
    pub fn new(id: StudentId) -> Self {
        Self {
            id,
            state: LoadState::Idle,
            form: StudentForm::new(),
            loading: LoadingIndicator::with_message("Loading student..."),
        }
    }

    /// The student being edited.
    pub fn id(&self) -> &StudentId {
        &self.id
    }

    /// Load progress.
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// The draft.
    pub fn form(&self) -> &StudentForm {
        &self.form
    }

    /// The draft, mutably.
    pub fn form_mut(&mut self) -> &mut StudentForm {
        &mut self.form
    }

    /// Mark the record fetch as in flight.
    pub fn set_loading(&mut self) {
        self.state = LoadState::Loading;
        self.loading.start();
    }

    /// Replace the whole draft with the fetched record.
    pub fn adopt(&mut self, student: &Student) {
        self.form.fill(student);
        self.state = LoadState::Loaded;
        self.loading.stop();
    }

    /// Record a failed fetch. The draft is left as it was.
    pub fn set_failed(&mut self, message: impl Into<String>) {
        self.state = LoadState::Failed(message.into());
        self.loading.stop();
    }

    /// Advance the spinner.
    pub fn tick(&mut self) {
        self.loading.tick();
    }

    /// Build the request body from the draft.
    ///
    /// Empty age text means no age. Any other text must start with an
    /// integer or the draft is rejected.
    pub fn build_payload(&self) -> Result<StudentPayload, ValidationError> {
        let age_text = self.form.value(FormField::Age);
        let age = if age_text.is_empty() {
            None
        } else {
            Some(
                parse_leading_int(age_text)
                    .ok_or_else(|| ValidationError::InvalidAge(age_text.to_string()))?,
            )
        };

        Ok(StudentPayload {
            first_name: self.form.value(FormField::FirstName).to_string(),
            middle_name: self.form.value(FormField::MiddleName).to_string(),
            last_name: self.form.value(FormField::LastName).to_string(),
            age,
            nic: self.form.value(FormField::Nic).to_string(),
            tel: self.form.value(FormField::Tel).to_string(),
        })
    }

    /// Handle keyboard input.
    ///
    /// Only Esc is accepted while the record is loading.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<FormAction> {
        if self.state.is_loading() {
            return (key.code == KeyCode::Esc).then_some(FormAction::Cancel);
        }
        self.form.handle_input(key)
    }

    /// Render the view.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.state.is_loading() {
            self.loading.render(frame, area);
            return;
        }

        let form_area = if let LoadState::Failed(message) = &self.state {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(1)])
                .split(area);
            let line = Paragraph::new(format!("Could not load student {}: {}", self.id, message))
                .style(Style::default().fg(theme().error))
                .alignment(Alignment::Center);
            frame.render_widget(line, chunks[0]);
            chunks[1]
        } else {
            area
        };

        let title = format!("Edit Student {}", self.id);
        self.form.render(frame, form_area, &title, "Update Student");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn student() -> Student {
        Student {
            id: StudentId::from(7),
            first_name: "Ann".into(),
            middle_name: String::new(),
            last_name: "Lee".into(),
            age: Some(20),
            nic: "N1".into(),
            tel: "111".into(),
        }
    }

    fn loaded_view() -> EditStudentView {
        let mut view = EditStudentView::new(StudentId::from(7));
        view.set_loading();
        view.adopt(&student());
        view
    }

    #[test]
    fn test_adopt_prefills_every_field() {
        let view = loaded_view();
        assert_eq!(view.state(), &LoadState::Loaded);

        let payload = view.build_payload().unwrap();
        assert_eq!(
            payload,
            StudentPayload {
                first_name: "Ann".into(),
                middle_name: String::new(),
                last_name: "Lee".into(),
                age: Some(20),
                nic: "N1".into(),
                tel: "111".into(),
            }
        );
    }

    #[test]
    fn test_non_numeric_age_rejected() {
        let mut view = loaded_view();
        view.form_mut().set_value(FormField::Age, "abc");
        assert_eq!(
            view.build_payload(),
            Err(ValidationError::InvalidAge("abc".into()))
        );
    }

    #[test]
    fn test_empty_age_sends_null() {
        let mut view = loaded_view();
        view.form_mut().set_value(FormField::Age, "");
        assert_eq!(view.build_payload().unwrap().age, None);
    }

    #[test]
    fn test_absent_age_prefills_empty() {
        let mut record = student();
        record.age = None;
        let mut view = EditStudentView::new(record.id.clone());
        view.adopt(&record);
        assert_eq!(view.form().value(FormField::Age), "");
        assert_eq!(view.build_payload().unwrap().age, None);
    }

    #[test]
    fn test_only_escape_while_loading() {
        let mut view = EditStudentView::new(StudentId::from(7));
        view.set_loading();
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(view.handle_input(enter), None);
        assert_eq!(view.handle_input(esc), Some(FormAction::Cancel));
    }

    #[test]
    fn test_failed_load_keeps_draft() {
        let mut view = EditStudentView::new(StudentId::from(7));
        view.set_loading();
        view.set_failed("HTTP 404");
        assert_eq!(view.state(), &LoadState::Failed("HTTP 404".into()));
        assert_eq!(view.form().value(FormField::FirstName), "");
    }
}
