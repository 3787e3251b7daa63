//! Application views (screens).

mod create;
mod edit;
mod form;
mod list;

pub use create::CreateStudentView;
pub use edit::EditStudentView;
pub use form::{FormAction, FormField, StudentForm};
pub use list::{ListAction, StudentListView};

/// Progress of a screen's initial fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Request in flight.
    Loading,
    /// Data arrived.
    Loaded,
    /// The request failed with this message.
    Failed(String),
}

impl LoadState {
    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}
