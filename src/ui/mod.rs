//! User interface components and views.
//!
//! This module contains all TUI rendering logic, including the three
//! screens and the reusable components they are built from.

pub mod components;
pub mod theme;
pub mod views;

pub use components::{
    render_context_help, AlertDialog, AlertKind, ConfirmDialog, LoadingIndicator, Notification,
    NotificationManager, SearchBar, TextInput,
};
pub use theme::theme;
pub use views::{
    CreateStudentView, EditStudentView, FormAction, FormField, ListAction, LoadState,
    StudentForm, StudentListView,
};
