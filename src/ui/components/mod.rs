//! Reusable UI components.

mod help_bar;
mod input;
mod loading;
mod modal;
mod notification;
mod search_bar;

pub use help_bar::render_context_help;
pub use input::TextInput;
pub use loading::LoadingIndicator;
pub use modal::{centered_rect, AlertDialog, AlertKind, ConfirmAction, ConfirmDialog};
pub use notification::{Notification, NotificationManager};
pub use search_bar::{highlight_exact, highlight_text, SearchAction, SearchBar};
