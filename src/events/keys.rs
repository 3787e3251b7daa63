//! Key binding hints per input context.

/// The input context that decides which key hints are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// Browsing the student table.
    StudentList,
    /// Typing into the search bar.
    SearchInput,
    /// Answering the delete confirmation.
    ConfirmDelete,
    /// Filling in the create or edit form.
    StudentForm,
    /// A blocking alert is open.
    Alert,
}

/// Get the one-line key hints for a context.
///
/// Keys are wrapped in brackets so the help bar can style them.
pub fn get_context_hints(context: KeyContext) -> &'static str {
    match context {
        KeyContext::StudentList => {
            "[j/k] navigate  [/] search  [a] add  [e] edit  [d] delete  [r] refresh  [q] quit"
        }
        KeyContext::SearchInput => "[type] filter  [Enter] done  [Esc] clear",
        KeyContext::ConfirmDelete => "[y] delete  [n/Esc] cancel",
        KeyContext::StudentForm => "[Tab] next field  [Shift+Tab] previous  [Enter] submit  [Esc] cancel",
        KeyContext::Alert => "[Enter/Esc] dismiss",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_context_has_hints() {
        for context in [
            KeyContext::StudentList,
            KeyContext::SearchInput,
            KeyContext::ConfirmDelete,
            KeyContext::StudentForm,
            KeyContext::Alert,
        ] {
            assert!(get_context_hints(context).starts_with('['));
        }
    }

    #[test]
    fn test_list_hints_mention_delete() {
        assert!(get_context_hints(KeyContext::StudentList).contains("[d] delete"));
    }
}
