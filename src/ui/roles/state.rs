//! State of the roles table.

use crate::directory::{DirectoryError, FailureKind};
use crate::roles::{PageQuery, Role};
use crate::ui::mvi::UiState;

/// Token tagging one page fetch; larger means issued later.
pub type RequestToken = u64;

/// Which user action a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    FetchPage,
    Edit,
    Delete,
    Export,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::FetchPage => "Loading roles",
            ActionKind::Edit => "Opening role",
            ActionKind::Delete => "Deleting role",
            ActionKind::Export => "Exporting roles",
        }
    }
}

/// A failure shown to the user until something replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionFailure {
    pub action: ActionKind,
    pub kind: FailureKind,
    pub message: String,
}

impl ActionFailure {
    pub fn from_directory(action: ActionKind, error: &DirectoryError) -> Self {
        Self {
            action,
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Everything the roles table renders from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoleListState {
    pub query: PageQuery,
    /// Current page, in server order.
    pub items: Vec<Role>,
    pub total_count: u64,
    /// Token of the most recently issued page fetch.
    pub latest_token: RequestToken,
    pub loading: bool,
    /// Highlighted row within `items`.
    pub selected: usize,
    pub last_failure: Option<ActionFailure>,
    pub unmounted: bool,
}

impl UiState for RoleListState {}

impl RoleListState {
    pub fn with_query(query: PageQuery) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    pub fn selected_role(&self) -> Option<&Role> {
        self.items.get(self.selected)
    }

    /// Footer text, e.g. "11–20 of 25".
    pub fn range_label(&self) -> String {
        match self.query.row_range(self.total_count) {
            Some((first, last)) => format!("{}–{} of {}", first, last, self.total_count),
            None => format!("0 of {}", self.total_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::PageSize;

    #[test]
    fn default_is_first_page_of_ten() {
        let state = RoleListState::default();
        assert_eq!(state.query.page_index, 0);
        assert_eq!(state.query.page_size, PageSize::Ten);
        assert!(state.items.is_empty());
        assert_eq!(state.latest_token, 0);
    }

    #[test]
    fn range_label_reflects_page() {
        let mut state = RoleListState::with_query(PageQuery::default().with_page_index(1));
        state.total_count = 25;
        assert_eq!(state.range_label(), "11–20 of 25");
        state.total_count = 0;
        assert_eq!(state.range_label(), "0 of 0");
    }

    #[test]
    fn failure_keeps_directory_kind() {
        let failure = ActionFailure::from_directory(
            ActionKind::Edit,
            &DirectoryError::NotFound { role_id: 9 },
        );
        assert_eq!(failure.kind, FailureKind::NotFound);
        assert_eq!(failure.message, "Role 9 not found");
    }
}
