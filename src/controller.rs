//! Role list controller: keeps the table in step with the directory.
//!
//! The controller owns the side effects around [`RoleListReducer`]. Query
//! changes go through the reducer first and, if the query actually changed,
//! a page fetch follows. Each fetch takes a fresh request token from the
//! state; its result is applied by the reducer only while that token is
//! still the latest, so the table always shows the last query *issued*.
//!
//! Mutations are never patched into the local page. A successful delete is
//! followed by a full refetch of the current query.

use std::mem;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

use crate::directory::{DirectoryError, DirectorySync, FailureKind, RoleDirectory};
use crate::export::{ExportError, ExportSink, Spreadsheet};
use crate::handoff::{EditorSeed, HandoffSlot, Navigator, Route};
use crate::lifecycle::ViewLifetime;
use crate::roles::{PageMove, PageQuery, PageSize, RoleId};
use crate::ui::mvi::Reducer;
use crate::ui::roles::{
    ActionFailure, ActionKind, RequestToken, RoleListIntent, RoleListReducer, RoleListState,
};

/// Errors returned to the caller of an action.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Roles view is no longer mounted")]
    Unmounted,
}

/// Collaborators the controller drives.
pub struct ControllerParts {
    pub directory: Arc<dyn RoleDirectory>,
    pub navigator: Arc<dyn Navigator>,
    pub exporter: Arc<dyn ExportSink>,
    pub handoff: HandoffSlot,
    /// Base file name of exported sheets.
    pub export_name: String,
}

/// A change to the page query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryChange {
    PageIndex(u32),
    PageSize(PageSize),
    /// Step to the next page size, starting from whatever is current.
    CyclePageSize,
    SearchText(String),
    Move(PageMove),
}

impl QueryChange {
    fn into_intent(self) -> RoleListIntent {
        match self {
            QueryChange::PageIndex(page_index) => RoleListIntent::SetPageIndex(page_index),
            QueryChange::PageSize(page_size) => RoleListIntent::SetPageSize(page_size),
            QueryChange::CyclePageSize => RoleListIntent::CyclePageSize,
            QueryChange::SearchText(text) => RoleListIntent::SetSearchText(text),
            QueryChange::Move(page_move) => RoleListIntent::Move(page_move),
        }
    }
}

/// A page fetch registered in the state but not yet sent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "the fetch does nothing until passed to `complete`"]
pub struct IssuedFetch {
    pub token: RequestToken,
    pub query: PageQuery,
}

#[derive(Clone)]
pub struct RoleListController {
    state: Arc<watch::Sender<RoleListState>>,
    sync: DirectorySync,
    navigator: Arc<dyn Navigator>,
    exporter: Arc<dyn ExportSink>,
    handoff: HandoffSlot,
    export_name: String,
    lifetime: ViewLifetime,
}

impl RoleListController {
    /// Build a controller starting from `query`; nothing is fetched until
    /// the first [`refresh`](Self::refresh) or query change.
    pub fn new(parts: ControllerParts, query: PageQuery) -> Self {
        let (state, _) = watch::channel(RoleListState::with_query(query));
        Self {
            state: Arc::new(state),
            sync: DirectorySync::new(parts.directory),
            navigator: parts.navigator,
            exporter: parts.exporter,
            handoff: parts.handoff,
            export_name: parts.export_name,
            lifetime: ViewLifetime::new(),
        }
    }

    /// Current state.
    pub fn snapshot(&self) -> RoleListState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<RoleListState> {
        self.state.subscribe()
    }

    pub fn handoff(&self) -> &HandoffSlot {
        &self.handoff
    }

    fn dispatch(&self, intent: RoleListIntent) {
        self.state.send_modify(|state| {
            let current = mem::take(state);
            *state = RoleListReducer::reduce(current, intent);
        });
    }

    /// Apply `change` and, if the query moved, register the fetch for it.
    ///
    /// Both happen in one state update, so the returned fetch holds the
    /// latest token for exactly this query. Calls made in order from one
    /// thread are therefore applied in that order, whatever happens to the
    /// fetches afterwards. `None` means nothing changed.
    pub fn issue_query(&self, change: QueryChange) -> Option<IssuedFetch> {
        let intent = change.into_intent();
        let mut issued = None;
        self.state.send_modify(|state| {
            let before = state.query.clone();
            let current = RoleListReducer::reduce(mem::take(state), intent);
            if current.query == before {
                *state = current;
                return;
            }
            *state = RoleListReducer::reduce(current, RoleListIntent::BeginFetch);
            if !state.unmounted {
                issued = Some(IssuedFetch {
                    token: state.latest_token,
                    query: state.query.clone(),
                });
            }
        });
        issued
    }

    async fn apply_query(&self, change: QueryChange) {
        if let Some(fetch) = self.issue_query(change) {
            self.complete(fetch).await;
        }
    }

    pub async fn set_page_index(&self, page_index: u32) {
        self.apply_query(QueryChange::PageIndex(page_index)).await;
    }

    pub async fn set_page_size(&self, page_size: PageSize) {
        self.apply_query(QueryChange::PageSize(page_size)).await;
    }

    pub async fn set_search_text(&self, text: impl Into<String>) {
        self.apply_query(QueryChange::SearchText(text.into())).await;
    }

    pub async fn go_to(&self, page_move: PageMove) {
        self.apply_query(QueryChange::Move(page_move)).await;
    }

    pub fn select_next(&self) {
        self.dispatch(RoleListIntent::SelectNext);
    }

    pub fn select_previous(&self) {
        self.dispatch(RoleListIntent::SelectPrevious);
    }

    /// Take the next request token for the current query.
    fn begin_fetch(&self) -> IssuedFetch {
        let mut issued = IssuedFetch {
            token: 0,
            query: PageQuery::default(),
        };
        self.state.send_modify(|state| {
            let current = mem::take(state);
            *state = RoleListReducer::reduce(current, RoleListIntent::BeginFetch);
            issued = IssuedFetch {
                token: state.latest_token,
                query: state.query.clone(),
            };
        });
        issued
    }

    /// Fetch the page for the current query and apply it.
    pub async fn refresh(&self) {
        if self.lifetime.is_unmounted() {
            return;
        }
        let fetch = self.begin_fetch();
        self.complete(fetch).await;
    }

    /// Run a registered fetch and apply its result.
    ///
    /// If the result shows the page index ran past the end, the reducer
    /// clamps it and one more fetch is issued for the clamped page.
    pub async fn complete(&self, mut fetch: IssuedFetch) {
        loop {
            let IssuedFetch { token, query } = fetch;
            let Some(outcome) = self.lifetime.guard(self.sync.fetch_page(&query)).await else {
                tracing::debug!(token, "Page fetch abandoned");
                return;
            };

            match outcome {
                Ok(page) => {
                    tracing::debug!(
                        token,
                        page = query.page_number(),
                        rows = page.items.len(),
                        total = page.total_count,
                        "Role page received"
                    );
                    self.dispatch(RoleListIntent::PageLoaded { token, page });
                }
                Err(error) => {
                    tracing::warn!(token, error = %error, "Failed to fetch roles");
                    let failure = ActionFailure::from_directory(ActionKind::FetchPage, &error);
                    self.dispatch(RoleListIntent::PageFailed { token, failure });
                    return;
                }
            }

            // Query changes always take a new token, so a differing query
            // under the same token can only come from the clamp.
            let clamped_to = {
                let state = self.state.borrow();
                (state.latest_token == token && state.query != query)
                    .then_some(state.query.page_index)
            };
            let Some(page_index) = clamped_to else {
                return;
            };
            tracing::info!(
                from = query.page_index,
                to = page_index,
                "Page index out of range, refetching last page"
            );
            if self.lifetime.is_unmounted() {
                return;
            }
            fetch = self.begin_fetch();
        }
    }

    /// Open the editor with an empty form.
    pub fn add(&self) {
        let ticket = self.handoff.store(EditorSeed::Create);
        tracing::info!("Opening editor for a new role");
        self.navigator.navigate(Route::RoleEditor { ticket });
    }

    /// Fetch `role_id` and open the editor with it.
    ///
    /// On failure nothing is navigated and the handoff slot is left as it was.
    pub async fn edit(&self, role_id: RoleId) -> Result<(), ActionError> {
        let outcome = self
            .lifetime
            .guard(self.sync.fetch_one(role_id))
            .await
            .ok_or(ActionError::Unmounted)?;

        let role = match outcome {
            Ok(role) => role,
            Err(error) => {
                tracing::error!(role_id, error = %error, "Failed to fetch role for editing");
                self.dispatch(RoleListIntent::ActionFailed(ActionFailure::from_directory(
                    ActionKind::Edit,
                    &error,
                )));
                return Err(error.into());
            }
        };

        let ticket = self.handoff.store(EditorSeed::Edit(role));
        tracing::info!(role_id, "Opening editor");
        self.navigator.navigate(Route::RoleEditor { ticket });
        Ok(())
    }

    /// Delete `role_id`, then refetch the current page.
    ///
    /// Failures are recorded in the state, not returned.
    pub async fn delete(&self, role_id: RoleId) {
        let Some(outcome) = self.lifetime.guard(self.sync.delete_one(role_id)).await else {
            return;
        };

        match outcome {
            Ok(()) => {
                tracing::info!(role_id, "Role deleted");
                self.refresh().await;
            }
            Err(error) => {
                tracing::error!(role_id, error = %error, "Failed to delete role");
                self.dispatch(RoleListIntent::ActionFailed(ActionFailure::from_directory(
                    ActionKind::Delete,
                    &error,
                )));
            }
        }
    }

    /// Export every role matching the current search.
    ///
    /// The snapshot size is the total count known right now. Returns the
    /// written path, or `None` after recording the failure.
    pub async fn export(&self) -> Option<PathBuf> {
        match self.try_export().await {
            Ok(path) => Some(path),
            Err(ActionError::Unmounted) => None,
            Err(error) => {
                tracing::error!(error = %error, "Failed to export roles");
                let failure = match &error {
                    ActionError::Directory(e) => ActionFailure::from_directory(ActionKind::Export, e),
                    other => ActionFailure {
                        action: ActionKind::Export,
                        kind: FailureKind::NetworkFailure,
                        message: other.to_string(),
                    },
                };
                self.dispatch(RoleListIntent::ActionFailed(failure));
                None
            }
        }
    }

    async fn try_export(&self) -> Result<PathBuf, ActionError> {
        let (search_text, total_count) = {
            let state = self.state.borrow();
            (state.query.search_text.clone(), state.total_count)
        };

        let roles = if total_count == 0 {
            Vec::new()
        } else {
            self.lifetime
                .guard(self.sync.fetch_all(&search_text, total_count))
                .await
                .ok_or(ActionError::Unmounted)??
                .items
        };

        let sheet = Spreadsheet::from_records(&self.export_name, &roles)?;
        let path = self.exporter.export(&sheet)?;
        tracing::info!(rows = sheet.row_count(), path = %path.display(), "Roles exported");
        Ok(path)
    }

    /// Detach the view: in-flight work is abandoned and results are dropped.
    pub fn unmount(&self) {
        self.dispatch(RoleListIntent::Unmount);
        self.lifetime.unmount();
    }
}
