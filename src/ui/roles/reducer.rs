//! Reducer for the roles table.

use crate::roles::last_page_index;
use crate::ui::mvi::Reducer;

use super::intent::RoleListIntent;
use super::state::{ActionKind, RoleListState};

pub struct RoleListReducer;

impl Reducer for RoleListReducer {
    type State = RoleListState;
    type Intent = RoleListIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        if state.unmounted {
            return state;
        }

        match intent {
            RoleListIntent::SetPageIndex(page_index) => RoleListState {
                query: state.query.clone().with_page_index(page_index),
                ..state
            },

            RoleListIntent::SetPageSize(page_size) => RoleListState {
                query: state.query.clone().with_page_size(page_size),
                ..state
            },

            RoleListIntent::CyclePageSize => RoleListState {
                query: state.query.clone().with_page_size(state.query.page_size.cycle()),
                ..state
            },

            RoleListIntent::SetSearchText(text) => RoleListState {
                query: state.query.clone().with_search_text(text),
                ..state
            },

            RoleListIntent::Move(page_move) => {
                let target = page_move.target(
                    state.query.page_index,
                    state.total_count,
                    state.query.page_size,
                );
                match target {
                    Some(page_index) => RoleListState {
                        query: state.query.clone().with_page_index(page_index),
                        ..state
                    },
                    None => state,
                }
            }

            RoleListIntent::BeginFetch => RoleListState {
                latest_token: state.latest_token + 1,
                loading: true,
                ..state
            },

            RoleListIntent::PageLoaded { token, page } => {
                if token != state.latest_token {
                    tracing::debug!(
                        token,
                        latest = state.latest_token,
                        "Discarding stale role page"
                    );
                    return state;
                }

                let mut query = state.query.clone();
                if query.is_out_of_range(page.total_count) {
                    // The collection shrank under us; step back to the last real page.
                    query.page_index = last_page_index(page.total_count, query.page_size);
                }

                let selected = state.selected.min(page.items.len().saturating_sub(1));
                let last_failure = state
                    .last_failure
                    .filter(|f| f.action != ActionKind::FetchPage);

                RoleListState {
                    query,
                    items: page.items,
                    total_count: page.total_count,
                    loading: false,
                    selected,
                    last_failure,
                    ..state
                }
            }

            RoleListIntent::PageFailed { token, failure } => {
                if token != state.latest_token {
                    return state;
                }
                RoleListState {
                    loading: false,
                    last_failure: Some(failure),
                    ..state
                }
            }

            RoleListIntent::ActionFailed(failure) => RoleListState {
                last_failure: Some(failure),
                ..state
            },

            RoleListIntent::SelectNext => {
                let selected = if state.selected + 1 >= state.items.len() {
                    state.selected
                } else {
                    state.selected + 1
                };
                RoleListState { selected, ..state }
            }

            RoleListIntent::SelectPrevious => RoleListState {
                selected: state.selected.saturating_sub(1),
                ..state
            },

            RoleListIntent::Unmount => RoleListState {
                loading: false,
                unmounted: true,
                ..state
            },
        }
    }
}
