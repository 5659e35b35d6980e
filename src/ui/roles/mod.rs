//! Roles table feature module.
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Table state and request tokens
//! - `intent.rs` - Query changes and directory results
//! - `reducer.rs` - State transitions, including stale-result discard
//! - `table.rs` - Rendering

mod intent;
mod reducer;
mod state;
mod table;

pub use intent::RoleListIntent;
pub use reducer::RoleListReducer;
pub use state::{ActionFailure, ActionKind, RequestToken, RoleListState};
pub use table::{pagination_label, render_role_table, SearchLine, COLUMNS};
