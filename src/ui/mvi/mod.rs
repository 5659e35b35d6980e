//! Model-View-Intent (MVI) primitives.
//!
//! Screens keep their data in a plain state value and change it only by
//! feeding intents through a reducer:
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! Side effects (HTTP calls, navigation) live outside the reducer; they
//! report back by dispatching more intents.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
