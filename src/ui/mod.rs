//! Interactive terminal screen for the roles table.

pub mod app;
pub mod editor;
pub mod events;
pub mod mvi;
pub mod roles;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;

pub use runtime::run;
