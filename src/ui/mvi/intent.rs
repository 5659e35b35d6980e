//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents are either user actions (change page, type a search) or
/// results coming back from the directory.
pub trait Intent: Send + 'static {}
