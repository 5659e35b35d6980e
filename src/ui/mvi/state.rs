//! Base trait for screen state.

/// Marker trait for state objects.
///
/// States are cloned into renderers and compared to detect changes, and
/// start from `Default` when a screen mounts.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
