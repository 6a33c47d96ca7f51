//! Base trait for store state trees.

/// Marker trait for state trees held by a store.
///
/// States should be:
/// - Cloneable (consumers read snapshots)
/// - Comparable (PartialEq for detecting changes)
/// - Defaultable (the empty session state)
pub trait StateTree: Clone + PartialEq + Default + Send + 'static {}
