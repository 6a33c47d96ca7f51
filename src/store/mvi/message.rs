//! Base trait for state transition messages.

/// Marker trait for messages committed to a store.
///
/// Messages are the only way to request a change to a state tree.
/// They carry their payload by value and are consumed by a reducer.
pub trait Message: Send + 'static {}
