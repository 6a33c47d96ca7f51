//! Reducer trait for the store.

use super::message::Message;
use super::state::StateTree;

/// Reducer transforms state based on messages.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Message) -> State
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: StateTree;

    /// The message type this reducer handles.
    type Message: Message;

    /// Apply a message and return the new state.
    fn reduce(state: Self::State, message: Self::Message) -> Self::State;
}
