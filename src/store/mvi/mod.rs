//! Unidirectional state primitives for the store.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ ApiClient ──→ Message ──→ Reducer ──→ State ──→ Getters
//!   ↑                                                          │
//!   └──────────────────────────────────────────────────────────┘
//! ```
//!
//! - **State**: the single state tree owned by the store
//! - **Message**: a synchronous state transition request
//! - **Reducer**: pure function that applies a message to the state

mod message;
mod reducer;
mod state;

pub use message::Message;
pub use reducer::Reducer;
pub use state::StateTree;
