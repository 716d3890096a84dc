//! Model-View-Intent (MVI) primitives.
//!
//! This module provides the base traits for unidirectional data flow.
//!
//! # Architecture
//!
//! ```text
//! Event ──→ Reducer ──→ State ──→ Observers
//!   ↑                                │
//!   └──────────── Store::accept ─────┘
//! ```
//!
//! - **State**: Immutable snapshot of everything observable
//! - **Event**: Closed set of mutation intents
//! - **Reducer**: Pure function that computes the next state from an event

mod event;
mod reducer;
mod state;

pub use event::Event;
pub use reducer::Reducer;
pub use state::State;
