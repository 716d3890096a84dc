//! Minimal unidirectional state container.
//!
//! ```text
//! caller ──accept(event)──→ Store ──→ Reducer::reduce(state, event)
//!                             │
//!                             └──new state──→ Observer::on_state (in order)
//! ```

pub mod config;
pub mod counter;
pub mod logging;
pub mod mvi;
pub mod store;
