//! The transition function.

use super::event::Event;
use super::state::State;

/// Computes the next state from the current one and an event.
///
/// `reduce` is an associated function with no receiver, so a reducer has
/// nowhere to keep a store handle or any other hidden input.
pub trait Reducer {
    type State: State;
    type Event: Event;

    /// Returns the state that follows `state` once `event` is applied.
    ///
    /// `state` arrives by value: the store hands over a clone and the
    /// committed snapshot can't be touched. Equal inputs must give equal
    /// outputs, with no I/O along the way.
    fn reduce(state: Self::State, event: Self::Event) -> Self::State;
}
