//! The store: single source of truth for a reducer's state.
//!
//! All mutation goes through [`Store::accept`], which reduces the event,
//! commits the new state and then fans it out to the registered observers
//! in registration order.

mod error;
mod history;
mod observer;
#[allow(clippy::module_inception)]
mod store;

pub use error::StoreError;
pub use history::TransitionLogEntry;
pub use observer::{Observer, ObserverError, Subscription, SubscriptionId};
pub use store::{Dispatch, Store};
