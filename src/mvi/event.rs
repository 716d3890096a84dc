//! Mutation intents.

use std::fmt::Debug;

/// A request to change state, carrying only the data the change needs.
///
/// Model it as an enum with one variant per intent: the reducer then has
/// to `match` every variant and a forgotten one fails to compile. The
/// `Debug` form is what the transition log records.
pub trait Event: Debug + Send + 'static {}
