//! Whole-snapshot state.

use std::fmt::Debug;

/// One complete, self-contained value describing everything observers can
/// see at a given generation.
///
/// A store never edits a state in place. Each transition builds a fresh
/// value and swaps it in, so `Clone` is how a reducer gets its own copy
/// and `PartialEq` lets callers compare generations. The `Default` value
/// is what a new store starts from. `Sync` is required because observers
/// on any thread receive it by shared reference.
pub trait State: Clone + PartialEq + Default + Debug + Send + Sync + 'static {}
