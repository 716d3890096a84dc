use thiserror::Error;

use crate::store::observer::{ObserverError, SubscriptionId};

/// Errors returned by `Store::accept`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `accept` was called from an observer callback while the store is
    /// configured with `ReentrancyPolicy::Reject`. The event was dropped.
    #[error("accept called re-entrantly from an observer; event rejected")]
    ReentrantAccept,

    /// An observer failed under `FailurePolicy::Abort`. The transition was
    /// committed; observers after the failing one were not notified.
    #[error("Observer {subscription} failed: {source}")]
    ObserverFailed {
        subscription: SubscriptionId,
        #[source]
        source: ObserverError,
    },
}
