//! Observer capability and the registry the store dispatches through.

use std::fmt;
use std::sync::{Arc, Weak};

use thiserror::Error;

/// A notification target invoked by the store after every transition.
///
/// Observers receive the new state by shared reference and can't mutate
/// it. Returning an error is handled according to the store's
/// [`FailurePolicy`](crate::config::FailurePolicy).
pub trait Observer<S>: Send + Sync {
    fn on_state(&self, state: &S) -> Result<(), ObserverError>;
}

impl<S, F> Observer<S> for F
where
    F: Fn(&S) -> Result<(), ObserverError> + Send + Sync,
{
    fn on_state(&self, state: &S) -> Result<(), ObserverError> {
        self(state)
    }
}

/// Error reported by an observer's notification handler.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ObserverError(Box<dyn std::error::Error + Send + Sync>);

impl ObserverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into().into())
    }

    /// Wraps an arbitrary error.
    pub fn other<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(Box::new(error))
    }
}

/// Registration token returned by `Store::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Owning guard for a closure observer registered with
/// `Store::subscribe_fn`.
///
/// The store only keeps a weak handle; dropping the guard drops the
/// closure and removes its registration.
#[must_use = "dropping the subscription unsubscribes the observer"]
pub struct Subscription<S: 'static> {
    id: SubscriptionId,
    registry: Weak<parking_lot::Mutex<Registry<S>>>,
    _observer: Arc<dyn Observer<S>>,
}

impl<S: 'static> Subscription<S> {
    pub(crate) fn new(
        id: SubscriptionId,
        registry: Weak<parking_lot::Mutex<Registry<S>>>,
        observer: Arc<dyn Observer<S>>,
    ) -> Self {
        Self {
            id,
            registry,
            _observer: observer,
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl<S: 'static> Drop for Subscription<S> {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().remove(self.id);
        }
    }
}

struct Entry<S: 'static> {
    id: SubscriptionId,
    observer: Weak<dyn Observer<S>>,
}

impl<S: 'static> Entry<S> {
    fn is_live(&self) -> bool {
        self.observer.strong_count() > 0
    }

    fn points_to(&self, observer: &Arc<dyn Observer<S>>) -> bool {
        Weak::as_ptr(&self.observer) as *const () == Arc::as_ptr(observer) as *const ()
    }
}

/// Ordered, non-owning collection of observers.
pub(crate) struct Registry<S: 'static> {
    next_id: u64,
    entries: Vec<Entry<S>>,
}

impl<S: 'static> Registry<S> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Registers `observer` at the end of the notification order.
    ///
    /// An observer that is already registered keeps its id and position.
    pub(crate) fn insert(&mut self, observer: &Arc<dyn Observer<S>>) -> SubscriptionId {
        self.prune();
        if let Some(existing) = self
            .entries
            .iter()
            .find(|entry| entry.points_to(observer))
        {
            tracing::debug!(subscription = %existing.id, "Observer already subscribed");
            return existing.id;
        }

        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push(Entry {
            id,
            observer: Arc::downgrade(observer),
        });
        tracing::debug!(subscription = %id, "Observer subscribed");
        id
    }

    /// Returns `false` if `id` isn't registered.
    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        let removed = self.entries.len() != before;
        if removed {
            tracing::debug!(subscription = %id, "Observer unsubscribed");
        }
        removed
    }

    pub(crate) fn live_count(&mut self) -> usize {
        self.prune();
        self.entries.len()
    }

    /// Drops entries whose observer no longer exists.
    fn prune(&mut self) {
        self.entries.retain(|entry| {
            let live = entry.is_live();
            if !live {
                tracing::debug!(subscription = %entry.id, "Pruned dropped observer");
            }
            live
        });
    }

    /// Strong handles to every live observer in registration order.
    ///
    /// Entries whose observer has been dropped are pruned here.
    pub(crate) fn snapshot(&mut self) -> Vec<(SubscriptionId, Arc<dyn Observer<S>>)> {
        let mut live = Vec::with_capacity(self.entries.len());
        self.entries.retain(|entry| match entry.observer.upgrade() {
            Some(observer) => {
                live.push((entry.id, observer));
                true
            }
            None => {
                tracing::debug!(subscription = %entry.id, "Pruned dropped observer");
                false
            }
        });
        live
    }
}
