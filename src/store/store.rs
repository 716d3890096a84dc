use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::{Mutex, ReentrantMutex, RwLock};

use crate::config::{FailurePolicy, ReentrancyPolicy, StoreConfig};
use crate::mvi::Reducer;
use crate::store::error::StoreError;
use crate::store::history::{TransitionLog, TransitionLogEntry};
use crate::store::observer::{Observer, ObserverError, Registry, Subscription, SubscriptionId};

/// Outcome of a successful `accept`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The event was reduced and observers were notified.
    /// `generation` is the generation this event produced.
    Applied { generation: u64 },
    /// Called from inside an observer: the event will be applied once the
    /// in-progress notification pass finishes.
    Queued,
}

/// Thread-safe store handle.
///
/// Clones share the same state, observers and dispatch queue. Reads never
/// block on observers: notification happens after every lock on the state
/// has been released.
pub struct Store<R: Reducer> {
    inner: Arc<StoreInner<R>>,
}

struct StoreInner<R: Reducer> {
    config: StoreConfig,
    current: RwLock<Current<R::State>>,
    observers: Arc<Mutex<Registry<R::State>>>,
    /// Serializes `accept` across threads; re-entered by the dispatching
    /// thread when an observer calls `accept`.
    dispatch: ReentrantMutex<RefCell<DispatchQueue<R::Event>>>,
    history: Mutex<TransitionLog>,
}

struct Current<S> {
    state: S,
    generation: u64,
}

struct DispatchQueue<E> {
    active: bool,
    pending: VecDeque<E>,
}

/// A committed transition waiting to be fanned out.
struct Committed<S> {
    state: S,
    generation: u64,
}

#[derive(Default)]
struct Fanout {
    notified: usize,
    failed: usize,
    error: Option<StoreError>,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Reducer> Default for Store<R> {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl<R: Reducer> Store<R> {
    /// Create a store holding `R::State::default()`.
    pub fn new(config: StoreConfig) -> Self {
        Self::with_state(R::State::default(), config)
    }

    /// Create a store holding `state`.
    pub fn with_state(state: R::State, config: StoreConfig) -> Self {
        let history = TransitionLog::new(config.history_limit);
        Self {
            inner: Arc::new(StoreInner {
                config,
                current: RwLock::new(Current {
                    state,
                    generation: 0,
                }),
                observers: Arc::new(Mutex::new(Registry::new())),
                dispatch: ReentrantMutex::new(RefCell::new(DispatchQueue {
                    active: false,
                    pending: VecDeque::new(),
                })),
                history: Mutex::new(history),
            }),
        }
    }

    /// Policies this store was created with.
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Get a clone of the current state.
    pub fn state(&self) -> R::State {
        self.inner.current.read().state.clone()
    }

    /// Number of transitions applied since the store was created.
    pub fn generation(&self) -> u64 {
        self.inner.current.read().generation
    }

    /// Apply `event` and notify every observer with the resulting state.
    ///
    /// Calls from other threads wait until the in-progress dispatch,
    /// including any queued re-entrant events, has finished. Calls from
    /// inside an observer follow the configured [`ReentrancyPolicy`].
    ///
    /// # Errors
    /// - [`StoreError::ReentrantAccept`] for a nested call under
    ///   `ReentrancyPolicy::Reject`. State is unchanged.
    /// - [`StoreError::ObserverFailed`] under `FailurePolicy::Abort`. The
    ///   state has still been replaced.
    ///
    /// # Panics
    /// An observer panic propagates to the caller. The transition it was
    /// notified of stays committed and logged; events still queued are
    /// applied, ahead of its own event, by the next `accept`.
    pub fn accept(&self, event: R::Event) -> Result<Dispatch, StoreError> {
        let dispatch = self.inner.dispatch.lock();
        let position = {
            let mut queue = dispatch.borrow_mut();
            if queue.active {
                return match self.inner.config.reentrancy {
                    ReentrancyPolicy::Queue => {
                        tracing::debug!(
                            event = ?event,
                            pending = queue.pending.len() + 1,
                            "Re-entrant event queued"
                        );
                        queue.pending.push_back(event);
                        Ok(Dispatch::Queued)
                    }
                    ReentrancyPolicy::Reject => {
                        tracing::warn!(event = ?event, "Re-entrant accept rejected");
                        Err(StoreError::ReentrantAccept)
                    }
                };
            }
            if !queue.pending.is_empty() {
                tracing::debug!(
                    leftover = queue.pending.len(),
                    "Applying events left queued by an interrupted dispatch"
                );
            }
            queue.active = true;
            queue.pending.push_back(event);
            queue.pending.len()
        };

        let _active = scopeguard::guard(&*dispatch, |queue| {
            queue.borrow_mut().active = false;
        });

        let mut applied = 0;
        let mut generation = 0;
        let mut first_error = None;

        loop {
            let next = dispatch.borrow_mut().pending.pop_front();
            let Some(event) = next else {
                break;
            };
            let committed = self.commit(event);
            applied += 1;
            if applied == position {
                generation = committed.generation;
            }
            let err = self.publish(committed);
            if first_error.is_none() {
                first_error = err;
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(Dispatch::Applied { generation }),
        }
    }

    /// Register `observer` at the end of the notification order.
    ///
    /// The store keeps only a weak handle: the caller owns the observer,
    /// and once every `Arc` to it is dropped it stops being notified.
    /// Subscribing the same `Arc` twice returns the existing id.
    pub fn subscribe<O>(&self, observer: &Arc<O>) -> SubscriptionId
    where
        O: Observer<R::State> + 'static,
    {
        let observer: Arc<dyn Observer<R::State>> = observer.clone();
        self.inner.observers.lock().insert(&observer)
    }

    /// Register a closure observer, owned by the returned guard.
    pub fn subscribe_fn<F>(&self, f: F) -> Subscription<R::State>
    where
        F: Fn(&R::State) -> Result<(), ObserverError> + Send + Sync + 'static,
    {
        let observer: Arc<dyn Observer<R::State>> = Arc::new(f);
        let id = self.inner.observers.lock().insert(&observer);
        Subscription::new(id, Arc::downgrade(&self.inner.observers), observer)
    }

    /// Remove an observer. Returns `false` if `id` isn't registered.
    ///
    /// Takes effect for every transition committed after this returns,
    /// including events already queued by an in-progress dispatch.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.observers.lock().remove(id)
    }

    /// Number of registered observers that are still alive.
    pub fn observer_count(&self) -> usize {
        self.inner.observers.lock().live_count()
    }

    /// Recent transitions, oldest first.
    pub fn transitions(&self) -> Vec<TransitionLogEntry> {
        self.inner.history.lock().entries()
    }

    /// Reduce `event` against the current state, replace it and log it.
    fn commit(&self, event: R::Event) -> Committed<R::State> {
        let event_repr = self
            .inner
            .history
            .lock()
            .is_enabled()
            .then(|| format!("{:?}", event));

        let mut current = self.inner.current.write();
        let next = R::reduce(current.state.clone(), event);
        current.state = next.clone();
        current.generation += 1;
        let generation = current.generation;
        drop(current);

        tracing::debug!(generation, state = ?next, "State committed");

        if let Some(event) = event_repr {
            self.inner.history.lock().push(TransitionLogEntry {
                generation,
                timestamp: SystemTime::now(),
                event,
                notified: 0,
                failed: 0,
            });
        }

        Committed {
            state: next,
            generation,
        }
    }

    /// Notify observers of a committed transition.
    ///
    /// The log entry gets the fan-out counts even if an observer panics.
    fn publish(&self, committed: Committed<R::State>) -> Option<StoreError> {
        let generation = committed.generation;
        let mut fanout = scopeguard::guard(Fanout::default(), |fanout| {
            self.inner
                .history
                .lock()
                .record_fanout(generation, fanout.notified, fanout.failed);
        });

        self.notify(&committed.state, generation, &mut fanout);
        fanout.error.take()
    }

    fn notify(&self, state: &R::State, generation: u64, fanout: &mut Fanout) {
        let observers = self.inner.observers.lock().snapshot();

        for (subscription, observer) in observers {
            fanout.notified += 1;
            let Err(source) = observer.on_state(state) else {
                continue;
            };
            fanout.failed += 1;

            match self.inner.config.observer_failure {
                FailurePolicy::Isolate => {
                    tracing::warn!(
                        subscription = %subscription,
                        generation,
                        error = %source,
                        "Observer failed, notifying remaining observers"
                    );
                }
                FailurePolicy::Abort => {
                    tracing::warn!(
                        subscription = %subscription,
                        generation,
                        error = %source,
                        "Observer failed, skipping remaining observers"
                    );
                    fanout.error = Some(StoreError::ObserverFailed {
                        subscription,
                        source,
                    });
                    break;
                }
            }
        }
    }
}
