//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use flowstore::config::{FailurePolicy, ReentrancyPolicy, StoreConfig};
use flowstore::counter::{CounterReducer, CounterState};
use flowstore::store::{Observer, ObserverError, Store};
use parking_lot::Mutex;
use std::sync::Arc;

/// Notifications from several observers, in the order they happened.
pub type Journal = Arc<Mutex<Vec<(&'static str, CounterState)>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

/// Observer that remembers every state it was handed.
pub struct Recorder {
    name: &'static str,
    seen: Mutex<Vec<CounterState>>,
    journal: Option<Journal>,
}

impl Recorder {
    pub fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            seen: Mutex::new(Vec::new()),
            journal: None,
        })
    }

    pub fn with_journal(name: &'static str, journal: &Journal) -> Arc<Self> {
        Arc::new(Self {
            name,
            seen: Mutex::new(Vec::new()),
            journal: Some(Arc::clone(journal)),
        })
    }

    pub fn seen(&self) -> Vec<CounterState> {
        self.seen.lock().clone()
    }

    pub fn values(&self) -> Vec<Option<i64>> {
        self.seen.lock().iter().map(|s| s.value).collect()
    }
}

impl Observer<CounterState> for Recorder {
    fn on_state(&self, state: &CounterState) -> Result<(), ObserverError> {
        self.seen.lock().push(state.clone());
        if let Some(journal) = &self.journal {
            journal.lock().push((self.name, state.clone()));
        }
        Ok(())
    }
}

/// Observer that always fails.
pub struct Failing;

impl Observer<CounterState> for Failing {
    fn on_state(&self, _state: &CounterState) -> Result<(), ObserverError> {
        Err(ObserverError::new("observer exploded"))
    }
}

pub fn store() -> Store<CounterReducer> {
    Store::default()
}

pub fn store_with(
    reentrancy: ReentrancyPolicy,
    observer_failure: FailurePolicy,
) -> Store<CounterReducer> {
    Store::new(StoreConfig {
        reentrancy,
        observer_failure,
        ..StoreConfig::default()
    })
}

pub fn value(value: i64) -> CounterState {
    CounterState {
        value: Some(value),
        label: None,
    }
}
