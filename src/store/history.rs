use std::collections::VecDeque;
use std::time::SystemTime;

/// Log entry for one applied transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionLogEntry {
    /// Generation the transition produced (1 for the first event).
    pub generation: u64,
    /// When the new state was committed.
    pub timestamp: SystemTime,
    /// `Debug` rendering of the event.
    pub event: String,
    /// Observers invoked for this transition.
    pub notified: usize,
    /// Observers that returned an error.
    pub failed: usize,
}

/// Bounded history, oldest entries evicted first.
pub(crate) struct TransitionLog {
    limit: usize,
    entries: VecDeque<TransitionLogEntry>,
}

impl TransitionLog {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            limit,
            entries: VecDeque::with_capacity(limit.min(64)),
        }
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.limit > 0
    }

    pub(crate) fn push(&mut self, entry: TransitionLogEntry) {
        if !self.is_enabled() {
            return;
        }
        while self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Fill in the observer counts of an already logged transition.
    pub(crate) fn record_fanout(&mut self, generation: u64, notified: usize, failed: usize) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .rev()
            .find(|entry| entry.generation == generation)
        {
            entry.notified = notified;
            entry.failed = failed;
        }
    }

    pub(crate) fn entries(&self) -> Vec<TransitionLogEntry> {
        self.entries.iter().cloned().collect()
    }
}
