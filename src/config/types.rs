use serde::{Deserialize, Serialize};

/// Store behaviour settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// What `accept` does when called from inside an observer callback.
    pub reentrancy: ReentrancyPolicy,
    /// What happens to the remaining observers when one fails.
    pub observer_failure: FailurePolicy,
    /// Number of transition log entries kept (0 disables the log).
    pub history_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            reentrancy: ReentrancyPolicy::default(),
            observer_failure: FailurePolicy::default(),
            history_limit: default_history_limit(),
        }
    }
}

/// Handling of `accept` calls made while a dispatch is in progress on the
/// same thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReentrancyPolicy {
    /// Append the event to a FIFO drained after the current fan-out.
    #[default]
    Queue,
    /// Refuse the nested call with `StoreError::ReentrantAccept`.
    Reject,
}

/// Handling of an observer returning an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log the failure and keep notifying the remaining observers.
    #[default]
    Isolate,
    /// Skip the remaining observers and return the error from `accept`.
    Abort,
}

fn default_history_limit() -> usize {
    64
}
