//! Store configuration: policies and their TOML loader.

mod loader;
mod types;

pub use loader::{ConfigError, MAX_HISTORY_LIMIT};
pub use types::{FailurePolicy, ReentrancyPolicy, StoreConfig};
