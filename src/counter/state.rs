use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mvi::State;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CounterState {
    pub value: Option<i64>,
    pub label: Option<String>,
}

impl State for CounterState {}

impl fmt::Display for CounterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{{value: {}", value)?,
            None => write!(f, "{{value: nil")?,
        }
        if let Some(label) = &self.label {
            write!(f, ", label: {:?}", label)?;
        }
        write!(f, "}}")
    }
}
