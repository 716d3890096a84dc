mod event;
mod reducer;
mod state;

pub use event::{CounterEvent, ParseEventError};
pub use reducer::CounterReducer;
pub use state::CounterState;
