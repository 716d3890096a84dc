use crate::counter::event::CounterEvent;
use crate::counter::state::CounterState;
use crate::mvi::Reducer;

pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = CounterState;
    type Event = CounterEvent;

    fn reduce(state: Self::State, event: Self::Event) -> Self::State {
        match event {
            CounterEvent::ChangeValue { value } => CounterState {
                value: Some(value),
                ..state
            },
            CounterEvent::Increment { by } => CounterState {
                value: Some(state.value.unwrap_or(0).saturating_add(by)),
                ..state
            },
            CounterEvent::ClearValue => CounterState {
                value: None,
                ..state
            },
            CounterEvent::Rename { label } => CounterState {
                label: Some(label),
                ..state
            },
        }
    }
}
