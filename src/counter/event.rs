use std::str::FromStr;

use thiserror::Error;

use crate::mvi::Event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterEvent {
    ChangeValue { value: i64 },
    /// Treats a missing value as zero. Saturates instead of overflowing.
    Increment { by: i64 },
    ClearValue,
    Rename { label: String },
}

impl Event for CounterEvent {}

/// Error for a command-line event token that doesn't describe an event.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseEventError {
    #[error("Unknown event '{token}' (expected set:<n>, inc:<n>, clear or label:<text>)")]
    UnknownEvent { token: String },

    #[error("Invalid number in event '{token}'")]
    InvalidNumber { token: String },
}

impl FromStr for CounterEvent {
    type Err = ParseEventError;

    /// Parses `set:<n>`, `inc:<n>`, `clear` or `label:<text>`.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (kind, arg) = match token.split_once(':') {
            Some((kind, arg)) => (kind, Some(arg)),
            None => (token, None),
        };

        let number = |arg: &str| {
            arg.trim()
                .parse::<i64>()
                .map_err(|_| ParseEventError::InvalidNumber {
                    token: token.to_string(),
                })
        };

        match (kind, arg) {
            ("set", Some(arg)) => Ok(CounterEvent::ChangeValue { value: number(arg)? }),
            ("inc", Some(arg)) => Ok(CounterEvent::Increment { by: number(arg)? }),
            ("clear", None) => Ok(CounterEvent::ClearValue),
            ("label", Some(arg)) => Ok(CounterEvent::Rename {
                label: arg.to_string(),
            }),
            _ => Err(ParseEventError::UnknownEvent {
                token: token.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_event_kind() {
        assert_eq!(
            "set:10".parse::<CounterEvent>(),
            Ok(CounterEvent::ChangeValue { value: 10 })
        );
        assert_eq!(
            "inc:-3".parse::<CounterEvent>(),
            Ok(CounterEvent::Increment { by: -3 })
        );
        assert_eq!("clear".parse::<CounterEvent>(), Ok(CounterEvent::ClearValue));
        assert_eq!(
            "label:a:b".parse::<CounterEvent>(),
            Ok(CounterEvent::Rename {
                label: "a:b".to_string()
            })
        );
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(matches!(
            "set:ten".parse::<CounterEvent>(),
            Err(ParseEventError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn rejects_unknown_and_malformed_tokens() {
        assert!(matches!(
            "bump".parse::<CounterEvent>(),
            Err(ParseEventError::UnknownEvent { .. })
        ));
        // `set` needs an argument, `clear` takes none
        assert!("set".parse::<CounterEvent>().is_err());
        assert!("clear:1".parse::<CounterEvent>().is_err());
    }
}
