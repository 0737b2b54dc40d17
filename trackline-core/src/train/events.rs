use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Discrete user input applied to a train between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputEvent {
    TurnLeft,
    TurnRight,
    Forward,
    Backward,
}

impl InputEvent {
    pub const ALL: [InputEvent; 4] = [
        InputEvent::TurnLeft,
        InputEvent::TurnRight,
        InputEvent::Forward,
        InputEvent::Backward,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InputEvent::TurnLeft => "turn-left",
            InputEvent::TurnRight => "turn-right",
            InputEvent::Forward => "forward",
            InputEvent::Backward => "backward",
        }
    }

    /// Map a keyboard `code` (as in DOM `KeyboardEvent.code`) to an event.
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(InputEvent::TurnLeft),
            "ArrowRight" => Some(InputEvent::TurnRight),
            "ArrowUp" => Some(InputEvent::Forward),
            "ArrowDown" => Some(InputEvent::Backward),
            _ => None,
        }
    }
}

impl FromStr for InputEvent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputEvent::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| Error::InvalidEvent(s.to_string()))
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_serde() {
        for event in InputEvent::ALL {
            let json = serde_json::to_string(&event).unwrap();
            assert_eq!(json, format!("\"{event}\""));
            assert_eq!(event.as_str().parse::<InputEvent>().unwrap(), event);
        }
    }

    #[test]
    fn arrow_keys_map_to_events() {
        assert_eq!(InputEvent::from_key_code("ArrowLeft"), Some(InputEvent::TurnLeft));
        assert_eq!(InputEvent::from_key_code("ArrowDown"), Some(InputEvent::Backward));
        assert_eq!(InputEvent::from_key_code("KeyW"), None);
    }

    #[test]
    fn unknown_names_are_errors() {
        assert!(matches!(
            "sideways".parse::<InputEvent>(),
            Err(Error::InvalidEvent(name)) if name == "sideways"
        ));
    }
}
