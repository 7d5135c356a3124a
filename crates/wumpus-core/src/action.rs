use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Atomic agent action. The string forms are part of the world protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Action {
    MoveForward,
    TurnLeft,
    TurnRight,
    Grab,
    Shoot,
    ClimbOut,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::MoveForward,
        Action::TurnLeft,
        Action::TurnRight,
        Action::Grab,
        Action::Shoot,
        Action::ClimbOut,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::MoveForward => "MoveForward",
            Action::TurnLeft => "TurnLeft",
            Action::TurnRight => "TurnRight",
            Action::Grab => "Grab",
            Action::Shoot => "Shoot",
            Action::ClimbOut => "ClimbOut",
        }
    }

    pub fn is_turn(self) -> bool {
        matches!(self, Action::TurnLeft | Action::TurnRight)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action `{0}`")]
pub struct ParseActionError(pub String);

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ParseActionError(s.to_string()))
    }
}
