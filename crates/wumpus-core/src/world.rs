use crate::{Action, Coord, Direction, Percepts};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// Observable agent state as reported by the world after each action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnvState {
    pub position: Coord,
    pub direction: Direction,
    pub has_gold: bool,
    pub has_arrow: bool,
    pub score: i64,
    pub status: GameStatus,
}

impl Default for EnvState {
    fn default() -> Self {
        Self {
            position: Coord::ORIGIN,
            direction: Direction::East,
            has_gold: false,
            has_arrow: true,
            score: 0,
            status: GameStatus::Playing,
        }
    }
}

/// The world the agent acts in.
///
/// The reasoning crates never see the true map; they only consume percepts and the observable
/// [`EnvState`].
pub trait Environment {
    fn percepts(&mut self) -> Percepts;

    /// Apply one action and describe the outcome.
    fn apply_action(&mut self, action: Action) -> String;

    fn state(&self) -> EnvState;
}
