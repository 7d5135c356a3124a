use std::collections::VecDeque;

use crate::{Action, Coord, Direction};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered queue of atomic actions the agent intends to execute.
///
/// Planners output a `Plan`; the agent pops one step per tick and may discard the remainder when
/// new knowledge invalidates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Plan {
    pub steps: VecDeque<Action>,
}

impl Plan {
    pub fn new(steps: impl IntoIterator<Item = Action>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn peek(&self) -> Option<Action> {
        self.steps.front().copied()
    }

    pub fn pop(&mut self) -> Option<Action> {
        self.steps.pop_front()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.steps.iter().copied()
    }
}

/// Apply the kinematic part of `actions` to a pose.
pub fn simulate_actions(
    actions: impl IntoIterator<Item = Action>,
    mut pos: Coord,
    mut dir: Direction,
) -> (Coord, Direction) {
    for action in actions {
        match action {
            Action::MoveForward => pos = pos.step(dir),
            Action::TurnLeft => dir = dir.turn_left(),
            Action::TurnRight => dir = dir.turn_right(),
            Action::Grab | Action::Shoot | Action::ClimbOut => {}
        }
    }
    (pos, dir)
}

/// Minimal rotation sequence from `from` to `to`.
pub fn turns_to_face(from: Direction, to: Direction) -> Vec<Action> {
    match from.clockwise_turns_to(to) {
        0 => Vec::new(),
        1 => vec![Action::TurnRight],
        2 => vec![Action::TurnRight, Action::TurnRight],
        _ => vec![Action::TurnLeft],
    }
}
