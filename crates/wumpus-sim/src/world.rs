//! The simulated world: true map, agent body, scoring and wumpus relocation.

use wumpus_core::{
    Action, Coord, DeterministicRng, Direction, EnvState, Environment, GameStatus, Percept,
    Percepts, SplitMix64,
};

use crate::{Scoring, WorldMap};

/// Wumpus movement schedule for the moving-wumpus variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    interval: u32,
    since_move: u32,
    rng: SplitMix64,
}

impl Relocation {
    /// `interval` is clamped to at least one action.
    pub fn new(interval: u32, seed: u64) -> Self {
        Self {
            interval: interval.max(1),
            since_move: 0,
            rng: SplitMix64::new(seed),
        }
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Actions counted since the wumpuses last moved.
    pub fn since_move(&self) -> u32 {
        self.since_move
    }
}

#[derive(Debug, Clone)]
pub struct WumpusWorld {
    map: WorldMap,
    scoring: Scoring,
    state: EnvState,
    scream_pending: bool,
    bump_pending: bool,
    relocation: Option<Relocation>,
}

impl WumpusWorld {
    pub fn new(map: WorldMap, scoring: Scoring) -> Self {
        Self {
            map,
            scoring,
            state: EnvState::default(),
            scream_pending: false,
            bump_pending: false,
            relocation: None,
        }
    }

    pub fn with_relocation(mut self, relocation: Relocation) -> Self {
        self.relocation = Some(relocation);
        self
    }

    /// The hidden map. Never handed to the agent.
    pub fn true_map(&self) -> &WorldMap {
        &self.map
    }

    pub fn relocation(&self) -> Option<&Relocation> {
        self.relocation.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.state.status != GameStatus::Playing
    }

    fn kill_agent(&mut self) {
        self.state.score += self.scoring.death;
        self.state.status = GameStatus::Lost;
    }

    fn check_death(&mut self) -> bool {
        if self.map.is_deadly(self.state.position) {
            self.kill_agent();
            return true;
        }
        false
    }

    fn move_forward(&mut self) -> String {
        let ahead = self.state.position.step(self.state.direction);
        if self.map.size().contains(ahead) {
            self.state.position = ahead;
            format!("Moved to {ahead}.")
        } else {
            self.bump_pending = true;
            "Bump! You hit a wall.".to_string()
        }
    }

    fn grab(&mut self) -> String {
        let here = self.state.position;
        if self.map.has_gold(here) {
            self.map.set_gold(here, false);
            self.state.has_gold = true;
            self.state.score += self.scoring.grab;
            "Success! You grabbed the gold.".to_string()
        } else {
            "There is nothing here to grab.".to_string()
        }
    }

    fn shoot(&mut self) -> String {
        if !self.state.has_arrow {
            return "You have no arrow left.".to_string();
        }
        self.state.has_arrow = false;

        let hit = self
            .map
            .size()
            .ray(self.state.position, self.state.direction)
            .find(|c| self.map.has_wumpus(*c));
        match hit {
            Some(target) => {
                self.map.set_wumpus(target, false);
                self.scream_pending = true;
                tracing::debug!(%target, "wumpus killed");
                "You shot your arrow. You hear a terrible scream!".to_string()
            }
            None => "You shot your arrow.".to_string(),
        }
    }

    fn climb_out(&mut self) -> String {
        if self.state.position != Coord::ORIGIN {
            return "You can only climb out from the entrance.".to_string();
        }
        if self.state.has_gold {
            self.state.score += self.scoring.climb_with_gold;
            self.state.status = GameStatus::Won;
            "You climbed out with the gold. You win!".to_string()
        } else {
            self.state.score += self.scoring.climb_without_gold;
            self.state.status = GameStatus::Lost;
            "You climbed out without the gold. You lose.".to_string()
        }
    }

    /// Counts one action and moves every wumpus once the interval is reached.
    fn tick_relocation(&mut self) {
        let Some(relocation) = self.relocation.as_mut() else {
            return;
        };
        relocation.since_move += 1;
        if relocation.since_move < relocation.interval {
            return;
        }
        relocation.since_move = 0;
        self.move_wumpuses();
    }

    /// Each wumpus, in grid-scan order, steps to a uniformly chosen neighbour that is in bounds,
    /// pit-free, wumpus-free and not already claimed this phase.
    fn move_wumpuses(&mut self) {
        let Some(relocation) = self.relocation.as_mut() else {
            return;
        };
        let size = self.map.size();
        let mut reserved: Vec<Coord> = Vec::new();

        for from in self.map.wumpuses() {
            if !self.map.has_wumpus(from) {
                continue;
            }
            let candidates: Vec<Coord> = Direction::ALL
                .into_iter()
                .map(|d| from.step(d))
                .filter(|c| size.contains(*c))
                .filter(|c| !self.map.has_pit(*c) && !self.map.has_wumpus(*c))
                .filter(|c| !reserved.contains(c))
                .collect();
            if candidates.is_empty() {
                continue;
            }

            let to = candidates[relocation.rng.next_below(candidates.len())];
            self.map.set_wumpus(from, false);
            self.map.set_wumpus(to, true);
            reserved.push(to);
            tracing::trace!(%from, %to, "wumpus moved");

            if to == self.state.position {
                tracing::debug!(at = %to, "wumpus walked onto the agent");
                self.state.score += self.scoring.death;
                self.state.status = GameStatus::Lost;
                break;
            }
        }
    }
}

impl Environment for WumpusWorld {
    /// Scream and bump are reported once, on the first perception after the action that caused
    /// them.
    fn percepts(&mut self) -> Percepts {
        let here = self.state.position;
        let mut percepts = Percepts::NONE;

        if self.map.has_gold(here) {
            percepts.insert(Percept::Glitter);
        }
        for n in self.map.size().neighbors(here) {
            if self.map.has_wumpus(n) {
                percepts.insert(Percept::Stench);
            }
            if self.map.has_pit(n) {
                percepts.insert(Percept::Breeze);
            }
        }
        if std::mem::take(&mut self.scream_pending) {
            percepts.insert(Percept::Scream);
        }
        if std::mem::take(&mut self.bump_pending) {
            percepts.insert(Percept::Bump);
        }
        percepts
    }

    fn apply_action(&mut self, action: Action) -> String {
        if self.is_over() {
            return "The game is over.".to_string();
        }
        self.bump_pending = false;

        self.state.score += self.scoring.action_cost(action);
        let message = match action {
            Action::MoveForward => self.move_forward(),
            Action::TurnLeft => {
                self.state.direction = self.state.direction.turn_left();
                "Turned left.".to_string()
            }
            Action::TurnRight => {
                self.state.direction = self.state.direction.turn_right();
                "Turned right.".to_string()
            }
            Action::Grab => self.grab(),
            Action::Shoot => self.shoot(),
            Action::ClimbOut => self.climb_out(),
        };

        if !self.is_over() && !self.check_death() {
            self.tick_relocation();
        }
        message
    }

    fn state(&self) -> EnvState {
        self.state
    }
}
