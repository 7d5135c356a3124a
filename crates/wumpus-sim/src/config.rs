//! Simulation configuration loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wumpus_core::{Action, GridSize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config from {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Score deltas applied by the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scoring {
    pub move_forward: i64,
    pub turn: i64,
    pub shoot: i64,
    pub grab: i64,
    pub death: i64,
    pub climb_with_gold: i64,
    pub climb_without_gold: i64,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            move_forward: -1,
            turn: -1,
            shoot: -10,
            grab: 10,
            death: -1000,
            climb_with_gold: 1000,
            climb_without_gold: 0,
        }
    }
}

impl Scoring {
    /// Flat cost of issuing `action`. Grabbing and climbing are scored by outcome instead.
    pub fn action_cost(&self, action: Action) -> i64 {
        match action {
            Action::MoveForward => self.move_forward,
            Action::TurnLeft | Action::TurnRight => self.turn,
            Action::Shoot => self.shoot,
            Action::Grab | Action::ClimbOut => 0,
        }
    }
}

/// World generation and episode settings, usually the `sim:` section of a run config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Side length of the square grid.
    pub size: u32,
    pub wumpus_count: u32,
    /// Independent chance of a pit in each cell outside the start area.
    pub pit_probability: f64,
    pub relocation: bool,
    pub relocation_interval: u32,
    pub max_steps: u32,
    pub seed: u64,
    pub scoring: Scoring,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            size: 8,
            wumpus_count: 2,
            pit_probability: 0.2,
            relocation: false,
            relocation_interval: 5,
            max_steps: 500,
            seed: 0,
            scoring: Scoring::default(),
        }
    }
}

impl SimConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < 2 {
            return Err(ConfigError::Invalid("size must be at least 2".into()));
        }
        if !(0.0..=1.0).contains(&self.pit_probability) {
            return Err(ConfigError::Invalid(format!(
                "pit_probability must be within [0, 1], got {}",
                self.pit_probability
            )));
        }
        if self.relocation_interval == 0 {
            return Err(ConfigError::Invalid(
                "relocation_interval must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn grid(&self) -> GridSize {
        GridSize::square(self.size)
    }
}
