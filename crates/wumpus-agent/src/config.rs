//! Agent configuration loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wumpus_nav::PathCosts;

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

/// Weights of the get-unstuck utility functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtilityWeights {
    /// Base utility of shooting a confirmed wumpus.
    pub confirmed_shot: i64,
    /// Per visited stench neighbour of a suspected target.
    pub suspected_shot_per_stench: i64,
    /// Base utility of walking into an unknown cell (negative).
    pub risky_base: i64,
    /// Per visited neighbour percept (stench or breeze) of an unknown target.
    pub risky_per_threat: i64,
    /// Charged when relocation is on and the plan outlasts the current epoch.
    pub interruption_penalty: i64,
    /// Per suspected-wumpus neighbour of the cell occupied when the epoch ends.
    pub exposure_per_suspect: i64,
    /// Per stench neighbour of the cell occupied when the epoch ends.
    pub exposure_per_stench: i64,
}

impl Default for UtilityWeights {
    fn default() -> Self {
        Self {
            confirmed_shot: 100,
            suspected_shot_per_stench: 10,
            risky_base: -50,
            risky_per_threat: 20,
            interruption_penalty: 40,
            exposure_per_suspect: 30,
            exposure_per_stench: 10,
        }
    }
}

/// Agent configuration, usually the `agent:` section of a run config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub costs: PathCosts,
    pub utility: UtilityWeights,

    /// Wumpuses relocate every `relocation_interval` actions.
    pub relocation: bool,

    #[serde(default = "default_relocation_interval")]
    pub relocation_interval: u32,

    /// Wumpuses alive at the start of the episode.
    #[serde(default = "default_wumpus_count")]
    pub wumpus_count: u32,
}

fn default_relocation_interval() -> u32 {
    5
}
fn default_wumpus_count() -> u32 {
    2
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            costs: PathCosts::default(),
            utility: UtilityWeights::default(),
            relocation: false,
            relocation_interval: default_relocation_interval(),
            wumpus_count: default_wumpus_count(),
        }
    }
}

impl AgentConfig {
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
        if self.relocation_interval == 0 {
            return Err(ConfigError::Invalid(
                "relocation_interval must be at least 1".into(),
            ));
        }
        if self.costs.move_cost == 0 {
            return Err(ConfigError::Invalid("costs.move_cost must be at least 1".into()));
        }
        Ok(())
    }

    /// Actions left before the next relocation, given how many were spent this epoch.
    pub fn actions_left(&self, spent: u32) -> u32 {
        self.relocation_interval.saturating_sub(spent)
    }
}
