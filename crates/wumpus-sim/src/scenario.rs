//! Hand-written worlds loaded from JSON.
//!
//! ```json
//! { "N": 4, "wumpus_positions": [[3, 3]], "pit_positions": [[1, 2]], "gold_position": [2, 2] }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wumpus_core::{Coord, GridSize};

use crate::WorldMap;

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("failed to read scenario from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario")]
    Parse(#[from] serde_json::Error),

    #[error("invalid scenario: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(rename = "N")]
    pub n: u32,
    #[serde(default)]
    pub wumpus_positions: Vec<[i32; 2]>,
    #[serde(default)]
    pub pit_positions: Vec<[i32; 2]>,
    pub gold_position: [i32; 2],
}

fn coord([x, y]: [i32; 2]) -> Coord {
    Coord::new(x, y)
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Self = serde_json::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Every position lies on the grid, no cell holds both a wumpus and a pit, and the entrance
    /// is hazard-free.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.n == 0 {
            return Err(ScenarioError::Invalid("N must be at least 1".into()));
        }
        let size = GridSize::square(self.n);
        let labelled = self
            .wumpus_positions
            .iter()
            .map(|p| ("wumpus", *p))
            .chain(self.pit_positions.iter().map(|p| ("pit", *p)))
            .chain([("gold", self.gold_position)]);
        for (what, p) in labelled {
            let c = coord(p);
            if !size.contains(c) {
                return Err(ScenarioError::Invalid(format!(
                    "{what} position {c} is outside the {n}x{n} grid",
                    n = self.n
                )));
            }
            if what != "gold" && c == Coord::ORIGIN {
                return Err(ScenarioError::Invalid(format!("{what} placed on the entrance")));
            }
        }
        if let Some(p) = self
            .wumpus_positions
            .iter()
            .find(|w| self.pit_positions.contains(*w))
        {
            return Err(ScenarioError::Invalid(format!(
                "cell {} holds both a wumpus and a pit",
                coord(*p)
            )));
        }
        Ok(())
    }

    pub fn size(&self) -> GridSize {
        GridSize::square(self.n)
    }

    /// Distinct wumpus cells; duplicates in the file collapse to one.
    pub fn wumpus_count(&self) -> u32 {
        let mut cells: Vec<Coord> = self.wumpus_positions.iter().copied().map(coord).collect();
        cells.sort();
        cells.dedup();
        cells.len() as u32
    }

    pub fn to_map(&self) -> WorldMap {
        let mut map = WorldMap::empty(self.size());
        for p in &self.wumpus_positions {
            map.set_wumpus(coord(*p), true);
        }
        for p in &self.pit_positions {
            map.set_pit(coord(*p), true);
        }
        map.set_gold(coord(self.gold_position), true);
        map
    }
}
