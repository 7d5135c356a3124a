use core::fmt;

use wumpus_core::{Coord, GridSize};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Fact, FactStore};

/// Coarse per-cell classification that the planners consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CellStatus {
    #[default]
    Unknown,
    Safe,
    Dangerous,
    Visited,
}

impl CellStatus {
    /// Visited cells count as safe.
    pub fn is_safe(self) -> bool {
        matches!(self, CellStatus::Safe | CellStatus::Visited)
    }

    pub fn glyph(self) -> char {
        match self {
            CellStatus::Unknown => '?',
            CellStatus::Safe => '.',
            CellStatus::Dangerous => '!',
            CellStatus::Visited => 'v',
        }
    }

    /// Visited wins, then positive safety, then a confirmed hazard.
    pub fn classify(store: &FactStore, c: Coord) -> CellStatus {
        if store.is_visited(c) {
            return CellStatus::Visited;
        }
        let facts = store.facts(c);
        if facts.contains(Fact::Safe) || facts.contains(Fact::DeadWumpus) {
            CellStatus::Safe
        } else if facts.has_live_wumpus() || facts.contains(Fact::Pit) {
            CellStatus::Dangerous
        } else {
            CellStatus::Unknown
        }
    }
}

/// Read-only classification snapshot of the whole grid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StatusGrid {
    size: GridSize,
    cells: Vec<CellStatus>,
}

impl StatusGrid {
    /// Every cell Unknown.
    pub fn unknown(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![CellStatus::Unknown; size.len()],
        }
    }

    pub fn from_store(store: &FactStore) -> Self {
        let size = store.size();
        let mut grid = Self::unknown(size);
        for c in size.cells() {
            grid.set(c, CellStatus::classify(store, c));
        }
        grid
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// `None` outside the grid.
    pub fn get(&self, c: Coord) -> Option<CellStatus> {
        self.size.index(c).map(|idx| self.cells[idx])
    }

    pub fn set(&mut self, c: Coord, status: CellStatus) {
        if let Some(idx) = self.size.index(c) {
            self.cells[idx] = status;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, CellStatus)> + '_ {
        // Scan order and storage order coincide.
        self.size.cells().zip(self.cells.iter().copied())
    }

    pub fn count(&self, status: CellStatus) -> usize {
        self.cells.iter().filter(|s| **s == status).count()
    }
}

/// Rows printed north first.
impl fmt::Display for StatusGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.size.height as i32).rev() {
            for x in 0..self.size.width as i32 {
                let glyph = self.get(Coord::new(x, y)).map_or(' ', CellStatus::glyph);
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
