use wumpus_core::{Coord, GridSize};
use wumpus_kb::{CellStatus, StatusGrid};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Read access to per-cell classification.
pub trait RiskMap {
    fn size(&self) -> GridSize;

    /// `None` outside the grid.
    fn status(&self, c: Coord) -> Option<CellStatus>;
}

impl RiskMap for StatusGrid {
    fn size(&self) -> GridSize {
        StatusGrid::size(self)
    }

    fn status(&self, c: Coord) -> Option<CellStatus> {
        self.get(c)
    }
}

/// Base action costs and per-status entry surcharges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathCosts {
    pub move_cost: u32,
    pub turn_cost: u32,
    pub unknown_risk: u32,
    pub dangerous_risk: u32,
    /// Charged for visited cells only while an epoch budget is active.
    pub visited_soft_risk: u32,
}

impl Default for PathCosts {
    fn default() -> Self {
        Self {
            move_cost: 1,
            turn_cost: 1,
            unknown_risk: 6,
            dangerous_risk: 60,
            visited_soft_risk: 2,
        }
    }
}

/// Actions remaining before the next relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EpochBudget {
    pub actions_left: u32,
}

impl EpochBudget {
    pub fn new(actions_left: u32) -> Self {
        Self { actions_left }
    }

    /// `surcharge * (1 + 1.5 / max(1, actions_left))`, rounded down.
    pub fn scale(self, surcharge: u32) -> u32 {
        let left = u64::from(self.actions_left.max(1));
        let scaled = u64::from(surcharge) * (2 * left + 3) / (2 * left);
        u32::try_from(scaled).unwrap_or(u32::MAX)
    }
}

impl PathCosts {
    /// Surcharge for entering a cell, or `None` if the cell may not be entered.
    pub fn surcharge(
        &self,
        status: CellStatus,
        avoid_dangerous: bool,
        budget: Option<EpochBudget>,
    ) -> Option<u32> {
        let raw = match (status, budget) {
            (CellStatus::Safe, _) => 0,
            (CellStatus::Visited, None) => 0,
            (CellStatus::Visited, Some(_)) => self.visited_soft_risk,
            (CellStatus::Unknown, _) => self.unknown_risk,
            (CellStatus::Dangerous, _) if avoid_dangerous => return None,
            (CellStatus::Dangerous, _) => self.dangerous_risk,
        };
        Some(match budget {
            Some(b) => b.scale(raw),
            None => raw,
        })
    }

    /// Full cost of a MoveForward into a cell of `status`.
    pub fn entry_cost(
        &self,
        status: CellStatus,
        avoid_dangerous: bool,
        budget: Option<EpochBudget>,
    ) -> Option<u32> {
        self.surcharge(status, avoid_dangerous, budget)
            .map(|s| self.move_cost.saturating_add(s))
    }
}
