use wumpus_core::{Coord, GridSize};

use crate::{Fact, FactSet};

/// Facts for one cell, split by how long they stay valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellFacts {
    /// Direct visitation or irreversible conclusions.
    pub permanent: FactSet,
    /// Absence-of-percept evidence that a relocation epoch may invalidate.
    pub volatile: FactSet,
}

impl CellFacts {
    pub fn all(&self) -> FactSet {
        self.permanent.union(self.volatile)
    }
}

/// Coordinate-indexed arena of per-cell facts, visited flags and the live wumpus counter.
///
/// Writes outside the grid are ignored; reads outside the grid see an empty set.
#[derive(Debug, Clone)]
pub struct FactStore {
    size: GridSize,
    cells: Vec<CellFacts>,
    visited: Vec<bool>,
    /// Stench markers recorded before the latest scream.
    stale_stench: Vec<bool>,
    initial_wumpuses: u32,
    live_wumpuses: u32,
    gold_at: Option<Coord>,
}

impl FactStore {
    /// Fresh store for one episode. The entrance is seeded as permanently safe.
    pub fn new(size: GridSize, wumpus_count: u32) -> Self {
        let mut store = Self {
            size,
            cells: vec![CellFacts::default(); size.len()],
            visited: vec![false; size.len()],
            stale_stench: vec![false; size.len()],
            initial_wumpuses: wumpus_count,
            live_wumpuses: wumpus_count,
            gold_at: None,
        };
        for fact in [Fact::NoPit, Fact::NoWumpus, Fact::Safe] {
            store.add_fact(Coord::ORIGIN, fact, false);
        }
        store
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn in_bounds(&self, c: Coord) -> bool {
        self.size.contains(c)
    }

    pub fn neighbors(&self, c: Coord) -> impl Iterator<Item = Coord> {
        self.size.neighbors(c)
    }

    /// Add `fact` to the chosen tier. Returns `true` if the combined set gained the fact.
    pub fn add_fact(&mut self, c: Coord, fact: Fact, volatile: bool) -> bool {
        let Some(idx) = self.size.index(c) else {
            return false;
        };
        let cell = &mut self.cells[idx];
        let is_new = !cell.all().contains(fact);
        if volatile {
            cell.volatile.insert(fact);
        } else {
            cell.permanent.insert(fact);
        }
        is_new
    }

    /// Union of both tiers.
    pub fn facts(&self, c: Coord) -> FactSet {
        self.size
            .index(c)
            .map(|idx| self.cells[idx].all())
            .unwrap_or_default()
    }

    pub fn has(&self, c: Coord, fact: Fact) -> bool {
        self.facts(c).contains(fact)
    }

    pub fn cell(&self, c: Coord) -> Option<&CellFacts> {
        self.size.index(c).map(|idx| &self.cells[idx])
    }

    pub fn permanent_facts(&self, c: Coord) -> FactSet {
        self.cell(c).map(|cell| cell.permanent).unwrap_or_default()
    }

    pub fn volatile_facts(&self, c: Coord) -> FactSet {
        self.cell(c).map(|cell| cell.volatile).unwrap_or_default()
    }

    /// Strike `fact` from both tiers. Returns `true` if it was present in either.
    pub fn remove_fact(&mut self, c: Coord, fact: Fact) -> bool {
        let Some(idx) = self.size.index(c) else {
            return false;
        };
        let cell = &mut self.cells[idx];
        let a = cell.permanent.remove(fact);
        let b = cell.volatile.remove(fact);
        a || b
    }

    pub fn drop_volatile(&mut self, c: Coord) {
        if let Some(idx) = self.size.index(c) {
            self.cells[idx].volatile.clear();
        }
    }

    /// Mark `c` visited. Only the first call records the permanent safety facts.
    ///
    /// Returns `true` when the cell was not visited before.
    pub fn mark_visited(&mut self, c: Coord) -> bool {
        let Some(idx) = self.size.index(c) else {
            return false;
        };
        if self.visited[idx] {
            return false;
        }
        self.visited[idx] = true;
        for fact in [Fact::Safe, Fact::NoWumpus, Fact::NoPit] {
            self.cells[idx].permanent.insert(fact);
        }
        true
    }

    pub fn is_visited(&self, c: Coord) -> bool {
        self.size
            .index(c)
            .map(|idx| self.visited[idx])
            .unwrap_or(false)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|v| **v).count()
    }

    pub fn initial_wumpuses(&self) -> u32 {
        self.initial_wumpuses
    }

    /// Wumpuses not yet heard dying.
    pub fn live_wumpuses(&self) -> u32 {
        self.live_wumpuses
    }

    /// Record one scream. The counter never goes below zero.
    ///
    /// Every stench marker on file may have come from the wumpus that just died, so all of them
    /// go stale until the cell is sensed again.
    pub fn record_kill(&mut self) {
        self.live_wumpuses = self.live_wumpuses.saturating_sub(1);
        for (idx, cell) in self.cells.iter().enumerate() {
            if cell.all().contains(Fact::Stench) {
                self.stale_stench[idx] = true;
            }
        }
    }

    /// Stench was sensed at `c` on this tick, after any kill.
    pub fn refresh_stench(&mut self, c: Coord) {
        if let Some(idx) = self.size.index(c) {
            self.stale_stench[idx] = false;
        }
    }

    /// The stench marker at `c` predates the latest scream.
    pub fn stench_is_stale(&self, c: Coord) -> bool {
        self.size
            .index(c)
            .map(|idx| self.stale_stench[idx])
            .unwrap_or(false)
    }

    pub fn gold_at(&self) -> Option<Coord> {
        self.gold_at
    }

    pub fn set_gold_at(&mut self, c: Coord) {
        if self.in_bounds(c) {
            self.gold_at = Some(c);
        }
    }

    /// Cells holding a live wumpus, in grid-scan order.
    pub fn live_wumpus_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.size
            .cells()
            .filter(move |c| self.facts(*c).has_live_wumpus())
    }
}
