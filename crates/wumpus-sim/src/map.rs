//! The true world layout and its random generator.

use std::fmt;

use serde::{Deserialize, Serialize};
use wumpus_core::{Coord, DeterministicRng, GridSize};

/// Cells kept free of hazards so the first moves are survivable.
pub const START_AREA: [Coord; 3] = [Coord::new(0, 0), Coord::new(1, 0), Coord::new(0, 1)];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Cell {
    wumpus: bool,
    pit: bool,
    gold: bool,
}

impl Cell {
    fn is_empty(self) -> bool {
        !self.wumpus && !self.pit && !self.gold
    }
}

/// Hidden contents of every cell, indexed like [`GridSize::index`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldMap {
    size: GridSize,
    cells: Vec<Cell>,
}

impl WorldMap {
    pub fn empty(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![Cell::default(); size.len()],
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    fn cell(&self, c: Coord) -> Option<&Cell> {
        self.size.index(c).map(|i| &self.cells[i])
    }

    fn cell_mut(&mut self, c: Coord) -> Option<&mut Cell> {
        self.size.index(c).map(|i| &mut self.cells[i])
    }

    pub fn has_wumpus(&self, c: Coord) -> bool {
        self.cell(c).is_some_and(|cell| cell.wumpus)
    }

    pub fn has_pit(&self, c: Coord) -> bool {
        self.cell(c).is_some_and(|cell| cell.pit)
    }

    pub fn has_gold(&self, c: Coord) -> bool {
        self.cell(c).is_some_and(|cell| cell.gold)
    }

    /// Returns `false` for out-of-bounds cells.
    pub fn set_wumpus(&mut self, c: Coord, present: bool) -> bool {
        self.cell_mut(c).map(|cell| cell.wumpus = present).is_some()
    }

    pub fn set_pit(&mut self, c: Coord, present: bool) -> bool {
        self.cell_mut(c).map(|cell| cell.pit = present).is_some()
    }

    pub fn set_gold(&mut self, c: Coord, present: bool) -> bool {
        self.cell_mut(c).map(|cell| cell.gold = present).is_some()
    }

    /// Live wumpuses in grid-scan order.
    pub fn wumpuses(&self) -> Vec<Coord> {
        self.size.cells().filter(|c| self.has_wumpus(*c)).collect()
    }

    pub fn pits(&self) -> Vec<Coord> {
        self.size.cells().filter(|c| self.has_pit(*c)).collect()
    }

    pub fn gold(&self) -> Option<Coord> {
        self.size.cells().find(|c| self.has_gold(*c))
    }

    pub fn wumpus_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.wumpus).count()
    }

    /// A hazard in `c` kills whoever stands there.
    pub fn is_deadly(&self, c: Coord) -> bool {
        self.has_wumpus(c) || self.has_pit(c)
    }
}

/// Text picture with north at the top: `W` wumpus, `P` pit, `G` gold, `.` empty.
impl fmt::Display for WorldMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.size.height as i32).rev() {
            for x in 0..self.size.width as i32 {
                let c = Coord::new(x, y);
                let glyph = match self.cell(c) {
                    Some(cell) if cell.wumpus => 'W',
                    Some(cell) if cell.pit => 'P',
                    Some(cell) if cell.gold => 'G',
                    _ => '.',
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Random layouts: `wumpus_count` wumpuses, pits with independent probability, one gold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapGenerator {
    pub size: GridSize,
    pub wumpus_count: u32,
    pub pit_probability: f64,
}

impl MapGenerator {
    pub fn new(size: GridSize, wumpus_count: u32, pit_probability: f64) -> Self {
        Self {
            size,
            wumpus_count,
            pit_probability,
        }
    }

    /// The start area never holds a hazard. Gold may land anywhere hazard-free, the entrance
    /// included, and falls back to the entrance on a saturated grid.
    pub fn generate(&self, rng: &mut impl DeterministicRng) -> WorldMap {
        let mut map = WorldMap::empty(self.size);
        let mut free: Vec<Coord> = self
            .size
            .cells()
            .filter(|c| !START_AREA.contains(c))
            .collect();

        // Partial Fisher-Yates: the first `k` slots become the wumpus sample.
        let k = (self.wumpus_count as usize).min(free.len());
        for i in 0..k {
            let j = i + rng.next_below(free.len() - i);
            free.swap(i, j);
            map.set_wumpus(free[i], true);
        }
        free.drain(..k);
        free.sort();

        for c in free {
            if rng.next_f64_unit() < self.pit_probability {
                map.set_pit(c, true);
            }
        }

        let candidates: Vec<Coord> = self
            .size
            .cells()
            .filter(|c| map.cell(*c).is_some_and(|cell| cell.is_empty()))
            .collect();
        let gold = if candidates.is_empty() {
            Coord::ORIGIN
        } else {
            candidates[rng.next_below(candidates.len())]
        };
        map.set_gold(gold, true);

        tracing::debug!(
            size = self.size.width,
            wumpuses = k,
            pits = map.pits().len(),
            %gold,
            "generated map"
        );
        map
    }
}
