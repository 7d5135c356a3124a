use wumpus_core::{Action, Coord, Direction, GridSize, Percepts};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::engine::{on_epoch_boundary, CycleInput, CycleReport, InferenceEngine};
use crate::{CellStatus, Fact, FactStore, StatusGrid};

/// Items the agent has confirmed on a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KnownCell {
    pub coord: Coord,
    pub wumpus: bool,
    pub pit: bool,
    pub gold: bool,
}

/// A cell holding two mutually exclusive facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contradiction {
    pub coord: Coord,
    pub fact: Fact,
    pub negation: Fact,
}

/// The agent's belief state: fact store, inference engine and the last classification.
#[derive(Debug, Clone)]
pub struct Knowledge {
    store: FactStore,
    engine: InferenceEngine,
    status: StatusGrid,
}

impl Knowledge {
    pub fn new(size: GridSize, wumpus_count: u32) -> Self {
        let store = FactStore::new(size, wumpus_count);
        let status = StatusGrid::from_store(&store);
        Self {
            store,
            engine: InferenceEngine::new(),
            status,
        }
    }

    /// Record a visit at `pos`, fold in this tick's evidence and reclassify.
    pub fn update(
        &mut self,
        pos: Coord,
        percepts: Percepts,
        last_action: Option<Action>,
        last_shot: Option<Direction>,
        relocation: bool,
    ) -> CycleReport {
        if self.store.mark_visited(pos) {
            tracing::trace!(x = pos.x, y = pos.y, "first visit");
        }
        let input = CycleInput {
            position: pos,
            percepts,
            last_action,
            last_shot,
            relocation,
        };
        let report = self.engine.run_cycle(&mut self.store, &input);
        self.reclassify();
        report
    }

    pub fn on_epoch_boundary(&mut self, relocation: bool) {
        on_epoch_boundary(&mut self.store, relocation);
        self.reclassify();
    }

    fn reclassify(&mut self) {
        self.status = StatusGrid::from_store(&self.store);
    }

    pub fn status(&self) -> &StatusGrid {
        &self.status
    }

    pub fn cell_status(&self, c: Coord) -> Option<CellStatus> {
        self.status.get(c)
    }

    pub fn store(&self) -> &FactStore {
        &self.store
    }

    /// Direct store access, for seeding facts outside the percept pipeline.
    pub fn store_mut(&mut self) -> &mut FactStore {
        &mut self.store
    }

    pub fn size(&self) -> GridSize {
        self.store.size()
    }

    pub fn live_wumpuses(&self) -> u32 {
        self.store.live_wumpuses()
    }

    /// Cells with at least one confirmed item, in grid-scan order.
    pub fn known_map(&self) -> Vec<KnownCell> {
        self.store
            .size()
            .cells()
            .filter_map(|coord| {
                let facts = self.store.facts(coord);
                let cell = KnownCell {
                    coord,
                    wumpus: facts.has_live_wumpus(),
                    pit: facts.contains(Fact::Pit),
                    gold: facts.contains(Fact::Gold) || self.store.gold_at() == Some(coord),
                };
                (cell.wumpus || cell.pit || cell.gold).then_some(cell)
            })
            .collect()
    }

    /// Cells that may hold a live wumpus: confirmed or suspected, and not proven free.
    pub fn possible_wumpuses(&self) -> Vec<Coord> {
        self.store
            .size()
            .cells()
            .filter(|c| {
                let facts = self.store.facts(*c);
                if facts.contains(Fact::DeadWumpus) {
                    return false;
                }
                facts.contains(Fact::Wumpus)
                    || (facts.contains(Fact::MaybeWumpus) && !facts.contains(Fact::NoWumpus))
            })
            .collect()
    }

    /// Cells that assert a hazard and its absence at once. Empty for a sound store.
    pub fn contradictions(&self) -> Vec<Contradiction> {
        let pairs = [(Fact::Wumpus, Fact::NoWumpus), (Fact::Pit, Fact::NoPit)];
        let mut out = Vec::new();
        for coord in self.store.size().cells() {
            let facts = self.store.facts(coord);
            for (fact, negation) in pairs {
                if facts.contains(fact) && facts.contains(negation) {
                    out.push(Contradiction {
                        coord,
                        fact,
                        negation,
                    });
                }
            }
        }
        out
    }
}
