//! Deduction rules.
//!
//! Rules are pure: they read the store and return the facts they would add. The engine decides
//! which tier a deduction lands in and which cells to revisit.

use wumpus_core::Coord;

use crate::{Fact, FactStore};

/// A fact the engine should add, at a specific cell.
pub type Deduction = (Coord, Fact);

/// Cell-local and neighbourhood rules, applied to one agenda entry at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// No wumpus and no pit means safe.
    SafetyFromNoThreats,
    /// At most one hazard per cell.
    Contradiction,
    WumpusResolution,
    PitResolution,
}

impl Rule {
    pub const LOCAL: [Rule; 2] = [Rule::SafetyFromNoThreats, Rule::Contradiction];
    pub const RELATIONAL: [Rule; 2] = [Rule::WumpusResolution, Rule::PitResolution];

    pub fn apply(self, store: &FactStore, pos: Coord) -> Vec<Deduction> {
        match self {
            Rule::SafetyFromNoThreats => safety_from_no_threats(store, pos),
            Rule::Contradiction => contradiction(store, pos),
            Rule::WumpusResolution => resolution(store, pos, HazardKind::WUMPUS),
            Rule::PitResolution => resolution(store, pos, HazardKind::PIT),
        }
    }
}

fn safety_from_no_threats(store: &FactStore, pos: Coord) -> Vec<Deduction> {
    let facts = store.facts(pos);
    if facts.contains(Fact::NoWumpus) && facts.contains(Fact::NoPit) && !facts.contains(Fact::Safe)
    {
        return vec![(pos, Fact::Safe)];
    }
    Vec::new()
}

fn contradiction(store: &FactStore, pos: Coord) -> Vec<Deduction> {
    let facts = store.facts(pos);
    let mut out = Vec::new();
    if facts.contains(Fact::Wumpus) && !facts.contains(Fact::NoPit) {
        out.push((pos, Fact::NoPit));
    }
    if facts.contains(Fact::Pit) && !facts.contains(Fact::NoWumpus) {
        out.push((pos, Fact::NoWumpus));
    }
    out
}

/// The three facts that describe one hazard type.
#[derive(Debug, Clone, Copy)]
struct HazardKind {
    hazard: Fact,
    absence: Fact,
    percept: Fact,
}

impl HazardKind {
    const WUMPUS: HazardKind = HazardKind {
        hazard: Fact::Wumpus,
        absence: Fact::NoWumpus,
        percept: Fact::Stench,
    };

    const PIT: HazardKind = HazardKind {
        hazard: Fact::Pit,
        absence: Fact::NoPit,
        percept: Fact::Breeze,
    };
}

/// Neighbours of `sensed` that could still explain its percept.
fn candidate_sources(store: &FactStore, sensed: Coord, kind: HazardKind) -> Vec<Coord> {
    store
        .neighbors(sensed)
        .filter(|n| {
            let facts = store.facts(*n);
            !facts.contains(kind.absence) && !facts.contains(Fact::DeadWumpus)
        })
        .collect()
}

/// If `sensed` is a visited cell with the percept and exactly one candidate remains, that
/// candidate holds the hazard.
///
/// A stench sensed before the latest scream is skipped: the wumpus that died may be the one
/// that caused it, and it no longer counts as a candidate.
fn resolve_sensed(store: &FactStore, sensed: Coord, kind: HazardKind, out: &mut Vec<Deduction>) {
    if !store.is_visited(sensed) || !store.has(sensed, kind.percept) {
        return;
    }
    if kind.percept == Fact::Stench && store.stench_is_stale(sensed) {
        return;
    }
    let candidates = candidate_sources(store, sensed, kind);
    if let [only] = candidates.as_slice() {
        if !store.has(*only, kind.hazard) && !out.contains(&(*only, kind.hazard)) {
            out.push((*only, kind.hazard));
        }
    }
}

/// Runs in both directions: a percept at `pos` may pin down a neighbour, and a newly proven
/// absence at `pos` may pin down the source of a neighbour's percept.
fn resolution(store: &FactStore, pos: Coord, kind: HazardKind) -> Vec<Deduction> {
    let mut out = Vec::new();
    resolve_sensed(store, pos, kind, &mut out);

    if store.has(pos, kind.absence) {
        for neighbor in store.neighbors(pos) {
            resolve_sensed(store, neighbor, kind, &mut out);
        }
    }
    out
}

/// Grid-global wumpus count rule.
///
/// Once every living wumpus is pinned to a cell, no other cell can hold one. Only sound while
/// wumpuses stay put; the engine never invokes it in relocation mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalCardinality;

impl GlobalCardinality {
    pub fn apply(&self, store: &FactStore) -> Vec<Deduction> {
        let live: Vec<Coord> = store.live_wumpus_cells().collect();
        if live.len() != store.live_wumpuses() as usize {
            return Vec::new();
        }
        store
            .size()
            .cells()
            .filter(|c| !live.contains(c) && !store.has(*c, Fact::NoWumpus))
            .map(|c| (c, Fact::NoWumpus))
            .collect()
    }
}
