use std::collections::VecDeque;

use wumpus_core::{Action, Coord, Direction, Percept, Percepts};

use crate::rules::{Deduction, GlobalCardinality, Rule};
use crate::{Fact, FactStore};

/// Everything the engine learns from one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleInput {
    pub position: Coord,
    pub percepts: Percepts,
    pub last_action: Option<Action>,
    /// Heading the last arrow was fired in, if the agent fired one last tick.
    pub last_shot: Option<Direction>,
    pub relocation: bool,
}

/// Summary of one inference cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Facts that were new to the store.
    pub added: usize,
    /// Agenda entries processed across all sweeps.
    pub processed: usize,
    /// Times the global rule was evaluated.
    pub global_passes: usize,
    /// Cell marked dead by a scream this cycle.
    pub killed: Option<Coord>,
}

/// FIFO worklist; a cell sits in the queue at most once.
#[derive(Debug)]
struct Agenda {
    queue: VecDeque<Coord>,
    queued: Vec<bool>,
}

impl Agenda {
    fn new(store: &FactStore) -> Self {
        Self {
            queue: VecDeque::new(),
            queued: vec![false; store.size().len()],
        }
    }

    fn push(&mut self, store: &FactStore, c: Coord) {
        let Some(idx) = store.size().index(c) else {
            return;
        };
        if !self.queued[idx] {
            self.queued[idx] = true;
            self.queue.push_back(c);
        }
    }

    fn push_with_neighbors(&mut self, store: &FactStore, c: Coord) {
        self.push(store, c);
        for n in store.neighbors(c) {
            self.push(store, n);
        }
    }

    fn pop(&mut self, store: &FactStore) -> Option<Coord> {
        let c = self.queue.pop_front()?;
        if let Some(idx) = store.size().index(c) {
            self.queued[idx] = false;
        }
        Some(c)
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Agenda-driven forward chaining over a [`FactStore`].
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    local_rules: Vec<Rule>,
    relational_rules: Vec<Rule>,
    global_rule: GlobalCardinality,
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self {
            local_rules: Rule::LOCAL.to_vec(),
            relational_rules: Rule::RELATIONAL.to_vec(),
            global_rule: GlobalCardinality,
        }
    }
}

impl InferenceEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one tick of evidence into `store` and run the rules to a fixpoint.
    pub fn run_cycle(&self, store: &mut FactStore, input: &CycleInput) -> CycleReport {
        let mut report = CycleReport::default();
        let mut agenda = Agenda::new(store);
        let pos = input.position;

        agenda.push(store, pos);
        // The agent is standing here alive.
        for fact in [Fact::NoWumpus, Fact::NoPit] {
            add(store, &mut agenda, &mut report, pos, fact, false);
        }

        if input.percepts.contains(Percept::Scream) {
            report.killed = self.handle_scream(store, &mut agenda, &mut report, pos, input.last_shot);
        } else if input.last_action == Some(Action::Shoot) {
            if let Some(dir) = input.last_shot {
                // A miss clears the whole ray, but only until wumpuses may move again.
                for cell in store.size().ray(pos, dir) {
                    add(store, &mut agenda, &mut report, cell, Fact::NoWumpus, true);
                }
            }
        }

        self.apply_percept_rules(store, &mut agenda, &mut report, pos, input.percepts);

        loop {
            while let Some(cell) = agenda.pop(store) {
                report.processed += 1;
                for rule in self.local_rules.iter().chain(self.relational_rules.iter()) {
                    let deductions = rule.apply(store, cell);
                    add_all(store, &mut agenda, &mut report, deductions);
                }
            }

            if !input.relocation {
                report.global_passes += 1;
                let deductions = self.global_rule.apply(store);
                add_all(store, &mut agenda, &mut report, deductions);
            }

            if agenda.is_empty() {
                break;
            }
        }

        tracing::trace!(
            x = pos.x,
            y = pos.y,
            added = report.added,
            processed = report.processed,
            "inference cycle reached fixpoint"
        );
        report
    }

    fn apply_percept_rules(
        &self,
        store: &mut FactStore,
        agenda: &mut Agenda,
        report: &mut CycleReport,
        pos: Coord,
        percepts: Percepts,
    ) {
        let neighbors: Vec<Coord> = store.neighbors(pos).collect();

        let sensed = [
            (Percept::Stench, Fact::Stench, Fact::NoWumpus, Fact::MaybeWumpus),
            (Percept::Breeze, Fact::Breeze, Fact::NoPit, Fact::MaybePit),
        ];
        for (percept, marker, absence, maybe) in sensed {
            if !percepts.contains(percept) {
                for n in &neighbors {
                    add(store, agenda, report, *n, absence, true);
                }
                continue;
            }
            add(store, agenda, report, pos, marker, true);
            if percept == Percept::Stench && store.stench_is_stale(pos) {
                store.refresh_stench(pos);
                agenda.push_with_neighbors(store, pos);
            }
            for n in &neighbors {
                if !store.has(*n, absence) {
                    add(store, agenda, report, *n, maybe, true);
                }
            }
        }

        if percepts.contains(Percept::Glitter) {
            add(store, agenda, report, pos, Fact::Gold, true);
            store.set_gold_at(pos);
        }
    }

    fn handle_scream(
        &self,
        store: &mut FactStore,
        agenda: &mut Agenda,
        report: &mut CycleReport,
        shooter: Coord,
        shot: Option<Direction>,
    ) -> Option<Coord> {
        store.record_kill();
        let Some(dir) = shot else {
            tracing::debug!("scream heard without a known firing direction");
            return None;
        };

        let Some(dead) = locate_kill(store, shooter, dir) else {
            tracing::debug!(
                x = shooter.x,
                y = shooter.y,
                ?dir,
                "scream heard but no cell on the ray can hold the wumpus"
            );
            return None;
        };

        store.remove_fact(dead, Fact::Wumpus);
        store.remove_fact(dead, Fact::MaybeWumpus);
        for fact in [Fact::DeadWumpus, Fact::Safe, Fact::NoWumpus, Fact::NoPit] {
            if store.add_fact(dead, fact, false) {
                report.added += 1;
            }
        }
        agenda.push_with_neighbors(store, dead);
        tracing::debug!(x = dead.x, y = dead.y, live = store.live_wumpuses(), "wumpus marked dead");

        explain_stenches_by_dead(store, agenda, dead);
        Some(dead)
    }
}

/// Pick the cell the arrow most plausibly killed.
///
/// The arrow stops at the first wumpus it meets, so the ray is scanned in order: the first cell
/// holding a live wumpus or a suspicion that is not already safe wins, else the first cell not
/// proven wumpus-free.
fn locate_kill(store: &FactStore, shooter: Coord, dir: Direction) -> Option<Coord> {
    let ray: Vec<Coord> = store
        .size()
        .ray(shooter, dir)
        .filter(|c| !store.has(*c, Fact::DeadWumpus))
        .collect();

    let flagged = ray.iter().find(|c| {
        let facts = store.facts(**c);
        facts.has_live_wumpus()
            || (facts.contains(Fact::MaybeWumpus)
                && !facts.contains(Fact::Safe)
                && !facts.contains(Fact::NoWumpus))
    });
    let unknown = || ray.iter().find(|c| !store.has(**c, Fact::NoWumpus));

    flagged.or_else(unknown).copied()
}

/// Drop stench markers next to `dead` that no other neighbour can still explain.
fn explain_stenches_by_dead(store: &mut FactStore, agenda: &mut Agenda, dead: Coord) {
    let stenched: Vec<Coord> = store
        .neighbors(dead)
        .filter(|n| store.has(*n, Fact::Stench))
        .collect();

    for cell in stenched {
        let other_source = store.neighbors(cell).filter(|gn| *gn != dead).any(|gn| {
            let facts = store.facts(gn);
            !facts.contains(Fact::NoWumpus) && !facts.contains(Fact::DeadWumpus)
        });
        if !other_source {
            store.remove_fact(cell, Fact::Stench);
            agenda.push(store, cell);
        }
    }
}

fn add(
    store: &mut FactStore,
    agenda: &mut Agenda,
    report: &mut CycleReport,
    c: Coord,
    fact: Fact,
    volatile: bool,
) {
    if !store.in_bounds(c) || store.has(c, fact) {
        return;
    }
    store.add_fact(c, fact, volatile);
    report.added += 1;
    agenda.push_with_neighbors(store, c);
}

fn add_all(
    store: &mut FactStore,
    agenda: &mut Agenda,
    report: &mut CycleReport,
    deductions: Vec<Deduction>,
) {
    for (c, fact) in deductions {
        add(store, agenda, report, c, fact, false);
    }
}

/// Start a new relocation epoch.
///
/// Volatile facts are always cleared. With relocation enabled, confirmed wumpuses fall back to
/// suspicions and wumpus-freedom is revoked everywhere except on dead-wumpus cells.
pub fn on_epoch_boundary(store: &mut FactStore, relocation: bool) {
    let cells: Vec<Coord> = store.size().cells().collect();
    for c in cells {
        store.drop_volatile(c);
        if !relocation {
            continue;
        }

        let permanent = store.permanent_facts(c);
        if permanent.contains(Fact::DeadWumpus) {
            continue;
        }
        if permanent.contains(Fact::Wumpus) {
            store.remove_fact(c, Fact::Wumpus);
            store.add_fact(c, Fact::MaybeWumpus, true);
        }
        store.remove_fact(c, Fact::NoWumpus);
        store.remove_fact(c, Fact::Safe);
    }
    tracing::debug!(relocation, "epoch boundary: volatile knowledge dropped");
}
