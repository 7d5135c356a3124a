//! Belief state for the wumpus agent.
//!
//! A [`FactStore`] holds per-cell facts in two tiers: permanent facts survive epoch boundaries,
//! volatile facts (absence of a percept, a missed arrow) are dropped when wumpuses may have moved.
//! The [`InferenceEngine`] folds each tick's percepts into the store and forward-chains a small
//! closed [`Rule`] set to a fixpoint. [`Knowledge`] wraps both and keeps a [`StatusGrid`] for the
//! planners.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod engine;
pub mod fact;
pub mod knowledge;
pub mod rules;
pub mod status;
pub mod store;

pub use engine::{on_epoch_boundary, CycleInput, CycleReport, InferenceEngine};
pub use fact::{Fact, FactSet};
pub use knowledge::{Contradiction, KnownCell, Knowledge};
pub use rules::{Deduction, GlobalCardinality, Rule};
pub use status::{CellStatus, StatusGrid};
pub use store::{CellFacts, FactStore};
