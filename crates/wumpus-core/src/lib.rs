//! Shared vocabulary for the wumpus agent: grid geometry, actions, percepts, plans and the
//! world-facing interface.
//!
//! Everything here is deterministic and engine-agnostic. Reasoning lives in `wumpus-kb`,
//! search in `wumpus-nav`, and decision making in `wumpus-agent`.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod geometry;
pub mod percept;
pub mod plan;
pub mod rng;
pub mod world;

pub use action::{Action, ParseActionError};
pub use geometry::{Coord, Direction, GridSize};
pub use percept::{Percept, Percepts};
pub use plan::{simulate_actions, turns_to_face, Plan};
pub use rng::{derive_seed, DeterministicRng, SplitMix64};
pub use world::{EnvState, Environment, GameStatus};
