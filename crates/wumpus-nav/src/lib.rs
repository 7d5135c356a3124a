//! Risk-weighted path search for the wumpus agent.
//!
//! The search state is a pose (cell and heading); the edges are the three kinematic actions.
//! Entering a cell costs the move plus a surcharge driven by its [`CellStatus`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod cost;
pub mod planner;

pub use cost::{EpochBudget, PathCosts, RiskMap};
pub use planner::{PathPlanner, PathQuery};

pub use wumpus_kb::CellStatus;
