//! A simulated wumpus world for running the agent end to end.
//!
//! The world owns the true map and scoring. It talks to the agent only through
//! [`Environment`](wumpus_core::Environment), so the reasoning crates never see hidden state.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod map;
pub mod runner;
pub mod scenario;
pub mod world;

pub use config::{ConfigError, Scoring, SimConfig};
pub use map::{MapGenerator, WorldMap};
pub use runner::{run_episode, run_episode_with, EpisodeReport, StepRecord};
pub use scenario::{Scenario, ScenarioError};
pub use world::{Relocation, WumpusWorld};
