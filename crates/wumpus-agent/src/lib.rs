//! Decision making for the wumpus agent.
//!
//! [`Agent`] runs one perceive, infer, plan, act cycle per tick. [`StrategicPlanner`] turns a
//! [`Goal`] into a [`Plan`](wumpus_core::Plan), arbitrating by utility when nothing is provably
//! safe.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod config;
pub mod goal;
pub mod strategy;

pub use agent::Agent;
pub use config::{AgentConfig, ConfigError, UtilityWeights};
pub use goal::Goal;
pub use strategy::{OptionKind, PlanContext, StrategicPlanner, UnstuckOption};
