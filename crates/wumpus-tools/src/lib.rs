//! Decision tracing for the wumpus agent.
//!
//! Events are plain data so they can be recorded during an episode and rendered or exported
//! afterwards. Log output for humans goes through `tracing`; this crate is for replayable records.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{TraceEvent, TraceKind, TraceLog, TraceSink, Tracer};
