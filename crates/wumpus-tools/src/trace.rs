#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use wumpus_core::{Action, Coord, Direction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TraceKind {
    /// One action chosen for one tick.
    Decision,
    /// A pending plan was dropped after new knowledge invalidated it.
    PlanDiscarded,
    EpochBoundary,
    /// A scream was attributed to a cell.
    Kill,
}

impl TraceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TraceKind::Decision => "decision",
            TraceKind::PlanDiscarded => "plan_discarded",
            TraceKind::EpochBoundary => "epoch_boundary",
            TraceKind::Kill => "kill",
        }
    }
}

/// One record of what the agent did or concluded on a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub kind: TraceKind,
    pub position: Coord,
    pub facing: Direction,
    pub action: Option<Action>,
    /// Short free-form reason, e.g. the goal tier that produced the action.
    pub note: Cow<'static, str>,
}

impl TraceEvent {
    pub fn new(tick: u64, kind: TraceKind, position: Coord, facing: Direction) -> Self {
        Self {
            tick,
            kind,
            position,
            facing,
            action: None,
            note: Cow::Borrowed(""),
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_note(mut self, note: impl Into<Cow<'static, str>>) -> Self {
        self.note = note.into();
        self
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn of_kind(&self, kind: TraceKind) -> impl Iterator<Item = &TraceEvent> + '_ {
        self.events.iter().filter(move |e| e.kind == kind)
    }

    /// Actions in decision order.
    pub fn actions(&self) -> Vec<Action> {
        self.of_kind(TraceKind::Decision)
            .filter_map(|e| e.action)
            .collect()
    }
}

/// Fan-out point owned by the agent: an optional in-memory log and an optional streaming sink.
#[derive(Default)]
pub struct Tracer {
    log: Option<TraceLog>,
    sink: Option<Box<dyn TraceSink>>,
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer")
            .field("log", &self.log.as_ref().map(TraceLog::len))
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

impl Tracer {
    /// Records nothing.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn recording() -> Self {
        Self {
            log: Some(TraceLog::default()),
            sink: None,
        }
    }

    pub fn with_sink(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.log.is_some() || self.sink.is_some()
    }

    pub fn emit(&mut self, event: TraceEvent) {
        if let Some(log) = self.log.as_mut() {
            log.push(event.clone());
        }
        if let Some(sink) = self.sink.as_mut() {
            sink.emit(event);
        }
    }

    pub fn log(&self) -> Option<&TraceLog> {
        self.log.as_ref()
    }

    /// Hand over the recorded log, leaving an empty one in place.
    pub fn take_log(&mut self) -> Option<TraceLog> {
        self.log.as_mut().map(core::mem::take)
    }
}
