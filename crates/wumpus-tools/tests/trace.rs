use std::cell::RefCell;
use std::rc::Rc;

use wumpus_core::{Action, Coord, Direction};
use wumpus_tools::{TraceEvent, TraceKind, TraceSink, Tracer};

#[derive(Clone, Default)]
struct RcSink(Rc<RefCell<Vec<TraceEvent>>>);

impl TraceSink for RcSink {
    fn emit(&mut self, event: TraceEvent) {
        self.0.borrow_mut().push(event);
    }
}

fn decision(tick: u64, action: Action) -> TraceEvent {
    TraceEvent::new(tick, TraceKind::Decision, Coord::ORIGIN, Direction::East).with_action(action)
}

#[test]
fn recording_tracer_keeps_events_in_order() {
    let mut tracer = Tracer::recording();
    tracer.emit(decision(1, Action::MoveForward).with_note("explore"));
    tracer.emit(TraceEvent::new(2, TraceKind::EpochBoundary, Coord::new(1, 0), Direction::East));
    tracer.emit(decision(2, Action::TurnLeft));

    let log = tracer.log().unwrap();
    assert_eq!(log.len(), 3);
    assert_eq!(log.events[0].note, "explore");
    assert_eq!(log.actions(), vec![Action::MoveForward, Action::TurnLeft]);
    assert_eq!(log.of_kind(TraceKind::EpochBoundary).count(), 1);
}

#[test]
fn sink_receives_events_alongside_log() {
    let handle = RcSink::default();
    let shared = handle.0.clone();
    let mut tracer = Tracer::recording().with_sink(Box::new(handle));

    tracer.emit(decision(5, Action::Grab));

    assert_eq!(shared.borrow().len(), 1);
    assert_eq!(shared.borrow()[0].tick, 5);
    assert_eq!(tracer.log().map(|l| l.len()), Some(1));
}

#[test]
fn disabled_tracer_records_nothing() {
    let mut tracer = Tracer::disabled();
    assert!(!tracer.is_enabled());
    tracer.emit(decision(1, Action::Shoot));
    assert!(tracer.log().is_none());
    assert!(tracer.take_log().is_none());
}

#[test]
fn take_log_leaves_an_empty_log() {
    let mut tracer = Tracer::recording();
    tracer.emit(decision(1, Action::ClimbOut));
    let taken = tracer.take_log().unwrap();
    assert_eq!(taken.len(), 1);
    assert!(tracer.log().unwrap().is_empty());
}

#[test]
fn kind_names_are_stable() {
    assert_eq!(TraceKind::PlanDiscarded.as_str(), "plan_discarded");
    assert_eq!(TraceKind::Kill.as_str(), "kill");
}
