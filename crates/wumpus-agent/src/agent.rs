use wumpus_core::{Action, Coord, Direction, EnvState, GridSize, Percept, Percepts, Plan};
use wumpus_kb::{CellStatus, KnownCell, Knowledge, StatusGrid};
use wumpus_tools::{TraceEvent, TraceKind, Tracer};

use crate::{AgentConfig, Goal, PlanContext, StrategicPlanner};

/// Why a pending plan can no longer be followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StalePlan {
    NoArrow,
    ClimbAwayFromExit,
    BlockedStep(Coord),
}

impl StalePlan {
    fn as_str(self) -> &'static str {
        match self {
            StalePlan::NoArrow => "shoot without arrow",
            StalePlan::ClimbAwayFromExit => "climb away from exit",
            StalePlan::BlockedStep(_) => "next step blocked",
        }
    }
}

/// The wumpus agent: one [`decide_action`](Agent::decide_action) per tick.
#[derive(Debug)]
pub struct Agent {
    config: AgentConfig,
    knowledge: Knowledge,
    planner: StrategicPlanner,
    plan: Plan,
    goal: Goal,
    state: EnvState,
    last_action: Option<Action>,
    /// Heading of an arrow fired on the previous tick.
    last_shot: Option<Direction>,
    epoch_actions: u32,
    tick: u64,
    tracer: Tracer,
}

impl Agent {
    pub fn new(size: GridSize, config: AgentConfig) -> Self {
        let knowledge = Knowledge::new(size, config.wumpus_count);
        let planner = StrategicPlanner::new(&config);
        Self {
            config,
            knowledge,
            planner,
            plan: Plan::default(),
            goal: Goal::default(),
            state: EnvState::default(),
            last_action: None,
            last_shot: None,
            epoch_actions: 0,
            tick: 0,
            tracer: Tracer::disabled(),
        }
    }

    pub fn with_tracer(mut self, tracer: Tracer) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn knowledge(&self) -> &Knowledge {
        &self.knowledge
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn state(&self) -> &EnvState {
        &self.state
    }

    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    pub fn tracer_mut(&mut self) -> &mut Tracer {
        &mut self.tracer
    }

    pub fn known_map(&self) -> Vec<KnownCell> {
        self.knowledge.known_map()
    }

    pub fn kb_status(&self) -> &StatusGrid {
        self.knowledge.status()
    }

    /// Sync with the world's report after an action.
    pub fn update_state(&mut self, state: EnvState) {
        self.state = state;
    }

    /// Perceive, infer, plan and pick exactly one action.
    pub fn decide_action(&mut self, percepts: Percepts) -> Action {
        self.tick += 1;
        let relocation = self.config.relocation;

        if relocation && self.epoch_actions >= self.config.relocation_interval {
            self.epoch_actions = 0;
            self.knowledge.on_epoch_boundary(true);
            self.trace(TraceKind::EpochBoundary, None, "");
        }

        let report = self.knowledge.update(
            self.state.position,
            percepts,
            self.last_action,
            self.last_shot.take(),
            relocation,
        );
        if let Some(dead) = report.killed {
            self.trace(TraceKind::Kill, None, format!("{dead}"));
        }

        if let Some(reason) = self.stale_plan() {
            tracing::debug!(
                tick = self.tick,
                reason = reason.as_str(),
                remaining = self.plan.len(),
                "discarding plan"
            );
            self.plan.clear();
            self.trace(TraceKind::PlanDiscarded, None, reason.as_str());
        }

        let (action, note) = self.choose(percepts);
        self.commit(action, note)
    }

    fn choose(&mut self, percepts: Percepts) -> (Action, &'static str) {
        if percepts.contains(Percept::Glitter) && !self.state.has_gold {
            self.plan.clear();
            return (Action::Grab, "reflex");
        }

        if self.state.has_gold && self.plan.is_empty() {
            self.goal = Goal::ReturnHome;
            let home = self.planner.create_plan(&self.context(), Goal::ReturnHome);
            match home {
                Some(plan) => self.plan = plan,
                None => return (self.fallback(), "fallback"),
            }
        }

        if let Some(action) = self.plan.pop() {
            return (action, self.goal.as_str());
        }

        let ctx = self.context();
        let chosen = Goal::TIERS
            .into_iter()
            .find_map(|goal| self.planner.create_plan(&ctx, goal).map(|plan| (goal, plan)));

        match chosen {
            Some((goal, plan)) => {
                tracing::debug!(tick = self.tick, %goal, steps = plan.len(), "new plan");
                self.goal = goal;
                self.plan = plan;
                match self.plan.pop() {
                    Some(action) => (action, goal.as_str()),
                    None => (self.fallback(), "fallback"),
                }
            }
            None => (self.fallback(), "fallback"),
        }
    }

    fn fallback(&self) -> Action {
        if self.state.position == Coord::ORIGIN {
            Action::ClimbOut
        } else {
            Action::TurnRight
        }
    }

    fn commit(&mut self, action: Action, note: &'static str) -> Action {
        if action == Action::Shoot && self.state.has_arrow {
            self.last_shot = Some(self.state.direction);
        }
        self.last_action = Some(action);
        self.epoch_actions += 1;
        self.trace(TraceKind::Decision, Some(action), note);
        tracing::trace!(tick = self.tick, %action, goal = %self.goal, "action");
        action
    }

    fn context(&self) -> PlanContext<'_> {
        PlanContext {
            knowledge: &self.knowledge,
            position: self.state.position,
            facing: self.state.direction,
            has_arrow: self.state.has_arrow,
            relocation: self.config.relocation,
            actions_left: self.config.actions_left(self.epoch_actions),
        }
    }

    /// Walk the pending plan up to its first forward move.
    fn stale_plan(&self) -> Option<StalePlan> {
        let first = self.plan.peek()?;
        if first == Action::Shoot && !self.state.has_arrow {
            return Some(StalePlan::NoArrow);
        }

        let mut facing = self.state.direction;
        for action in self.plan.iter() {
            match action {
                Action::TurnLeft => facing = facing.turn_left(),
                Action::TurnRight => facing = facing.turn_right(),
                Action::Shoot if !self.state.has_arrow => return Some(StalePlan::NoArrow),
                Action::ClimbOut if self.state.position != Coord::ORIGIN => {
                    return Some(StalePlan::ClimbAwayFromExit)
                }
                Action::MoveForward => {
                    let dest = self.state.position.step(facing);
                    return match self.knowledge.cell_status(dest) {
                        None | Some(CellStatus::Dangerous) => Some(StalePlan::BlockedStep(dest)),
                        Some(_) => None,
                    };
                }
                _ => {}
            }
        }
        None
    }

    fn trace(
        &mut self,
        kind: TraceKind,
        action: Option<Action>,
        note: impl Into<std::borrow::Cow<'static, str>>,
    ) {
        if !self.tracer.is_enabled() {
            return;
        }
        let mut event = TraceEvent::new(self.tick, kind, self.state.position, self.state.direction)
            .with_note(note);
        event.action = action;
        self.tracer.emit(event);
    }
}
