use wumpus_core::{simulate_actions, turns_to_face, Action, Coord, Direction, Plan};
use wumpus_kb::{CellStatus, Fact, Knowledge};
use wumpus_nav::{EpochBudget, PathPlanner, PathQuery};

use crate::{AgentConfig, Goal, UtilityWeights};

/// Read-only snapshot the planner works from.
#[derive(Debug, Clone, Copy)]
pub struct PlanContext<'a> {
    pub knowledge: &'a Knowledge,
    pub position: Coord,
    pub facing: Direction,
    pub has_arrow: bool,
    pub relocation: bool,
    /// Actions left before wumpuses move. Ignored unless `relocation` is set.
    pub actions_left: u32,
}

impl PlanContext<'_> {
    fn budget(&self) -> Option<EpochBudget> {
        self.relocation.then(|| EpochBudget::new(self.actions_left))
    }

    fn query(&self, goal: Coord) -> PathQuery {
        PathQuery::new(self.position, self.facing, goal).with_budget(self.budget())
    }

    fn outlasts_epoch(&self, len: usize) -> bool {
        self.relocation && len > self.actions_left as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Shoot { target: Coord, from: Coord },
    RiskyMove { target: Coord },
}

/// A scored way out of a position with no provably safe frontier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnstuckOption {
    pub kind: OptionKind,
    pub utility: i64,
    pub actions: Vec<Action>,
}

/// Compiles goals into plans.
#[derive(Debug, Clone)]
pub struct StrategicPlanner {
    paths: PathPlanner,
    weights: UtilityWeights,
}

impl StrategicPlanner {
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            paths: PathPlanner::new(config.costs),
            weights: config.utility,
        }
    }

    pub fn create_plan(&self, ctx: &PlanContext<'_>, goal: Goal) -> Option<Plan> {
        match goal {
            Goal::ExploreSafely => self.explore_safely(ctx),
            Goal::ReturnHome | Goal::Escape => self.head_home(ctx),
            Goal::GetUnstuck => self.best_unstuck_option(ctx).map(|o| Plan::new(o.actions)),
        }
    }

    /// Nearest reachable safe unvisited cell, by a danger-avoiding path.
    fn explore_safely(&self, ctx: &PlanContext<'_>) -> Option<Plan> {
        let status = ctx.knowledge.status();
        let mut targets: Vec<Coord> = status
            .iter()
            .filter(|(_, s)| *s == CellStatus::Safe)
            .map(|(c, _)| c)
            .collect();
        // Stable: equal distances keep grid-scan order.
        targets.sort_by_key(|c| c.manhattan(ctx.position));

        targets.into_iter().find_map(|target| {
            self.paths
                .find_path(status, &ctx.query(target))
                .filter(|path| !path.is_empty())
                .map(Plan::new)
        })
    }

    fn head_home(&self, ctx: &PlanContext<'_>) -> Option<Plan> {
        if ctx.position == Coord::ORIGIN {
            return Some(Plan::new([Action::ClimbOut]));
        }
        self.paths
            .find_path(ctx.knowledge.status(), &ctx.query(Coord::ORIGIN).tolerate_danger())
            .map(Plan::new)
    }

    /// Highest-utility option; the first one enumerated wins a tie.
    pub fn best_unstuck_option(&self, ctx: &PlanContext<'_>) -> Option<UnstuckOption> {
        let mut best: Option<UnstuckOption> = None;
        for option in self.unstuck_options(ctx) {
            if best.as_ref().map_or(true, |b| option.utility > b.utility) {
                best = Some(option);
            }
        }
        if let Some(choice) = &best {
            tracing::debug!(kind = ?choice.kind, utility = choice.utility, "get-unstuck option chosen");
        }
        best
    }

    /// All options: shots first, then risky moves, each in grid-scan order.
    pub fn unstuck_options(&self, ctx: &PlanContext<'_>) -> Vec<UnstuckOption> {
        let mut options = Vec::new();
        if ctx.has_arrow {
            self.shoot_options(ctx, &mut options);
        }
        self.risky_options(ctx, &mut options);
        options
    }

    fn shoot_options(&self, ctx: &PlanContext<'_>, out: &mut Vec<UnstuckOption>) {
        let kb = ctx.knowledge;
        let store = kb.store();
        let status = kb.status();

        for target in store.size().cells() {
            let facts = store.facts(target);
            if facts.contains(Fact::DeadWumpus) {
                continue;
            }
            let confirmed = facts.has_live_wumpus();
            let suspected = facts.contains(Fact::MaybeWumpus) && !facts.contains(Fact::NoWumpus);
            if !confirmed && !suspected {
                continue;
            }

            let base = if confirmed {
                self.weights.confirmed_shot
            } else {
                let stenches = store
                    .neighbors(target)
                    .filter(|n| store.is_visited(*n) && store.has(*n, Fact::Stench))
                    .count() as i64;
                self.weights.suspected_shot_per_stench * stenches
            };

            for spot in store.neighbors(target) {
                if !status.get(spot).is_some_and(CellStatus::is_safe) {
                    continue;
                }
                let Some(path) = self.paths.find_path(status, &ctx.query(spot)) else {
                    continue;
                };
                let Some(aim) = spot.direction_to(target) else {
                    continue;
                };
                let (_, arrival) = simulate_actions(path.iter().copied(), ctx.position, ctx.facing);
                let mut actions = path;
                actions.extend(turns_to_face(arrival, aim));
                actions.push(Action::Shoot);

                let utility = base - actions.len() as i64 - self.interruption(ctx, actions.len());
                out.push(UnstuckOption {
                    kind: OptionKind::Shoot { target, from: spot },
                    utility,
                    actions,
                });
            }
        }
    }

    fn risky_options(&self, ctx: &PlanContext<'_>, out: &mut Vec<UnstuckOption>) {
        let kb = ctx.knowledge;
        let store = kb.store();
        let status = kb.status();

        for (target, s) in status.iter() {
            if s != CellStatus::Unknown {
                continue;
            }
            let Some(path) = self
                .paths
                .find_path(status, &ctx.query(target).tolerate_danger())
            else {
                continue;
            };
            if path.is_empty() {
                continue;
            }

            let threat = store
                .neighbors(target)
                .filter(|n| store.is_visited(*n))
                .map(|n| {
                    let facts = store.facts(n);
                    i64::from(facts.contains(Fact::Stench)) + i64::from(facts.contains(Fact::Breeze))
                })
                .sum::<i64>();

            let mut utility = self.weights.risky_base
                - self.weights.risky_per_threat * threat
                - path.len() as i64
                - self.interruption(ctx, path.len());
            if ctx.relocation {
                utility -= self.exposure(ctx, &path);
            }

            out.push(UnstuckOption {
                kind: OptionKind::RiskyMove { target },
                utility,
                actions: path,
            });
        }
    }

    fn interruption(&self, ctx: &PlanContext<'_>, len: usize) -> i64 {
        if ctx.outlasts_epoch(len) {
            self.weights.interruption_penalty
        } else {
            0
        }
    }

    /// Penalty for where the agent stands when the current epoch ends.
    fn exposure(&self, ctx: &PlanContext<'_>, path: &[Action]) -> i64 {
        let store = ctx.knowledge.store();
        let cutoff = path.len().min(ctx.actions_left as usize);
        let (end, _) = simulate_actions(path[..cutoff].iter().copied(), ctx.position, ctx.facing);

        store
            .neighbors(end)
            .map(|n| {
                let facts = store.facts(n);
                let mut penalty = 0;
                if facts.contains(Fact::MaybeWumpus) {
                    penalty += self.weights.exposure_per_suspect;
                }
                if facts.contains(Fact::Stench) {
                    penalty += self.weights.exposure_per_stench;
                }
                penalty
            })
            .sum()
    }
}
