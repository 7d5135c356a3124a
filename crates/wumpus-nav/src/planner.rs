use core::cmp::Ordering;
use std::collections::BinaryHeap;

use wumpus_core::{Action, Coord, Direction, GridSize};

use crate::{EpochBudget, PathCosts, RiskMap};

/// One search request: from a pose to a cell, facing any direction on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathQuery {
    pub start: Coord,
    pub facing: Direction,
    pub goal: Coord,
    pub avoid_dangerous: bool,
    pub budget: Option<EpochBudget>,
}

impl PathQuery {
    /// Danger-avoiding, no epoch budget.
    pub fn new(start: Coord, facing: Direction, goal: Coord) -> Self {
        Self {
            start,
            facing,
            goal,
            avoid_dangerous: true,
            budget: None,
        }
    }

    pub fn tolerate_danger(mut self) -> Self {
        self.avoid_dangerous = false;
        self
    }

    pub fn with_budget(mut self, budget: Option<EpochBudget>) -> Self {
        self.budget = budget;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Pose {
    cell: Coord,
    dir: Direction,
}

#[derive(Debug)]
struct OpenNode {
    f: u32,
    g: u32,
    state: usize,
    tie: u64,
}

impl OpenNode {
    fn key(&self) -> (u32, u32, usize, u64) {
        (self.f, self.g, self.state, self.tie)
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.key().cmp(&self.key())
    }
}

/// A* over (cell, heading) states with status-dependent entry costs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathPlanner {
    costs: PathCosts,
}

impl PathPlanner {
    pub fn new(costs: PathCosts) -> Self {
        Self { costs }
    }

    pub fn costs(&self) -> PathCosts {
        self.costs
    }

    fn state_index(size: GridSize, pose: Pose) -> Option<usize> {
        size.index(pose.cell).map(|idx| idx * 4 + pose.dir as usize)
    }

    fn pose_from_index(size: GridSize, state: usize) -> Pose {
        let cell = state / 4;
        let height = size.height as usize;
        Pose {
            cell: Coord::new((cell / height) as i32, (cell % height) as i32),
            dir: Direction::ALL[state % 4],
        }
    }

    fn heuristic(&self, cell: Coord, goal: Coord) -> u32 {
        cell.manhattan(goal).saturating_mul(self.costs.move_cost)
    }

    /// Successors in fixed order: forward, left, right.
    fn successors(
        &self,
        map: &impl RiskMap,
        query: &PathQuery,
        pose: Pose,
    ) -> impl Iterator<Item = (Action, Pose, u32)> {
        let ahead = pose.cell.step(pose.dir);
        let forward = map
            .status(ahead)
            .and_then(|status| {
                self.costs
                    .entry_cost(status, query.avoid_dangerous, query.budget)
            })
            .map(|cost| {
                (
                    Action::MoveForward,
                    Pose {
                        cell: ahead,
                        dir: pose.dir,
                    },
                    cost,
                )
            });

        let turn = self.costs.turn_cost;
        let left = (
            Action::TurnLeft,
            Pose {
                cell: pose.cell,
                dir: pose.dir.turn_left(),
            },
            turn,
        );
        let right = (
            Action::TurnRight,
            Pose {
                cell: pose.cell,
                dir: pose.dir.turn_right(),
            },
            turn,
        );

        forward.into_iter().chain([left, right])
    }

    fn reconstruct(
        came_from: &[Option<(usize, Action)>],
        mut current: usize,
    ) -> Vec<Action> {
        let mut out = Vec::new();
        while let Some((prev, action)) = came_from[current] {
            out.push(action);
            current = prev;
        }
        out.reverse();
        out
    }

    /// Cheapest action sequence for `query`, or `None` when the goal is unreachable.
    ///
    /// `start == goal` yields an empty sequence. The start cell is never charged.
    pub fn find_path(&self, map: &impl RiskMap, query: &PathQuery) -> Option<Vec<Action>> {
        let size = map.size();
        if !size.contains(query.start) || !size.contains(query.goal) {
            return None;
        }
        if query.start == query.goal {
            return Some(Vec::new());
        }

        let state_len = size.len() * 4;
        let mut g_score = vec![u32::MAX; state_len];
        let mut came_from: Vec<Option<(usize, Action)>> = vec![None; state_len];
        let mut open = BinaryHeap::<OpenNode>::new();
        let mut tie: u64 = 0;

        let start = Pose {
            cell: query.start,
            dir: query.facing,
        };
        let start_idx = Self::state_index(size, start)?;
        g_score[start_idx] = 0;
        open.push(OpenNode {
            f: self.heuristic(query.start, query.goal),
            g: 0,
            state: start_idx,
            tie,
        });
        tie += 1;

        while let Some(node) = open.pop() {
            if node.g != g_score[node.state] {
                // Stale heap entry.
                continue;
            }

            let pose = Self::pose_from_index(size, node.state);
            if pose.cell == query.goal {
                return Some(Self::reconstruct(&came_from, node.state));
            }

            for (action, next, cost) in self.successors(map, query, pose) {
                let Some(next_idx) = Self::state_index(size, next) else {
                    continue;
                };
                let tentative_g = node.g.saturating_add(cost);
                if tentative_g >= g_score[next_idx] {
                    continue;
                }

                came_from[next_idx] = Some((node.state, action));
                g_score[next_idx] = tentative_g;
                open.push(OpenNode {
                    f: tentative_g.saturating_add(self.heuristic(next.cell, query.goal)),
                    g: tentative_g,
                    state: next_idx,
                    tie,
                });
                tie += 1;
            }
        }

        None
    }

    /// Total cost of `actions` from the query's start pose, or `None` if they leave the grid or
    /// enter a cell the query forbids.
    pub fn path_cost(&self, map: &impl RiskMap, query: &PathQuery, actions: &[Action]) -> Option<u32> {
        let mut pose = Pose {
            cell: query.start,
            dir: query.facing,
        };
        let mut total: u32 = 0;
        for action in actions {
            let (next, cost) = match action {
                Action::MoveForward => {
                    let ahead = pose.cell.step(pose.dir);
                    let status = map.status(ahead)?;
                    let cost = self
                        .costs
                        .entry_cost(status, query.avoid_dangerous, query.budget)?;
                    (Pose { cell: ahead, dir: pose.dir }, cost)
                }
                Action::TurnLeft => (
                    Pose {
                        cell: pose.cell,
                        dir: pose.dir.turn_left(),
                    },
                    self.costs.turn_cost,
                ),
                Action::TurnRight => (
                    Pose {
                        cell: pose.cell,
                        dir: pose.dir.turn_right(),
                    },
                    self.costs.turn_cost,
                ),
                _ => return None,
            };
            pose = next;
            total = total.saturating_add(cost);
        }
        Some(total)
    }
}
