//! Drives one agent through one world until the game ends or the step cap is hit.

use serde::Serialize;
use wumpus_agent::Agent;
use wumpus_core::{Action, Coord, Direction, Environment, GameStatus, Percepts};

/// One tick as seen from outside: what the agent perceived, did, and what came of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step: u32,
    pub position: Coord,
    pub direction: Direction,
    pub percepts: Percepts,
    pub action: Action,
    pub outcome: String,
    pub score: i64,
    pub status: GameStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeReport {
    pub status: GameStatus,
    pub score: i64,
    pub steps: u32,
    pub final_position: Coord,
    pub has_gold: bool,
    /// The step cap ended the episode while the game was still running.
    pub truncated: bool,
}

pub fn run_episode(env: &mut impl Environment, agent: &mut Agent, max_steps: u32) -> EpisodeReport {
    run_episode_with(env, agent, max_steps, |_, _| {})
}

/// Like [`run_episode`], calling `observe` after every applied action with the agent as it was
/// when it decided.
pub fn run_episode_with<F>(
    env: &mut impl Environment,
    agent: &mut Agent,
    max_steps: u32,
    mut observe: F,
) -> EpisodeReport
where
    F: FnMut(&Agent, &StepRecord),
{
    let mut steps = 0;
    agent.update_state(env.state());

    while env.state().status == GameStatus::Playing && steps < max_steps {
        let before = env.state();
        let percepts = env.percepts();
        agent.update_state(before);
        let action = agent.decide_action(percepts);
        let outcome = env.apply_action(action);
        let after = env.state();
        steps += 1;

        let record = StepRecord {
            step: steps,
            position: before.position,
            direction: before.direction,
            percepts,
            action,
            outcome,
            score: after.score,
            status: after.status,
        };
        tracing::trace!(
            step = steps,
            %action,
            score = after.score,
            outcome = %record.outcome,
            "step"
        );
        observe(agent, &record);
        agent.update_state(after);
    }

    let end = env.state();
    let report = EpisodeReport {
        status: end.status,
        score: end.score,
        steps,
        final_position: end.position,
        has_gold: end.has_gold,
        truncated: end.status == GameStatus::Playing,
    };
    tracing::info!(
        status = ?report.status,
        score = report.score,
        steps = report.steps,
        has_gold = report.has_gold,
        truncated = report.truncated,
        "episode finished"
    );
    report
}
