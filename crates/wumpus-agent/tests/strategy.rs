use wumpus_agent::{AgentConfig, Goal, OptionKind, PlanContext, StrategicPlanner};
use wumpus_core::{Action, Coord, Direction, GridSize, Percept, Percepts};
use wumpus_kb::{Fact, Knowledge};

fn c(x: i32, y: i32) -> Coord {
    Coord::new(x, y)
}

fn ctx(knowledge: &Knowledge, relocation: bool, actions_left: u32) -> PlanContext<'_> {
    PlanContext {
        knowledge,
        position: Coord::ORIGIN,
        facing: Direction::East,
        has_arrow: true,
        relocation,
        actions_left,
    }
}

fn stench_at_entrance() -> Knowledge {
    let mut kb = Knowledge::new(GridSize::square(4), 1);
    kb.update(Coord::ORIGIN, [Percept::Stench].into(), None, None, false);
    kb
}

#[test]
fn shots_are_enumerated_before_risky_moves() {
    let kb = stench_at_entrance();
    let planner = StrategicPlanner::new(&AgentConfig::default());
    let options = planner.unstuck_options(&ctx(&kb, false, 5));

    let first_risky = options
        .iter()
        .position(|o| matches!(o.kind, OptionKind::RiskyMove { .. }))
        .expect("risky options exist");
    assert!(first_risky > 0);
    assert!(options[first_risky..]
        .iter()
        .all(|o| matches!(o.kind, OptionKind::RiskyMove { .. })));

    let shots: Vec<_> = options[..first_risky].iter().map(|o| o.kind).collect();
    assert_eq!(
        shots,
        vec![
            OptionKind::Shoot { target: c(0, 1), from: Coord::ORIGIN },
            OptionKind::Shoot { target: c(1, 0), from: Coord::ORIGIN },
        ]
    );
}

#[test]
fn suspected_shot_utility_counts_stench_and_plan_length() {
    let kb = stench_at_entrance();
    let planner = StrategicPlanner::new(&AgentConfig::default());
    let options = planner.unstuck_options(&ctx(&kb, false, 5));

    // One corroborating stench: 10, minus [TurnLeft, Shoot] or [Shoot].
    assert_eq!(options[0].utility, 10 - 2);
    assert_eq!(options[0].actions, vec![Action::TurnLeft, Action::Shoot]);
    assert_eq!(options[1].utility, 10 - 1);

    let best = planner.best_unstuck_option(&ctx(&kb, false, 5)).unwrap();
    assert_eq!(best.kind, OptionKind::Shoot { target: c(1, 0), from: Coord::ORIGIN });
}

#[test]
fn plans_outlasting_the_epoch_pay_the_interruption_penalty() {
    let kb = stench_at_entrance();
    let config = AgentConfig::default();
    let planner = StrategicPlanner::new(&config);

    let roomy = planner.unstuck_options(&ctx(&kb, true, 5));
    let tight = planner.unstuck_options(&ctx(&kb, true, 1));

    // [TurnLeft, Shoot] no longer fits; [Shoot] still does.
    assert_eq!(roomy[0].utility - tight[0].utility, config.utility.interruption_penalty);
    assert_eq!(roomy[1].utility, tight[1].utility);
}

#[test]
fn equal_utilities_keep_the_first_enumerated_option() {
    let mut kb = Knowledge::new(GridSize::square(4), 1);
    kb.store_mut().add_fact(c(1, 2), Fact::NoWumpus, false);
    kb.update(c(1, 1), [Percept::Stench].into(), None, None, false);

    let planner = StrategicPlanner::new(&AgentConfig::default());
    let context = PlanContext {
        position: c(1, 1),
        facing: Direction::North,
        ..ctx(&kb, false, 5)
    };

    // West and east suspects each need one turn.
    let options = planner.unstuck_options(&context);
    let west = options
        .iter()
        .find(|o| o.kind == OptionKind::Shoot { target: c(0, 1), from: c(1, 1) })
        .unwrap();
    let east = options
        .iter()
        .find(|o| o.kind == OptionKind::Shoot { target: c(2, 1), from: c(1, 1) })
        .unwrap();
    assert_eq!(west.utility, east.utility);

    let best = planner.best_unstuck_option(&context).unwrap();
    assert_eq!(best.kind, west.kind);
    assert_eq!(best.actions, vec![Action::TurnLeft, Action::Shoot]);
}

#[test]
fn return_home_at_the_exit_is_a_single_climb() {
    let kb = Knowledge::new(GridSize::square(4), 1);
    let planner = StrategicPlanner::new(&AgentConfig::default());
    let plan = planner.create_plan(&ctx(&kb, false, 5), Goal::ReturnHome).unwrap();
    assert_eq!(plan.iter().collect::<Vec<_>>(), vec![Action::ClimbOut]);
}

#[test]
fn explore_returns_none_without_safe_frontier() {
    let kb = stench_at_entrance();
    let planner = StrategicPlanner::new(&AgentConfig::default());
    assert!(planner.create_plan(&ctx(&kb, false, 5), Goal::ExploreSafely).is_none());

    let mut quiet = Knowledge::new(GridSize::square(4), 1);
    quiet.update(Coord::ORIGIN, Percepts::NONE, None, None, false);
    let plan = planner.create_plan(&ctx(&quiet, false, 5), Goal::ExploreSafely).unwrap();
    assert_eq!(plan.iter().collect::<Vec<_>>(), vec![Action::TurnLeft, Action::MoveForward]);
}
