use wumpus_core::{
    Action, Coord, Direction, Environment, GameStatus, GridSize, Percept, Percepts,
};
use wumpus_sim::{Relocation, Scoring, WorldMap, WumpusWorld};

fn map(n: u32, wumpuses: &[(i32, i32)], pits: &[(i32, i32)], gold: (i32, i32)) -> WorldMap {
    let mut map = WorldMap::empty(GridSize::square(n));
    for w in wumpuses {
        map.set_wumpus((*w).into(), true);
    }
    for p in pits {
        map.set_pit((*p).into(), true);
    }
    map.set_gold(gold.into(), true);
    map
}

fn world(map: WorldMap) -> WumpusWorld {
    WumpusWorld::new(map, Scoring::default())
}

#[test]
fn percepts_come_from_orthogonal_neighbours() {
    let mut w = world(map(4, &[(2, 0)], &[(0, 2)], (3, 3)));
    assert_eq!(w.percepts(), Percepts::NONE);

    w.apply_action(Action::MoveForward);
    assert_eq!(w.state().position, Coord::new(1, 0));
    assert_eq!(w.percepts(), Percepts::from([Percept::Stench]));
    assert_eq!(w.state().score, -1);
}

#[test]
fn bump_is_reported_once() {
    let mut w = world(map(4, &[], &[], (3, 3)));
    w.apply_action(Action::TurnRight);
    let message = w.apply_action(Action::MoveForward);

    assert!(message.contains("Bump"));
    assert_eq!(w.state().position, Coord::ORIGIN);
    assert_eq!(w.state().direction, Direction::South);
    assert!(w.percepts().contains(Percept::Bump));
    assert!(!w.percepts().contains(Percept::Bump));
    assert_eq!(w.state().score, -2);
}

#[test]
fn arrow_kills_the_first_wumpus_on_its_ray() {
    let mut w = world(map(5, &[(2, 0), (4, 0)], &[], (0, 4)));
    let message = w.apply_action(Action::Shoot);

    assert!(message.contains("scream"));
    assert!(!w.true_map().has_wumpus(Coord::new(2, 0)));
    assert!(w.true_map().has_wumpus(Coord::new(4, 0)));
    assert!(!w.state().has_arrow);
    assert_eq!(w.state().score, -10);

    assert!(w.percepts().contains(Percept::Scream));
    assert!(!w.percepts().contains(Percept::Scream));

    let again = w.apply_action(Action::Shoot);
    assert!(again.contains("no arrow"));
    assert_eq!(w.state().score, -20);
    assert!(w.true_map().has_wumpus(Coord::new(4, 0)));
}

#[test]
fn missed_arrow_stays_silent() {
    let mut w = world(map(4, &[(0, 3)], &[], (3, 3)));
    w.apply_action(Action::Shoot);
    assert!(!w.percepts().contains(Percept::Scream));
    assert_eq!(w.true_map().wumpus_count(), 1);
}

#[test]
fn grab_takes_the_gold_once() {
    let mut w = world(map(4, &[], &[], (0, 0)));
    assert!(w.percepts().contains(Percept::Glitter));

    w.apply_action(Action::Grab);
    assert!(w.state().has_gold);
    assert_eq!(w.state().score, 10);
    assert!(!w.percepts().contains(Percept::Glitter));

    let message = w.apply_action(Action::Grab);
    assert!(message.contains("nothing"));
    assert_eq!(w.state().score, 10);
}

#[test]
fn climbing_out_with_gold_wins_and_ends_the_game() {
    let mut w = world(map(4, &[], &[], (0, 0)));
    w.apply_action(Action::Grab);
    w.apply_action(Action::ClimbOut);

    assert_eq!(w.state().status, GameStatus::Won);
    assert_eq!(w.state().score, 1010);

    assert_eq!(w.apply_action(Action::MoveForward), "The game is over.");
    assert_eq!(w.state().score, 1010);
    assert_eq!(w.state().position, Coord::ORIGIN);
}

#[test]
fn climbing_out_without_gold_is_a_loss() {
    let mut w = world(map(4, &[], &[], (3, 3)));
    w.apply_action(Action::ClimbOut);
    assert_eq!(w.state().status, GameStatus::Lost);
    assert_eq!(w.state().score, 0);
}

#[test]
fn climbing_away_from_the_entrance_does_nothing() {
    let mut w = world(map(4, &[], &[], (3, 3)));
    w.apply_action(Action::MoveForward);
    w.apply_action(Action::ClimbOut);
    assert_eq!(w.state().status, GameStatus::Playing);
    assert_eq!(w.state().score, -1);
}

#[test]
fn entering_a_pit_is_fatal() {
    let mut w = world(map(4, &[], &[(1, 0)], (3, 3)));
    w.apply_action(Action::MoveForward);
    assert_eq!(w.state().status, GameStatus::Lost);
    assert_eq!(w.state().score, -1001);
}

#[test]
fn wumpuses_move_after_each_interval() {
    // The only legal step from (2,2) is south; (1,2) is a pit.
    let mut w = world(map(3, &[(2, 2)], &[(1, 2)], (0, 0)))
        .with_relocation(Relocation::new(2, 7));

    w.apply_action(Action::TurnLeft);
    assert_eq!(w.true_map().wumpuses(), vec![Coord::new(2, 2)]);
    assert_eq!(w.relocation().map(Relocation::since_move), Some(1));

    w.apply_action(Action::TurnLeft);
    assert_eq!(w.true_map().wumpuses(), vec![Coord::new(2, 1)]);
    assert_eq!(w.relocation().map(Relocation::since_move), Some(0));
}

#[test]
fn boxed_in_wumpus_stays_put() {
    let mut w = world(map(3, &[(2, 2)], &[(1, 2), (2, 1)], (0, 0)))
        .with_relocation(Relocation::new(1, 3));
    w.apply_action(Action::TurnLeft);
    assert_eq!(w.true_map().wumpuses(), vec![Coord::new(2, 2)]);
}

#[test]
fn wumpus_walking_onto_the_agent_kills_it() {
    // From (2,0) the wumpus can only step west, onto (1,0).
    let mut w = world(map(3, &[(2, 0)], &[(2, 1)], (0, 2)))
        .with_relocation(Relocation::new(1, 11));
    w.apply_action(Action::MoveForward);

    assert_eq!(w.state().position, Coord::new(1, 0));
    assert_eq!(w.state().status, GameStatus::Lost);
    assert_eq!(w.state().score, -1001);
}

#[test]
fn relocation_never_stacks_wumpuses_or_enters_pits() {
    let mut w = world(map(4, &[(2, 2), (3, 3), (1, 3)], &[(2, 3)], (0, 0)))
        .with_relocation(Relocation::new(1, 42));
    for _ in 0..40 {
        w.apply_action(Action::TurnRight);
        if w.state().status != GameStatus::Playing {
            break;
        }
        let m = w.true_map();
        assert_eq!(m.wumpus_count(), 3);
        assert!(m.wumpuses().iter().all(|c| !m.has_pit(*c)));
    }
}
