use wumpus_core::{simulate_actions, turns_to_face, Action, Coord, Direction, GridSize, Plan};

#[test]
fn turning_cycles_through_all_headings() {
    let mut dir = Direction::North;
    for expected in [Direction::East, Direction::South, Direction::West, Direction::North] {
        dir = dir.turn_right();
        assert_eq!(dir, expected);
    }
    assert_eq!(Direction::North.turn_left(), Direction::West);
    assert_eq!(Direction::West.turn_left(), Direction::South);
}

#[test]
fn neighbors_are_clipped_and_ordered() {
    let grid = GridSize::square(4);
    let corner: Vec<Coord> = grid.neighbors(Coord::ORIGIN).collect();
    assert_eq!(corner, vec![Coord::new(0, 1), Coord::new(1, 0)]);

    let inner: Vec<Coord> = grid.neighbors(Coord::new(1, 1)).collect();
    assert_eq!(
        inner,
        vec![
            Coord::new(1, 2),
            Coord::new(2, 1),
            Coord::new(1, 0),
            Coord::new(0, 1),
        ]
    );
}

#[test]
fn ray_stops_at_the_edge() {
    let grid = GridSize::square(4);
    let ray: Vec<Coord> = grid.ray(Coord::new(1, 0), Direction::East).collect();
    assert_eq!(ray, vec![Coord::new(2, 0), Coord::new(3, 0)]);
    assert_eq!(grid.ray(Coord::new(3, 3), Direction::North).count(), 0);
}

#[test]
fn scan_order_is_x_major() {
    let grid = GridSize::new(2, 3);
    let cells: Vec<Coord> = grid.cells().collect();
    assert_eq!(cells[0], Coord::new(0, 0));
    assert_eq!(cells[1], Coord::new(0, 1));
    assert_eq!(cells[3], Coord::new(1, 0));
    assert_eq!(cells.len(), grid.len());
    for (i, c) in cells.iter().enumerate() {
        assert_eq!(grid.index(*c), Some(i));
    }
    assert_eq!(grid.index(Coord::new(-1, 0)), None);
}

#[test]
fn turns_to_face_is_minimal() {
    assert!(turns_to_face(Direction::East, Direction::East).is_empty());
    assert_eq!(turns_to_face(Direction::East, Direction::South), vec![Action::TurnRight]);
    assert_eq!(turns_to_face(Direction::East, Direction::North), vec![Action::TurnLeft]);
    assert_eq!(turns_to_face(Direction::East, Direction::West).len(), 2);
}

#[test]
fn plan_simulation_tracks_pose() {
    let plan = Plan::new([
        Action::TurnLeft,
        Action::MoveForward,
        Action::TurnRight,
        Action::MoveForward,
        Action::Shoot,
    ]);
    let (pos, dir) = simulate_actions(plan.iter(), Coord::ORIGIN, Direction::East);
    assert_eq!(pos, Coord::new(1, 1));
    assert_eq!(dir, Direction::East);

    let (pos, dir) = simulate_actions(plan.iter().take(2), Coord::ORIGIN, Direction::East);
    assert_eq!(pos, Coord::new(0, 1));
    assert_eq!(dir, Direction::North);
}

#[test]
fn action_strings_roundtrip() {
    for action in Action::ALL {
        let parsed: Action = action.to_string().parse().expect("parse action");
        assert_eq!(parsed, action);
    }
    let err = "Jump".parse::<Action>().unwrap_err();
    assert_eq!(err.to_string(), "unknown action `Jump`");
}
