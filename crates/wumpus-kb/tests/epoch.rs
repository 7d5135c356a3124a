use wumpus_core::{Action, Coord, Direction, GridSize, Percept, Percepts};
use wumpus_kb::{CellStatus, Fact, Knowledge};

fn c(x: i32, y: i32) -> Coord {
    Coord::new(x, y)
}

#[test]
fn relocation_boundary_reverts_volatile_safety() {
    let mut kb = Knowledge::new(GridSize::square(4), 1);
    kb.update(Coord::ORIGIN, Percepts::NONE, None, None, true);
    assert_eq!(kb.cell_status(c(1, 0)), Some(CellStatus::Safe));

    kb.on_epoch_boundary(true);

    assert_eq!(kb.cell_status(c(1, 0)), Some(CellStatus::Unknown));
    assert_eq!(kb.cell_status(Coord::ORIGIN), Some(CellStatus::Visited));
    assert!(!kb.store().has(c(1, 0), Fact::NoWumpus));
}

#[test]
fn static_boundary_keeps_permanent_conclusions() {
    let mut kb = Knowledge::new(GridSize::square(4), 1);
    kb.update(Coord::ORIGIN, Percepts::NONE, None, None, false);

    kb.on_epoch_boundary(false);

    let facts = kb.store().facts(c(1, 0));
    assert!(facts.contains(Fact::Safe));
    assert!(kb.store().volatile_facts(c(1, 0)).is_empty());
    assert_eq!(kb.cell_status(c(1, 0)), Some(CellStatus::Safe));
}

#[test]
fn dead_wumpus_cell_stays_safe_across_boundaries() {
    let mut kb = Knowledge::new(GridSize::square(4), 2);
    kb.update(Coord::ORIGIN, [Percept::Stench].into(), None, None, true);
    let report = kb.update(
        Coord::ORIGIN,
        [Percept::Scream].into(),
        Some(Action::Shoot),
        Some(Direction::East),
        true,
    );
    assert_eq!(report.killed, Some(c(1, 0)));

    for _ in 0..3 {
        kb.on_epoch_boundary(true);
        assert_eq!(kb.cell_status(c(1, 0)), Some(CellStatus::Safe));
        assert!(kb.store().has(c(1, 0), Fact::DeadWumpus));
    }
}

#[test]
fn confirmed_wumpus_is_demoted_to_a_suspicion() {
    let mut kb = Knowledge::new(GridSize::square(4), 1);
    kb.update(Coord::ORIGIN, [Percept::Stench].into(), None, None, true);
    kb.update(c(1, 0), Percepts::NONE, None, None, true);
    assert_eq!(kb.cell_status(c(0, 1)), Some(CellStatus::Dangerous));

    kb.on_epoch_boundary(true);

    let facts = kb.store().facts(c(0, 1));
    assert!(!facts.contains(Fact::Wumpus));
    assert!(kb.store().volatile_facts(c(0, 1)).contains(Fact::MaybeWumpus));
    assert_eq!(kb.cell_status(c(0, 1)), Some(CellStatus::Unknown));
    assert_eq!(kb.possible_wumpuses(), vec![c(0, 1)]);
}

#[test]
fn visited_cells_never_regress() {
    let mut kb = Knowledge::new(GridSize::square(4), 1);
    let route = [Coord::ORIGIN, c(1, 0), c(1, 1), c(0, 1)];
    for pos in route {
        kb.update(pos, Percepts::NONE, None, None, true);
    }
    kb.on_epoch_boundary(true);
    kb.on_epoch_boundary(false);
    for pos in route {
        assert_eq!(kb.cell_status(pos), Some(CellStatus::Visited));
    }
}
