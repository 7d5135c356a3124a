use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wumpus_core::{Coord, Direction, GridSize};
use wumpus_kb::StatusGrid;
use wumpus_nav::{CellStatus, EpochBudget, PathPlanner, PathQuery};

fn checker_grid(n: u32) -> StatusGrid {
    let size = GridSize::square(n);
    let mut grid = StatusGrid::unknown(size);
    for c in size.cells() {
        let status = match (c.x + 2 * c.y) % 7 {
            0 => CellStatus::Dangerous,
            1 | 2 => CellStatus::Unknown,
            3 => CellStatus::Visited,
            _ => CellStatus::Safe,
        };
        grid.set(c, status);
    }
    grid.set(Coord::ORIGIN, CellStatus::Visited);
    grid
}

fn bench_planner(c: &mut Criterion) {
    let mut group = c.benchmark_group("wumpus-nav/planner");
    let planner = PathPlanner::default();

    for n in [8u32, 32] {
        let map = checker_grid(n);
        let far = Coord::new(n as i32 - 1, n as i32 - 1);
        let query = PathQuery::new(Coord::ORIGIN, Direction::East, far).tolerate_danger();

        group.bench_function(format!("corner_to_corner_{n}"), |b| {
            b.iter(|| {
                let path = planner.find_path(&map, &query).expect("path");
                black_box(path.len());
            })
        });

        let budgeted = query.with_budget(Some(EpochBudget::new(3)));
        group.bench_function(format!("corner_to_corner_budget_{n}"), |b| {
            b.iter(|| {
                let path = planner.find_path(&map, &budgeted).expect("path");
                black_box(path.len());
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_planner);
criterion_main!(benches);
