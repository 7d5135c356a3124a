#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Grid coordinate. `x` grows east, `y` grows north; `(0, 0)` is the entrance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, dir: Direction) -> Coord {
        let (dx, dy) = dir.delta();
        Coord::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan(self, other: Coord) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.y - other.y).unsigned_abs()
    }

    /// Direction of an orthogonally adjacent cell, if `other` is one.
    pub fn direction_to(self, other: Coord) -> Option<Direction> {
        Direction::from_delta(other.x - self.x, other.y - self.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Coord::new(x, y)
    }
}

impl core::fmt::Display for Coord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Agent heading. Declaration order is the clockwise turning order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Fixed order for determinism: N, E, S, W.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        match (dx, dy) {
            (0, 1) => Some(Direction::North),
            (1, 0) => Some(Direction::East),
            (0, -1) => Some(Direction::South),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    pub fn turn_left(self) -> Direction {
        Self::ALL[(self.index() + 3) % 4]
    }

    pub fn turn_right(self) -> Direction {
        Self::ALL[(self.index() + 1) % 4]
    }

    /// Number of clockwise quarter turns needed to go from `self` to `target` (0..=3).
    pub fn clockwise_turns_to(self, target: Direction) -> u8 {
        ((target.index() + 4 - self.index()) % 4) as u8
    }
}

/// Rectangular grid bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "grid must be non-empty");
        Self { width, height }
    }

    pub fn square(n: u32) -> Self {
        Self::new(n, n)
    }

    pub fn len(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    pub fn contains(self, c: Coord) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as u32) < self.width && (c.y as u32) < self.height
    }

    /// Dense index for arena storage; `None` outside the grid.
    pub fn index(self, c: Coord) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some((c.x as usize) * (self.height as usize) + (c.y as usize))
    }

    /// All cells in grid-scan order: `x` outer, `y` inner.
    pub fn cells(self) -> impl Iterator<Item = Coord> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..w).flat_map(move |x| (0..h).map(move |y| Coord::new(x, y)))
    }

    /// In-bounds orthogonal neighbours in N, E, S, W order.
    pub fn neighbors(self, c: Coord) -> impl Iterator<Item = Coord> {
        Direction::ALL
            .into_iter()
            .map(move |d| c.step(d))
            .filter(move |n| self.contains(*n))
    }

    /// Cells along a ray starting one step from `from`, until the grid edge.
    pub fn ray(self, from: Coord, dir: Direction) -> impl Iterator<Item = Coord> {
        let mut cur = from;
        core::iter::from_fn(move || {
            cur = cur.step(dir);
            self.contains(cur).then_some(cur)
        })
    }
}
