//! Cardinal headings and integer grid coordinates.
//!
//! The grid uses screen orientation: `x` grows to the right and `y` grows
//! downward, so `North` points toward row 0.

use std::fmt;
use std::ops::{Add, Mul, Sub};

/// One of the four cardinal headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    North,
    #[default]
    East,
    South,
    West,
}

impl Direction {
    /// Clockwise order used for rotation.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// Rotate one step clockwise.
    pub fn rotate_right(self) -> Self {
        Self::ALL[(self.index() + 1) % 4]
    }

    /// Rotate one step counter-clockwise.
    pub fn rotate_left(self) -> Self {
        Self::ALL[(self.index() + 3) % 4]
    }

    /// Unit offset of a single step in this heading.
    pub fn delta(self) -> Coord {
        match self {
            Direction::North => Coord::new(0, -1),
            Direction::East => Coord::new(1, 0),
            Direction::South => Coord::new(0, 1),
            Direction::West => Coord::new(-1, 0),
        }
    }

    /// Arrow glyph used by the renderers.
    pub fn arrow(self) -> char {
        match self {
            Direction::North => '^',
            Direction::East => '>',
            Direction::South => 'v',
            Direction::West => '<',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

/// An `(x, y)` pair addressing a grid cell, also used for grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move `n` cells in direction `dir`.
    pub fn shift(self, dir: Direction, n: i32) -> Self {
        self + dir.delta() * n
    }

    /// True when `0 <= x < dims.x` and `0 <= y < dims.y`.
    pub fn in_bounds(self, dims: Coord) -> bool {
        (0..dims.x).contains(&self.x) && (0..dims.y).contains(&self.y)
    }

    /// Smallest component.
    pub fn min_component(self) -> i32 {
        self.x.min(self.y)
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Coord {
    type Output = Coord;

    fn mul(self, rhs: i32) -> Coord {
        Coord::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
