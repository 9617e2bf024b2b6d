//! Grid primitives: cells, cardinal directions, diagonal headings
//!
//! Rows grow downward, columns grow rightward. The play field is the
//! rectangle `[0, height) x [0, width)`.

use serde::{Deserialize, Serialize};

/// A character cell on the play field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The neighbouring cell in `dir`
    #[inline]
    pub fn step(self, dir: Direction) -> Self {
        let (dr, dc) = dir.delta();
        self.offset(dr, dc)
    }

    #[inline]
    pub fn offset(self, dr: i32, dc: i32) -> Self {
        Self::new(self.row + dr, self.col + dc)
    }
}

/// Cardinal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (row delta, column delta)
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    #[inline]
    pub fn is_reverse_of(self, other: Direction) -> bool {
        self.reverse() == other
    }
}

/// Diagonal bounce vector for ball-type actors; each component is -1 or +1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading {
    pub dr: i32,
    pub dc: i32,
}

impl Heading {
    pub const fn new(dr: i32, dc: i32) -> Self {
        Self { dr, dc }
    }

    pub fn flip_rows(self) -> Self {
        Self::new(-self.dr, self.dc)
    }

    pub fn flip_cols(self) -> Self {
        Self::new(self.dr, -self.dc)
    }
}

/// Play-field rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub height: i32,
    pub width: i32,
}

impl Field {
    pub const fn new(height: i32, width: i32) -> Self {
        Self { height, width }
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.row < self.height && pos.col >= 0 && pos.col < self.width
    }

    pub fn center(&self) -> Position {
        Position::new(self.height / 2, self.width / 2)
    }

    /// Every cell, row-major
    pub fn cells(self) -> impl Iterator<Item = Position> {
        let (height, width) = (self.height, self.width);
        (0..height).flat_map(move |row| (0..width).map(move |col| Position::new(row, col)))
    }

    pub fn area(&self) -> usize {
        self.height.max(0) as usize * self.width.max(0) as usize
    }
}
