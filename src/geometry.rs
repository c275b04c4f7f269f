//! Board coordinates and jump directions.
//!
//! A jump moves a peg two cells along one of the four axis directions,
//! removing the peg it passes over.

use serde::Serialize;

/// A board cell addressed by row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Steps `distance` cells along `direction`.
    ///
    /// Returns `None` when the result would leave the non-negative quadrant;
    /// upper bounds are the topology's concern.
    #[inline]
    pub fn step(self, direction: Direction, distance: usize) -> Option<Cell> {
        let (dr, dc) = direction.delta();
        let row = offset(self.row, dr, distance)?;
        let col = offset(self.col, dc, distance)?;
        Some(Cell { row, col })
    }

    /// Manhattan distance between two cells.
    #[inline]
    pub fn manhattan(self, other: Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[inline]
fn offset(value: usize, delta: isize, distance: usize) -> Option<usize> {
    value.checked_add_signed(delta * distance as isize)
}

/// The four axis directions a peg can jump in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    East,
    West,
    South,
    North,
}

/// All jump directions, in the order successors are generated.
///
/// Successor order feeds the frontier's insertion sequence, so changing it
/// changes which of several equal-priority states is expanded first.
pub const DIRECTIONS: [Direction; 4] = [
    Direction::East,
    Direction::West,
    Direction::South,
    Direction::North,
];

impl Direction {
    /// Row and column delta of a single step.
    #[inline]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::South => (1, 0),
            Direction::North => (-1, 0),
        }
    }
}
