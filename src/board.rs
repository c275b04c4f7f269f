//! Board definitions: raw grid markers, board topology and goal parameters.
//!
//! A raw board is a rectangular grid of markers: `-1` for cells that are not
//! part of the board, `0` for an empty hole and `1` for a hole with a peg.
//! The topology keeps only which cells exist; pegs live in [`State`].

use std::path::Path;

use crate::error::SolverError;
use crate::geometry::Cell;
use crate::grid::{State, MAX_CELLS};

/// Marker for a cell that is not part of the board.
pub const OFF_BOARD: i8 = -1;
/// Marker for an empty hole.
pub const EMPTY: i8 = 0;
/// Marker for a hole holding a peg.
pub const OCCUPIED: i8 = 1;

/// Decoded raw grid marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    OffBoard,
    Empty,
    Occupied,
}

impl TryFrom<i8> for Marker {
    type Error = i8;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            OFF_BOARD => Ok(Marker::OffBoard),
            EMPTY => Ok(Marker::Empty),
            OCCUPIED => Ok(Marker::Occupied),
            other => Err(other),
        }
    }
}

/// Checks that a raw grid is non-empty, rectangular, fits in a [`State`] and
/// only uses known markers. Returns `(rows, cols)`.
pub(crate) fn validate_grid<R: AsRef<[i8]>>(raw: &[R]) -> Result<(usize, usize), SolverError> {
    let rows = raw.len();
    let cols = raw.first().map(|row| row.as_ref().len()).unwrap_or(0);
    if rows == 0 || cols == 0 {
        return Err(SolverError::invalid_board("board has no cells"));
    }

    for (r, row) in raw.iter().enumerate() {
        let row = row.as_ref();
        if row.len() != cols {
            return Err(SolverError::invalid_board(format!(
                "row {r} has {} cells, expected {cols}",
                row.len()
            )));
        }
        for (c, &value) in row.iter().enumerate() {
            if let Err(bad) = Marker::try_from(value) {
                return Err(SolverError::invalid_board(format!(
                    "unrecognized marker {bad} at ({r}, {c})"
                )));
            }
        }
    }

    if rows * cols > MAX_CELLS {
        return Err(SolverError::invalid_board(format!(
            "{rows}x{cols} grid exceeds {MAX_CELLS} cells"
        )));
    }

    Ok((rows, cols))
}

/// The static shape of a board: which cells exist.
///
/// Built once per puzzle instance and never mutated, so it can be shared
/// between engines running on different threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardTopology {
    rows: usize,
    cols: usize,
    /// Bit `r * cols + c` is set when the cell is part of the board.
    on_board: u128,
}

impl BoardTopology {
    /// Builds the topology from a raw grid, ignoring peg placement.
    pub fn from_raw<R: AsRef<[i8]>>(raw: &[R]) -> Result<Self, SolverError> {
        let (rows, cols) = validate_grid(raw)?;
        let mut on_board = 0u128;
        for (r, row) in raw.iter().enumerate() {
            for (c, &value) in row.as_ref().iter().enumerate() {
                if value != OFF_BOARD {
                    on_board |= 1 << (r * cols + c);
                }
            }
        }
        Ok(Self {
            rows,
            cols,
            on_board,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of holes on the board.
    pub fn hole_count(&self) -> usize {
        self.on_board.count_ones() as usize
    }

    /// True iff `(row, col)` lies inside the grid and is part of the board.
    #[inline]
    pub fn is_valid_position(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.on_board & (1 << (row * self.cols + col)) != 0
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.is_valid_position(cell.row, cell.col)
    }

    /// The geometric centre of the grid.
    pub fn center(&self) -> Cell {
        Cell::new(self.rows / 2, self.cols / 2)
    }

    /// Whether every peg of `state` sits on a hole of this board.
    pub fn admits(&self, state: &State) -> bool {
        state.width() == self.cols && state.bits() & !self.on_board == 0
    }
}

/// Goal parameters: the cell the last peg must end on and how many pegs
/// may remain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Goal {
    pub target: Cell,
    pub remaining: usize,
}

impl Goal {
    /// The usual solitaire goal: a single peg left on `target`.
    pub const fn single(target: Cell) -> Self {
        Self {
            target,
            remaining: 1,
        }
    }
}

/// A named built-in board with its target cell.
pub struct BoardDefinition {
    pub name: &'static str,
    pub cells: &'static [&'static [i8]],
    pub target: Cell,
}

impl BoardDefinition {
    /// Decodes the definition into a topology, initial state and goal.
    pub fn load(&self) -> Result<(BoardTopology, State, Goal), SolverError> {
        let (topology, state) = load_board(self.cells)?;
        Ok((topology, state, Goal::single(self.target)))
    }
}

/// The 33-hole English cross with every hole filled except the centre.
pub const ENGLISH: BoardDefinition = BoardDefinition {
    name: "english",
    cells: &[
        &[-1, -1, 1, 1, 1, -1, -1],
        &[-1, -1, 1, 1, 1, -1, -1],
        &[1, 1, 1, 1, 1, 1, 1],
        &[1, 1, 1, 0, 1, 1, 1],
        &[1, 1, 1, 1, 1, 1, 1],
        &[-1, -1, 1, 1, 1, -1, -1],
        &[-1, -1, 1, 1, 1, -1, -1],
    ],
    target: Cell::new(3, 3),
};

/// English cross with three pegs left in the middle column around the
/// empty hole at (2, 3). Two jumps finish on the centre.
pub const COLUMN_ENDGAME: BoardDefinition = BoardDefinition {
    name: "column",
    cells: &[
        &[-1, -1, 0, 0, 0, -1, -1],
        &[-1, -1, 0, 1, 0, -1, -1],
        &[0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 1, 0, 0, 0],
        &[0, 0, 0, 1, 0, 0, 0],
        &[-1, -1, 0, 0, 0, -1, -1],
        &[-1, -1, 0, 0, 0, -1, -1],
    ],
    target: Cell::new(3, 3),
};

/// All built-in boards, looked up by name from the command line.
pub const BOARDS: &[&BoardDefinition] = &[&ENGLISH, &COLUMN_ENDGAME];

/// Finds a built-in board by name.
pub fn builtin(name: &str) -> Option<&'static BoardDefinition> {
    BOARDS.iter().copied().find(|board| board.name == name)
}

/// Decodes a raw grid into its topology and canonical initial state.
pub fn load_board<R: AsRef<[i8]>>(raw: &[R]) -> Result<(BoardTopology, State), SolverError> {
    let topology = BoardTopology::from_raw(raw)?;
    let state = crate::grid::canonical_state(raw)?;
    Ok((topology, state))
}

/// Parses a whitespace-separated marker grid, one board row per line.
///
/// Blank lines and lines starting with `#` are skipped. Shape and marker
/// checks happen when the grid is loaded.
pub fn parse_raw_grid(text: &str) -> Result<Vec<Vec<i8>>, SolverError> {
    let mut grid = Vec::new();
    for (line_number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<i8>().map_err(|_| {
                    SolverError::invalid_board(format!(
                        "line {}: `{token}` is not a marker",
                        line_number + 1
                    ))
                })
            })
            .collect::<Result<Vec<i8>, _>>()?;
        grid.push(row);
    }
    Ok(grid)
}

/// Reads and parses a marker grid file.
pub fn read_raw_grid(path: impl AsRef<Path>) -> Result<Vec<Vec<i8>>, SolverError> {
    let text = std::fs::read_to_string(path)?;
    parse_raw_grid(&text)
}
