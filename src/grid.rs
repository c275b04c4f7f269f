//! Canonical peg states and their text rendering.
//!
//! A state is the set of occupied cells, stored as a bitmask over the
//! row-major cell index (`idx = row * width + col`). Two states built from
//! the same pegs in any order have identical bits, so equality and hashing
//! only see membership.

use crate::board::{validate_grid, BoardTopology, OCCUPIED};
use crate::error::SolverError;
use crate::geometry::Cell;

/// Largest board (in grid cells, including off-board ones) a state can hold.
pub const MAX_CELLS: usize = 128;

/// Immutable snapshot of the occupied cells of one board.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct State {
    /// Bit `i` is set when cell index `i` holds a peg.
    occupied: u128,
    /// Grid width, needed to map bit indices back to cells.
    width: u8,
}

impl State {
    /// A state with no pegs for a grid `width` cells wide.
    pub(crate) fn empty(width: usize) -> Self {
        debug_assert!(width > 0 && width <= MAX_CELLS);
        Self {
            occupied: 0,
            width: width as u8,
        }
    }

    /// Builds a state from peg positions. Duplicate cells collapse.
    ///
    /// Returns `None` if a cell falls outside a `MAX_CELLS` grid of this width.
    pub fn from_cells(width: usize, cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        if width == 0 || width > MAX_CELLS {
            return None;
        }
        let mut state = Self::empty(width);
        for cell in cells {
            let idx = state.index(cell)?;
            state.occupied |= 1 << idx;
        }
        Some(state)
    }

    #[inline(always)]
    fn index(&self, cell: Cell) -> Option<usize> {
        let width = self.width as usize;
        if cell.col >= width {
            return None;
        }
        let idx = cell.row.checked_mul(width)?.checked_add(cell.col)?;
        (idx < MAX_CELLS).then_some(idx)
    }

    /// Whether `cell` holds a peg.
    #[inline(always)]
    pub fn contains(&self, cell: Cell) -> bool {
        self.index(cell)
            .is_some_and(|idx| self.occupied & (1 << idx) != 0)
    }

    /// Number of pegs on the board.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.occupied.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub(crate) fn bits(&self) -> u128 {
        self.occupied
    }

    /// Occupied cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let width = self.width as usize;
        let mut remaining = self.occupied;
        std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            let idx = remaining.trailing_zeros() as usize;
            // clear the lowest set bit
            remaining &= remaining - 1;
            Some(Cell::new(idx / width, idx % width))
        })
    }

    /// The state after the peg on `origin` jumps over `jumped` onto `destination`.
    ///
    /// Callers check legality; this only moves bits.
    #[inline]
    pub(crate) fn jump(&self, origin: Cell, jumped: Cell, destination: Cell) -> Option<State> {
        let origin = self.index(origin)?;
        let jumped = self.index(jumped)?;
        let destination = self.index(destination)?;
        let cleared = self.occupied & !(1u128 << origin) & !(1u128 << jumped);
        Some(State {
            occupied: cleared | (1u128 << destination),
            width: self.width,
        })
    }
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries(self.cells().map(|cell| (cell.row, cell.col)))
            .finish()
    }
}

/// Converts a raw marker grid into its canonical state.
///
/// Fails with `InvalidBoardConfiguration` for empty, ragged or oversized
/// grids and for unknown markers.
pub fn canonical_state<R: AsRef<[i8]>>(raw: &[R]) -> Result<State, SolverError> {
    let (_, cols) = validate_grid(raw)?;
    let mut state = State::empty(cols);
    for (r, row) in raw.iter().enumerate() {
        for (c, &value) in row.as_ref().iter().enumerate() {
            if value == OCCUPIED {
                state.occupied |= 1 << (r * cols + c);
            }
        }
    }
    Ok(state)
}

/// Formats a state on its board as text.
///
/// Pegs show as `o`, empty holes as `.`, and off-board cells as spaces.
/// Trailing spaces are trimmed from each row.
pub fn format_state(topology: &BoardTopology, state: &State) -> String {
    let mut output = String::new();
    for row in 0..topology.rows() {
        let mut line = String::with_capacity(topology.cols() * 2);
        for col in 0..topology.cols() {
            if col > 0 {
                line.push(' ');
            }
            let cell = Cell::new(row, col);
            let display_char = if !topology.contains(cell) {
                ' '
            } else if state.contains(cell) {
                'o'
            } else {
                '.'
            };
            line.push(display_char);
        }
        output.push_str(line.trim_end());
        output.push('\n');
    }
    output
}

/// Formats a solution path, one board per step, starting with the
/// initial state.
pub fn format_path(topology: &BoardTopology, path: &[State]) -> String {
    let mut output = String::new();
    for (step, state) in path.iter().enumerate() {
        let pegs = state.len();
        let noun = if pegs == 1 { "peg" } else { "pegs" };
        if step == 0 {
            output.push_str(&format!("Start ({pegs} {noun}):\n"));
        } else {
            output.push_str(&format!("Move {step} ({pegs} {noun}):\n"));
        }
        output.push_str(&format_state(topology, state));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{COLUMN_ENDGAME, ENGLISH};

    #[test]
    fn test_canonical_state_counts_pegs() {
        let state = canonical_state(ENGLISH.cells).unwrap();
        assert_eq!(state.len(), 32);
        assert!(!state.contains(Cell::new(3, 3)));
        assert!(state.contains(Cell::new(0, 2)));
        assert!(!state.contains(Cell::new(0, 0)));
    }

    #[test]
    fn test_state_identity_ignores_insertion_order() {
        let cells = [Cell::new(1, 3), Cell::new(3, 3), Cell::new(4, 3)];
        let forward = State::from_cells(7, cells).unwrap();
        let backward = State::from_cells(7, cells.into_iter().rev()).unwrap();
        let duplicated = State::from_cells(7, cells.into_iter().chain(cells)).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward, duplicated);

        let mut seen = rustc_hash::FxHashSet::default();
        seen.insert(forward);
        assert!(seen.contains(&backward));
        assert_eq!(forward, canonical_state(COLUMN_ENDGAME.cells).unwrap());
    }

    #[test]
    fn test_cells_are_row_major() {
        let state = canonical_state(COLUMN_ENDGAME.cells).unwrap();
        let cells: Vec<Cell> = state.cells().collect();
        assert_eq!(
            cells,
            vec![Cell::new(1, 3), Cell::new(3, 3), Cell::new(4, 3)]
        );
    }

    #[test]
    fn test_from_cells_rejects_wide_columns() {
        assert!(State::from_cells(7, [Cell::new(0, 7)]).is_none());
        assert!(State::from_cells(7, [Cell::new(19, 0)]).is_none());
        assert!(State::from_cells(0, Vec::<Cell>::new()).is_none());
    }

    #[test]
    fn test_jump_moves_pegs() {
        let state = canonical_state(COLUMN_ENDGAME.cells).unwrap();
        let next = state
            .jump(Cell::new(4, 3), Cell::new(3, 3), Cell::new(2, 3))
            .unwrap();
        assert_eq!(next.len(), 2);
        assert!(next.contains(Cell::new(1, 3)));
        assert!(next.contains(Cell::new(2, 3)));
        // the parent is untouched
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn test_canonical_state_rejects_bad_markers() {
        let raw: Vec<Vec<i8>> = vec![vec![1, 0], vec![0, 5]];
        assert!(matches!(
            canonical_state(&raw),
            Err(SolverError::InvalidBoardConfiguration { .. })
        ));
    }

    #[test]
    fn test_format_column_endgame() {
        let topology = BoardTopology::from_raw(COLUMN_ENDGAME.cells).unwrap();
        let state = canonical_state(COLUMN_ENDGAME.cells).unwrap();
        insta::assert_snapshot!(format_state(&topology, &state), @r"
            . . .
            . o .
        . . . . . . .
        . . . o . . .
        . . . o . . .
            . . .
            . . .
        ");
    }
}
