//! Remaining-cost estimates for peg solitaire states.

use std::str::FromStr;

use crate::error::SolverError;
use crate::geometry::Cell;
use crate::grid::State;

/// Estimates the cost still to pay from a state to the goal.
pub trait Heuristic<T> {
    fn estimate(&self, state: &T) -> f64;
}

impl<T, F> Heuristic<T> for F
where
    F: Fn(&T) -> f64,
{
    #[inline]
    fn estimate(&self, state: &T) -> f64 {
        self(state)
    }
}

/// Pegs left minus one.
///
/// Every jump removes exactly one peg, so this is the exact number of moves
/// still needed from any state that can still be solved, and never an
/// overestimate.
pub fn remaining_count_estimate(state: &State) -> f64 {
    state.len().saturating_sub(1) as f64
}

/// Mean Manhattan distance of the pegs from `target`.
///
/// Not admissible; meant for greedy best-first search. An empty state scores 0.
pub fn average_distance_to_target(state: &State, target: Cell) -> f64 {
    if state.is_empty() {
        return 0.0;
    }
    let total: usize = state.cells().map(|cell| cell.manhattan(target)).sum();
    total as f64 / state.len() as f64
}

/// Selector for the built-in heuristics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeuristicKind {
    /// [`remaining_count_estimate`]
    RemainingCount,
    /// [`average_distance_to_target`]
    AverageDistance,
}

impl HeuristicKind {
    /// Whether the heuristic never overestimates the remaining moves.
    pub const fn is_admissible(self) -> bool {
        match self {
            HeuristicKind::RemainingCount => true,
            HeuristicKind::AverageDistance => false,
        }
    }

    /// Binds the heuristic to the goal's target cell.
    pub fn toward(self, target: Cell) -> TargetHeuristic {
        TargetHeuristic { kind: self, target }
    }

    pub const fn name(self) -> &'static str {
        match self {
            HeuristicKind::RemainingCount => "count",
            HeuristicKind::AverageDistance => "distance",
        }
    }
}

impl std::fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HeuristicKind {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "count" | "h1" | "remaining-count" => Ok(HeuristicKind::RemainingCount),
            "distance" | "h2" | "average-distance" => Ok(HeuristicKind::AverageDistance),
            _ => Err(SolverError::UnsupportedHeuristic(s.to_string())),
        }
    }
}

/// A built-in heuristic bound to a target cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetHeuristic {
    pub kind: HeuristicKind,
    pub target: Cell,
}

impl Heuristic<State> for TargetHeuristic {
    #[inline]
    fn estimate(&self, state: &State) -> f64 {
        match self.kind {
            HeuristicKind::RemainingCount => remaining_count_estimate(state),
            HeuristicKind::AverageDistance => average_distance_to_target(state, self.target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{COLUMN_ENDGAME, ENGLISH};
    use crate::grid::canonical_state;

    const CENTER: Cell = Cell::new(3, 3);

    #[test]
    fn test_remaining_count() {
        let full = canonical_state(ENGLISH.cells).unwrap();
        assert_eq!(remaining_count_estimate(&full), 31.0);
        let single = State::from_cells(7, [CENTER]).unwrap();
        assert_eq!(remaining_count_estimate(&single), 0.0);
        let empty = State::from_cells(7, Vec::<Cell>::new()).unwrap();
        assert_eq!(remaining_count_estimate(&empty), 0.0);
    }

    #[test]
    fn test_average_distance() {
        let column = canonical_state(COLUMN_ENDGAME.cells).unwrap();
        // distances 2, 0 and 1
        assert!((average_distance_to_target(&column, CENTER) - 1.0).abs() < 1e-12);

        let single = State::from_cells(7, [CENTER]).unwrap();
        assert_eq!(average_distance_to_target(&single, CENTER), 0.0);

        let empty = State::from_cells(7, Vec::<Cell>::new()).unwrap();
        assert_eq!(average_distance_to_target(&empty, CENTER), 0.0);
    }

    #[test]
    fn test_target_heuristic_dispatch() {
        let column = canonical_state(COLUMN_ENDGAME.cells).unwrap();
        assert_eq!(
            HeuristicKind::RemainingCount.toward(CENTER).estimate(&column),
            2.0
        );
        assert_eq!(
            HeuristicKind::AverageDistance.toward(CENTER).estimate(&column),
            1.0
        );
    }

    #[test]
    fn test_closures_are_heuristics() {
        let zero = |_: &State| 0.0;
        let column = canonical_state(COLUMN_ENDGAME.cells).unwrap();
        assert_eq!(zero.estimate(&column), 0.0);
    }

    #[test]
    fn test_parse_heuristic_kind() {
        assert_eq!(
            "count".parse::<HeuristicKind>().unwrap(),
            HeuristicKind::RemainingCount
        );
        assert_eq!(
            "H2".parse::<HeuristicKind>().unwrap(),
            HeuristicKind::AverageDistance
        );
        assert!(matches!(
            "manhattan".parse::<HeuristicKind>(),
            Err(SolverError::UnsupportedHeuristic(name)) if name == "manhattan"
        ));
    }

    #[test]
    fn test_admissibility_flags() {
        assert!(HeuristicKind::RemainingCount.is_admissible());
        assert!(!HeuristicKind::AverageDistance.is_admissible());
    }
}
