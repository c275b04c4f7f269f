//! Peg solitaire as a searchable state space.

use std::sync::Arc;

use tracing::warn;

use crate::board::{load_board, BoardDefinition, BoardTopology, Goal};
use crate::error::SolverError;
use crate::geometry::{Cell, DIRECTIONS};
use crate::grid::State;
use crate::heuristics::{HeuristicKind, TargetHeuristic};
use crate::scheduler::{Algorithm, PriorityScheduler};
use crate::StateSpace;

/// One peg solitaire instance: a shared board topology plus the goal.
///
/// The topology sits behind an `Arc` so several engines (different
/// algorithms or heuristics) can search the same board concurrently.
#[derive(Clone, Debug)]
pub struct PegSolitaire {
    topology: Arc<BoardTopology>,
    goal: Goal,
}

impl PegSolitaire {
    pub fn new(topology: Arc<BoardTopology>, goal: Goal) -> Self {
        Self { topology, goal }
    }

    /// Loads a raw grid and aims for a single peg on `target`, or on the
    /// grid centre when no target is given.
    ///
    /// Fails with `InvalidBoardConfiguration` for a malformed grid or a
    /// target that is not a hole of the board.
    pub fn from_raw<R: AsRef<[i8]>>(
        raw: &[R],
        target: Option<Cell>,
    ) -> Result<(Self, State), SolverError> {
        let (topology, state) = load_board(raw)?;
        let target = target.unwrap_or_else(|| topology.center());
        if !topology.contains(target) {
            return Err(SolverError::invalid_board(format!(
                "target {target} is not a hole of the board"
            )));
        }
        Ok((Self::new(Arc::new(topology), Goal::single(target)), state))
    }

    /// Loads a built-in board, optionally overriding its target.
    pub fn from_definition(
        definition: &BoardDefinition,
        target: Option<Cell>,
    ) -> Result<(Self, State), SolverError> {
        Self::from_raw(definition.cells, Some(target.unwrap_or(definition.target)))
    }

    /// A scheduler for `algorithm` using `heuristic` aimed at this goal.
    pub fn scheduler(
        &self,
        algorithm: Algorithm,
        heuristic: HeuristicKind,
    ) -> PriorityScheduler<TargetHeuristic> {
        if algorithm == Algorithm::AStar && !heuristic.is_admissible() {
            warn!(%heuristic, "A* with a non-admissible heuristic may return a longer path");
        }
        PriorityScheduler::new(algorithm, heuristic.toward(self.goal.target))
    }

    /// Shares this instance's topology with a new goal.
    pub fn with_goal(&self, goal: Goal) -> Self {
        Self::new(Arc::clone(&self.topology), goal)
    }

    pub fn topology(&self) -> &BoardTopology {
        &self.topology
    }

    pub fn shared_topology(&self) -> Arc<BoardTopology> {
        Arc::clone(&self.topology)
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }
}

/// Every state reachable from `state` by one jump.
///
/// For each peg and each direction: if the neighbouring cell holds a peg and
/// the cell beyond it is an empty hole, the jump clears the origin and the
/// jumped cell and fills the destination. All successors are returned; the
/// same successor can appear more than once.
pub fn generate_moves(topology: &BoardTopology, state: &State) -> Vec<State> {
    let mut successors = Vec::new();
    for origin in state.cells() {
        for direction in DIRECTIONS {
            let Some(jumped) = origin.step(direction, 1) else {
                continue;
            };
            let Some(destination) = origin.step(direction, 2) else {
                continue;
            };
            if !state.contains(jumped)
                || !topology.contains(destination)
                || state.contains(destination)
            {
                continue;
            }
            if let Some(next) = state.jump(origin, jumped, destination) {
                successors.push(next);
            }
        }
    }
    successors
}

impl StateSpace for PegSolitaire {
    type State = State;

    fn successors(&self, state: &State) -> Vec<State> {
        generate_moves(&self.topology, state)
    }

    /// Exactly `goal.remaining` pegs left, one of them on the target.
    fn is_goal(&self, state: &State) -> bool {
        state.len() == self.goal.remaining && state.contains(self.goal.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{COLUMN_ENDGAME, ENGLISH};
    use rustc_hash::FxHashSet;

    fn english() -> (BoardTopology, State) {
        load_board(ENGLISH.cells).unwrap()
    }

    #[test]
    fn test_english_opening_has_four_moves() {
        let (topology, state) = english();
        let moves = generate_moves(&topology, &state);
        assert_eq!(moves.len(), 4);
        for next in &moves {
            assert_eq!(next.len(), 31);
            assert!(next.contains(Cell::new(3, 3)));
        }
    }

    #[test]
    fn test_generate_moves_leaves_input_untouched() {
        let (topology, state) = english();
        let before = state;
        let _ = generate_moves(&topology, &state);
        assert_eq!(state, before);
    }

    #[test]
    fn test_column_endgame_moves() {
        let (topology, state) = load_board(COLUMN_ENDGAME.cells).unwrap();
        let moves = generate_moves(&topology, &state);
        let expected_a = State::from_cells(7, [Cell::new(1, 3), Cell::new(5, 3)]).unwrap();
        let expected_b = State::from_cells(7, [Cell::new(1, 3), Cell::new(2, 3)]).unwrap();
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(&expected_a));
        assert!(moves.contains(&expected_b));
    }

    #[test]
    fn test_off_board_destination_is_not_a_move() {
        // two pegs in a row against the edge: the jump would leave the grid
        let raw: Vec<Vec<i8>> = vec![vec![1, 1], vec![0, 0]];
        let (topology, state) = load_board(&raw).unwrap();
        assert!(generate_moves(&topology, &state).is_empty());

        // and a hole-less cell beyond the jumped peg blocks it too
        let raw: Vec<Vec<i8>> = vec![vec![1, 1, -1]];
        let (topology, state) = load_board(&raw).unwrap();
        assert!(generate_moves(&topology, &state).is_empty());
    }

    #[test]
    fn test_successors_respect_topology() {
        let (topology, start) = english();
        let mut layer = vec![start];
        let mut seen = FxHashSet::default();
        for _ in 0..3 {
            let mut next_layer = Vec::new();
            for state in &layer {
                for next in generate_moves(&topology, state) {
                    assert_eq!(next.len() + 1, state.len());
                    assert!(topology.admits(&next), "peg off the board in {next:?}");
                    if seen.insert(next) {
                        next_layer.push(next);
                    }
                }
            }
            layer = next_layer;
        }
        assert!(!layer.is_empty());
    }

    #[test]
    fn test_goal_requires_single_peg_on_target() {
        let (topology, _) = english();
        let space = PegSolitaire::new(Arc::new(topology), Goal::single(Cell::new(3, 3)));
        let on_target = State::from_cells(7, [Cell::new(3, 3)]).unwrap();
        let off_target = State::from_cells(7, [Cell::new(2, 3)]).unwrap();
        let two_pegs = State::from_cells(7, [Cell::new(3, 3), Cell::new(2, 3)]).unwrap();
        assert!(space.is_goal(&on_target));
        assert!(!space.is_goal(&off_target));
        assert!(!space.is_goal(&two_pegs));
    }

    #[test]
    fn test_from_raw_defaults_to_centre() {
        let (space, state) = PegSolitaire::from_raw(ENGLISH.cells, None).unwrap();
        assert_eq!(space.goal(), Goal::single(Cell::new(3, 3)));
        assert_eq!(state.len(), 32);
    }

    #[test]
    fn test_from_raw_rejects_off_board_target() {
        let err = PegSolitaire::from_raw(ENGLISH.cells, Some(Cell::new(0, 0))).unwrap_err();
        assert!(matches!(err, SolverError::InvalidBoardConfiguration { .. }));
        assert!(PegSolitaire::from_raw(ENGLISH.cells, Some(Cell::new(9, 3))).is_err());
    }

    #[test]
    fn test_engines_share_one_topology() {
        let (space, _) = PegSolitaire::from_definition(&COLUMN_ENDGAME, None).unwrap();
        let other = space.with_goal(Goal::single(Cell::new(2, 3)));
        assert!(Arc::ptr_eq(&space.shared_topology(), &other.shared_topology()));
        assert_eq!(other.goal().target, Cell::new(2, 3));
    }

    #[test]
    fn test_scheduler_aims_at_goal() {
        let (space, state) = PegSolitaire::from_definition(&COLUMN_ENDGAME, None).unwrap();
        let scheduler =
            space.scheduler(Algorithm::GreedyBestFirst, HeuristicKind::AverageDistance);
        assert_eq!(scheduler.algorithm(), Algorithm::GreedyBestFirst);
        assert_eq!(scheduler.priority(&state, 0), 1.0);
    }
}
