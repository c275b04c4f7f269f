//! Peg Solitaire Search Library
//!
//! Informed state-space search (greedy best-first, uniform cost and A*)
//! over peg solitaire boards, with canonical duplicate detection and an
//! expansion bound so unsolvable boards always terminate.

pub mod board;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod heuristics;
pub mod path;
pub mod scheduler;
pub mod solver;
pub mod space;

use std::hash::Hash;

pub use board::{BoardTopology, Goal};
pub use error::SolverError;
pub use grid::State;
pub use heuristics::{Heuristic, HeuristicKind};
pub use scheduler::{Algorithm, PriorityScheduler};
pub use solver::{Interrupt, SearchConfig, SearchEngine, SearchReport, SearchStats, Termination};
pub use space::PegSolitaire;

/// An implicit graph the search engine can walk.
///
/// Nodes are states; edges are single legal moves. Any puzzle that can list
/// the successors of a state and recognise a goal can be searched.
pub trait StateSpace {
    /// Canonical state: equal states must compare and hash equal.
    type State: Clone + Eq + Hash;

    /// Every state reachable from `state` in one move. May contain duplicates.
    fn successors(&self, state: &Self::State) -> Vec<Self::State>;

    fn is_goal(&self, state: &Self::State) -> bool;
}
