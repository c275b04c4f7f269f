//! Error types surfaced before a search starts.
//!
//! Search outcomes (no solution, limits) are not errors; see
//! [`crate::solver::Termination`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolverError {
    /// The raw grid is empty, ragged, too large or uses an unknown marker.
    #[error("invalid board configuration: {reason}")]
    InvalidBoardConfiguration { reason: String },
    /// The strategy selector does not name a known search algorithm.
    #[error("unsupported algorithm `{0}` (expected gbfs, ucs or astar)")]
    UnsupportedAlgorithm(String),
    /// The heuristic selector does not name a known heuristic.
    #[error("unsupported heuristic `{0}` (expected count or distance)")]
    UnsupportedHeuristic(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SolverError {
    pub(crate) fn invalid_board(reason: impl Into<String>) -> Self {
        SolverError::InvalidBoardConfiguration {
            reason: reason.into(),
        }
    }
}
