//! Frontier priorities for the supported search strategies.
//!
//! The same scheduler computes the priority of the initial state and of
//! every successor, so a strategy can never mix formulas within one search.

use std::str::FromStr;

use crate::error::SolverError;
use crate::heuristics::Heuristic;

/// Search strategy. The set is closed: every variant is matched
/// exhaustively when computing priorities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Priority is the heuristic alone.
    GreedyBestFirst,
    /// Priority is the accumulated path cost alone.
    UniformCost,
    /// Priority is accumulated cost plus heuristic.
    AStar,
}

/// All strategies, in the order the `compare` command reports them.
pub const ALGORITHMS: [Algorithm; 3] = [
    Algorithm::GreedyBestFirst,
    Algorithm::UniformCost,
    Algorithm::AStar,
];

impl Algorithm {
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::GreedyBestFirst => "gbfs",
            Algorithm::UniformCost => "ucs",
            Algorithm::AStar => "astar",
        }
    }

    /// Whether the strategy reads the heuristic at all.
    pub const fn uses_heuristic(self) -> bool {
        match self {
            Algorithm::GreedyBestFirst | Algorithm::AStar => true,
            Algorithm::UniformCost => false,
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SolverError;

    /// Accepts the short names and the usual abbreviations (`GBFS`, `UCS`,
    /// `A*`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gbfs" | "greedy" | "greedy-best-first" => Ok(Algorithm::GreedyBestFirst),
            "ucs" | "uniform" | "uniform-cost" => Ok(Algorithm::UniformCost),
            "astar" | "a*" | "a-star" => Ok(Algorithm::AStar),
            _ => Err(SolverError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Computes the frontier priority of a state from its accumulated cost.
#[derive(Clone, Debug)]
pub struct PriorityScheduler<H> {
    algorithm: Algorithm,
    heuristic: H,
}

impl<H> PriorityScheduler<H> {
    pub fn new(algorithm: Algorithm, heuristic: H) -> Self {
        Self {
            algorithm,
            heuristic,
        }
    }

    /// Builds a scheduler from a strategy name.
    ///
    /// Unknown names fail with `UnsupportedAlgorithm` here, before any
    /// search starts.
    pub fn from_name(name: &str, heuristic: H) -> Result<Self, SolverError> {
        Ok(Self::new(name.parse()?, heuristic))
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn priority<T>(&self, state: &T, accumulated_cost: u32) -> f64
    where
        H: Heuristic<T>,
    {
        let cost = f64::from(accumulated_cost);
        match self.algorithm {
            Algorithm::GreedyBestFirst => self.heuristic.estimate(state),
            Algorithm::UniformCost => cost,
            Algorithm::AStar => cost + self.heuristic.estimate(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn halve(value: &u32) -> f64 {
        f64::from(*value) / 2.0
    }

    #[test]
    fn test_priority_formulas() {
        let greedy = PriorityScheduler::new(Algorithm::GreedyBestFirst, halve);
        let uniform = PriorityScheduler::new(Algorithm::UniformCost, halve);
        let astar = PriorityScheduler::new(Algorithm::AStar, halve);

        assert_eq!(greedy.priority(&10u32, 3), 5.0);
        assert_eq!(uniform.priority(&10u32, 3), 3.0);
        assert_eq!(astar.priority(&10u32, 3), 8.0);
    }

    #[test]
    fn test_uniform_cost_never_calls_heuristic() {
        let panicking = |_: &u32| -> f64 { panic!("heuristic evaluated") };
        let uniform = PriorityScheduler::new(Algorithm::UniformCost, panicking);
        assert_eq!(uniform.priority(&1u32, 7), 7.0);
    }

    #[test]
    fn test_only_uniform_cost_ignores_heuristic() {
        assert!(Algorithm::GreedyBestFirst.uses_heuristic());
        assert!(Algorithm::AStar.uses_heuristic());
        assert!(!Algorithm::UniformCost.uses_heuristic());
    }

    #[test]
    fn test_parse_algorithm_names() {
        assert_eq!("GBFS".parse::<Algorithm>().unwrap(), Algorithm::GreedyBestFirst);
        assert_eq!("ucs".parse::<Algorithm>().unwrap(), Algorithm::UniformCost);
        assert_eq!("A*".parse::<Algorithm>().unwrap(), Algorithm::AStar);
        for algorithm in ALGORITHMS {
            assert_eq!(algorithm.name().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn test_unknown_algorithm_fails_at_construction() {
        let result = PriorityScheduler::from_name("dfs", halve);
        assert!(matches!(
            result,
            Err(SolverError::UnsupportedAlgorithm(name)) if name == "dfs"
        ));
    }
}
