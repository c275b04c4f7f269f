//! Best-first search engine.
//!
//! One loop serves greedy best-first, uniform cost and A*; only the
//! [`PriorityScheduler`] differs. Key points:
//! - Frontier entries are ordered by `(priority, insertion sequence)`, never
//!   by comparing states
//! - `FxHashSet` explored set, checked on pop before expansion
//! - Paths are parent-linked [`PathNode`] chains, reconstructed once
//! - An expansion bound, an optional wall-clock limit and an [`Interrupt`]
//!   flag guarantee termination

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rustc_hash::FxHashSet;
use serde::{Serialize, Serializer};
use tracing::{debug, info};

use crate::heuristics::Heuristic;
use crate::path::{reconstruct, Ancestry, PathNode};
use crate::scheduler::PriorityScheduler;
use crate::StateSpace;

/// Default expansion bound.
pub const DEFAULT_MAX_EXPANSIONS: u64 = 500_000;

/// The clock is read when `expansions & CLOCK_CHECK_MASK == 0`, i.e. every
/// 1024 pops.
const CLOCK_CHECK_MASK: u64 = 0x3FF;

/// Resource limits for one search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// The search stops with [`Termination::LimitExceeded`] once the counted
    /// expansions exceed this value.
    pub max_expansions: u64,
    /// Optional wall-clock budget.
    pub time_limit: Option<Duration>,
    /// Whether popping an already explored state counts toward
    /// `max_expansions`. Defaults to `true`.
    pub count_revisits: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_expansions: DEFAULT_MAX_EXPANSIONS,
            time_limit: None,
            count_revisits: true,
        }
    }
}

impl SearchConfig {
    pub fn with_max_expansions(mut self, max_expansions: u64) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    pub fn with_count_revisits(mut self, count_revisits: bool) -> Self {
        self.count_revisits = count_revisits;
        self
    }
}

/// Shared stop flag. Raising it makes a running search return
/// [`Termination::Cancelled`] at its next pop.
#[derive(Clone, Debug, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, AtomicOrdering::Relaxed);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(AtomicOrdering::Relaxed)
    }
}

/// Why a search stopped. All variants are ordinary outcomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// A goal state was expanded.
    GoalFound,
    /// The frontier ran empty: no goal is reachable.
    Exhausted,
    /// The expansion bound was exceeded before a goal was found.
    LimitExceeded,
    /// The wall-clock budget ran out.
    TimedOut,
    /// The [`Interrupt`] was raised.
    Cancelled,
}

impl Termination {
    pub const fn is_goal_found(self) -> bool {
        matches!(self, Termination::GoalFound)
    }
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Termination::GoalFound => "goal found",
            Termination::Exhausted => "no solution",
            Termination::LimitExceeded => "expansion limit exceeded",
            Termination::TimedOut => "time limit reached",
            Termination::Cancelled => "cancelled",
        };
        f.write_str(text)
    }
}

/// Lifecycle of a [`SearchEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchPhase {
    Initialized,
    Running,
    Finished(Termination),
}

/// Counters collected during one search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Frontier pops, including pops of already explored states.
    pub expansions: u64,
    /// States actually expanded (first pop of each state).
    pub distinct_expansions: u64,
    /// Pops discarded because the state was already explored.
    pub revisits: u64,
    /// Frontier pushes, including the initial state.
    pub pushes: u64,
    /// Largest frontier size observed.
    pub max_frontier: usize,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64() * 1_000.0)
}

/// Result of one search.
#[derive(Clone, Debug)]
pub struct SearchReport<T> {
    pub termination: Termination,
    /// States from the initial state to the goal, both included. Only set
    /// when the goal was found.
    pub path: Option<Vec<T>>,
    pub stats: SearchStats,
}

impl<T> SearchReport<T> {
    /// Number of moves on the solution path.
    pub fn move_count(&self) -> Option<usize> {
        self.path.as_ref().map(|path| path.len().saturating_sub(1))
    }

    pub fn goal_state(&self) -> Option<&T> {
        self.path.as_ref().and_then(|path| path.last())
    }
}

/// A frontier entry.
///
/// Ordering looks only at `(priority, seq)`; `state` is opaque payload.
struct FrontierEntry<T> {
    priority: f64,
    seq: u64,
    cost: u32,
    state: T,
    ancestry: Ancestry<T>,
}

impl<T> PartialEq for FrontierEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for FrontierEntry<T> {}

impl<T> PartialOrd for FrontierEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for FrontierEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse for lowest priority, then oldest entry
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Drives the frontier / explored-set loop over a [`StateSpace`].
///
/// The engine owns its frontier and explored set; the state space is only
/// borrowed, so several engines may share one board.
pub struct SearchEngine<'a, S: StateSpace, H> {
    space: &'a S,
    scheduler: PriorityScheduler<H>,
    config: SearchConfig,
    interrupt: Option<Interrupt>,
    frontier: BinaryHeap<FrontierEntry<S::State>>,
    explored: FxHashSet<S::State>,
    next_seq: u64,
    phase: SearchPhase,
    stats: SearchStats,
}

impl<'a, S, H> SearchEngine<'a, S, H>
where
    S: StateSpace,
    H: Heuristic<S::State>,
{
    pub fn new(space: &'a S, scheduler: PriorityScheduler<H>, config: SearchConfig) -> Self {
        Self {
            space,
            scheduler,
            config,
            interrupt: None,
            frontier: BinaryHeap::new(),
            explored: FxHashSet::default(),
            next_seq: 0,
            phase: SearchPhase::Initialized,
            stats: SearchStats::default(),
        }
    }

    /// Attaches a stop flag checked before every pop.
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = Some(interrupt);
        self
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Searches from `initial` until a goal is found or a limit stops it.
    ///
    /// Calling `run` again starts a fresh search; nothing carries over.
    pub fn run(&mut self, initial: S::State) -> SearchReport<S::State> {
        let started = Instant::now();
        self.frontier.clear();
        self.explored.clear();
        self.next_seq = 0;
        self.stats = SearchStats::default();
        self.phase = SearchPhase::Running;

        debug!(
            algorithm = %self.scheduler.algorithm(),
            max_expansions = self.config.max_expansions,
            "starting search"
        );

        let priority = self.scheduler.priority(&initial, 0);
        self.push(priority, 0, initial, None);

        let (termination, path) = self.search_loop(started);
        self.stats.elapsed = started.elapsed();
        self.phase = SearchPhase::Finished(termination);

        info!(
            algorithm = %self.scheduler.algorithm(),
            %termination,
            expansions = self.stats.expansions,
            distinct = self.stats.distinct_expansions,
            moves = path.as_ref().map(|p| p.len().saturating_sub(1)),
            elapsed_ms = self.stats.elapsed.as_millis() as u64,
            "search finished"
        );

        SearchReport {
            termination,
            path,
            stats: self.stats.clone(),
        }
    }

    fn search_loop(&mut self, started: Instant) -> (Termination, Option<Vec<S::State>>) {
        loop {
            if self.frontier.is_empty() {
                return (Termination::Exhausted, None);
            }
            if self.counted_expansions() > self.config.max_expansions {
                return (Termination::LimitExceeded, None);
            }
            if self.interrupt.as_ref().is_some_and(Interrupt::is_raised) {
                return (Termination::Cancelled, None);
            }
            if let Some(limit) = self.config.time_limit {
                if self.stats.expansions & CLOCK_CHECK_MASK == 0 && started.elapsed() >= limit {
                    return (Termination::TimedOut, None);
                }
            }

            let Some(FrontierEntry {
                cost,
                state,
                ancestry,
                ..
            }) = self.frontier.pop()
            else {
                return (Termination::Exhausted, None);
            };
            self.stats.expansions += 1;

            if self.explored.contains(&state) {
                self.stats.revisits += 1;
                continue;
            }
            self.explored.insert(state.clone());
            self.stats.distinct_expansions += 1;

            if self.space.is_goal(&state) {
                return (Termination::GoalFound, Some(reconstruct(&ancestry, state)));
            }

            let successors = self.space.successors(&state);
            let node = Some(PathNode::extend(&ancestry, state));
            let next_cost = cost + 1;
            for next in successors {
                if self.explored.contains(&next) {
                    continue;
                }
                let priority = self.scheduler.priority(&next, next_cost);
                self.push(priority, next_cost, next, node.clone());
            }
        }
    }

    #[inline]
    fn counted_expansions(&self) -> u64 {
        if self.config.count_revisits {
            self.stats.expansions
        } else {
            self.stats.distinct_expansions
        }
    }

    #[inline]
    fn push(&mut self, priority: f64, cost: u32, state: S::State, ancestry: Ancestry<S::State>) {
        self.frontier.push(FrontierEntry {
            priority,
            seq: self.next_seq,
            cost,
            state,
            ancestry,
        });
        self.next_seq += 1;
        self.stats.pushes += 1;
        self.stats.max_frontier = self.stats.max_frontier.max(self.frontier.len());
    }
}

/// Runs one search to completion with a fresh engine.
pub fn solve<S, H>(
    space: &S,
    scheduler: PriorityScheduler<H>,
    config: SearchConfig,
    initial: S::State,
) -> SearchReport<S::State>
where
    S: StateSpace,
    H: Heuristic<S::State>,
{
    SearchEngine::new(space, scheduler, config).run(initial)
}
