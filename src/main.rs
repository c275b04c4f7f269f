//! Peg Solitaire Solver
//!
//! Searches a peg solitaire board for a sequence of jumps that leaves a
//! single peg on the target hole, using greedy best-first, uniform cost or
//! A* search, and reports the path and search statistics.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use pegsearch::board::{self, BoardDefinition, BOARDS, COLUMN_ENDGAME, ENGLISH};
use pegsearch::geometry::Cell;
use pegsearch::grid::{format_path, format_state};
use pegsearch::scheduler::ALGORITHMS;
use pegsearch::solver::{self, SearchConfig, DEFAULT_MAX_EXPANSIONS};
use pegsearch::{Algorithm, HeuristicKind, PegSolitaire, SearchReport, State};

/// Solves peg solitaire boards with informed search.
#[derive(Parser)]
#[command(name = "pegsearch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Search one board with one algorithm.
    Solve(SolveArgs),
    /// Run every algorithm on the same board concurrently.
    Compare(CompareArgs),
    /// Print a board without searching.
    Show(BoardArgs),
}

#[derive(Args, Clone)]
struct BoardArgs {
    /// Built-in board: english or column.
    #[arg(long, default_value = "english", conflicts_with = "board_file")]
    board: String,
    /// Marker grid file: rows of -1 (off-board), 0 (empty hole), 1 (peg).
    #[arg(long)]
    board_file: Option<PathBuf>,
    /// Target hole as `row,col`; defaults to the board's own target or centre.
    #[arg(long, value_parser = parse_cell)]
    target: Option<Cell>,
}

#[derive(Args, Clone)]
struct LimitArgs {
    /// Stop once this many frontier pops have been exceeded.
    #[arg(long, default_value_t = DEFAULT_MAX_EXPANSIONS)]
    max_expansions: u64,
    /// Wall-clock budget in milliseconds.
    #[arg(long)]
    time_limit_ms: Option<u64>,
    /// Count only first-time expansions toward the limit.
    #[arg(long)]
    distinct_only: bool,
}

#[derive(Args)]
struct SolveArgs {
    #[command(flatten)]
    board: BoardArgs,
    #[command(flatten)]
    limits: LimitArgs,
    /// Search strategy: gbfs, ucs or astar.
    #[arg(long, short, default_value = "astar")]
    algorithm: Algorithm,
    /// Heuristic: count (pegs left minus one) or distance (mean distance to target).
    #[arg(long = "heuristic", short = 'H', default_value = "count")]
    heuristic: HeuristicKind,
    /// Print every board on the solution path.
    #[arg(long)]
    steps: bool,
    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CompareArgs {
    #[command(flatten)]
    board: BoardArgs,
    #[command(flatten)]
    limits: LimitArgs,
    /// Heuristic used by gbfs and astar.
    #[arg(long = "heuristic", short = 'H', default_value = "count")]
    heuristic: HeuristicKind,
}

/// Parses a `row,col` cell.
fn parse_cell(text: &str) -> Result<Cell, String> {
    let (row, col) = text
        .split_once(',')
        .ok_or_else(|| format!("`{text}` is not of the form row,col"))?;
    let row = row
        .trim()
        .parse()
        .map_err(|_| format!("bad row `{row}`"))?;
    let col = col
        .trim()
        .parse()
        .map_err(|_| format!("bad column `{col}`"))?;
    Ok(Cell::new(row, col))
}

impl BoardArgs {
    /// Loads the selected board. Returns a display name, the state space and
    /// the initial state.
    fn load(&self) -> Result<(String, PegSolitaire, State)> {
        match &self.board_file {
            Some(path) => {
                let raw = board::read_raw_grid(path)
                    .with_context(|| format!("failed to read board {}", path.display()))?;
                let (space, state) = PegSolitaire::from_raw(&raw, self.target)?;
                Ok((path.display().to_string(), space, state))
            }
            None => {
                let definition = board::builtin(&self.board).with_context(|| {
                    let names: Vec<&str> = BOARDS.iter().map(|b| b.name).collect();
                    format!(
                        "unknown board `{}` (available: {})",
                        self.board,
                        names.join(", ")
                    )
                })?;
                let (space, state) = PegSolitaire::from_definition(definition, self.target)?;
                Ok((definition.name.to_string(), space, state))
            }
        }
    }
}

impl LimitArgs {
    fn config(&self) -> SearchConfig {
        let mut config = SearchConfig::default()
            .with_max_expansions(self.max_expansions)
            .with_count_revisits(!self.distinct_only);
        if let Some(ms) = self.time_limit_ms {
            config = config.with_time_limit(Duration::from_millis(ms));
        }
        config
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Solve(args)) => run_solve(&args),
        Some(Command::Compare(args)) => run_compare(&args),
        Some(Command::Show(args)) => run_show(&args),
        None => run_demo(),
    }
}

/// Runs one search for `space` and returns the report.
fn search(
    space: &PegSolitaire,
    initial: State,
    algorithm: Algorithm,
    heuristic: HeuristicKind,
    config: SearchConfig,
) -> SearchReport<State> {
    let scheduler = space.scheduler(algorithm, heuristic);
    solver::solve(space, scheduler, config, initial)
}

/// The heuristic name, or `None` for a strategy that never reads it.
fn heuristic_label(algorithm: Algorithm, heuristic: HeuristicKind) -> Option<&'static str> {
    algorithm.uses_heuristic().then(|| heuristic.name())
}

fn print_summary(report: &SearchReport<State>) {
    println!("Result: {}", report.termination);
    if let Some(moves) = report.move_count() {
        println!("  - Path Length: {moves} moves");
    }
    println!(
        "  - Nodes Expanded: {} ({} distinct)",
        report.stats.expansions, report.stats.distinct_expansions
    );
    println!(
        "  - Time taken: {:.4} seconds",
        report.stats.elapsed.as_secs_f64()
    );
}

fn run_solve(args: &SolveArgs) -> Result<()> {
    let (name, space, initial) = args.board.load()?;
    let report = search(
        &space,
        initial,
        args.algorithm,
        args.heuristic,
        args.limits.config(),
    );

    if args.json {
        let value = serde_json::json!({
            "board": name,
            "algorithm": args.algorithm.name(),
            "heuristic": heuristic_label(args.algorithm, args.heuristic),
            "target": space.goal().target,
            "termination": report.termination,
            "moves": report.move_count(),
            "stats": report.stats,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!(
        "Board: {name} ({} pegs, target {})",
        initial.len(),
        space.goal().target
    );
    match heuristic_label(args.algorithm, args.heuristic) {
        Some(heuristic) => println!("Algorithm: {}, heuristic: {heuristic}", args.algorithm),
        None => println!("Algorithm: {}", args.algorithm),
    }
    print_summary(&report);

    if args.steps {
        if let Some(path) = &report.path {
            println!();
            print!("{}", format_path(space.topology(), path));
        }
    }
    Ok(())
}

fn run_compare(args: &CompareArgs) -> Result<()> {
    let (name, space, initial) = args.board.load()?;
    let config = args.limits.config();
    println!(
        "Board: {name} ({} pegs, target {}), heuristic: {}",
        initial.len(),
        space.goal().target,
        args.heuristic
    );

    // each thread owns its engine; the topology is shared through `space`
    let reports: Vec<(Algorithm, SearchReport<State>)> = thread::scope(|scope| {
        let handles: Vec<_> = ALGORITHMS
            .iter()
            .map(|&algorithm| {
                let space = space.clone();
                let config = config.clone();
                let heuristic = args.heuristic;
                scope.spawn(move || {
                    (
                        algorithm,
                        search(&space, initial, algorithm, heuristic, config),
                    )
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .map_err(|_| anyhow::anyhow!("search thread panicked"))
            })
            .collect::<Result<Vec<_>>>()
    })?;

    println!(
        "{:<10} {:<26} {:>6} {:>12} {:>12} {:>10}",
        "algorithm", "result", "moves", "expansions", "distinct", "ms"
    );
    for (algorithm, report) in &reports {
        let moves = report
            .move_count()
            .map_or_else(|| "-".to_string(), |m| m.to_string());
        println!(
            "{:<10} {:<26} {:>6} {:>12} {:>12} {:>10.1}",
            algorithm.name(),
            report.termination.to_string(),
            moves,
            report.stats.expansions,
            report.stats.distinct_expansions,
            report.stats.elapsed.as_secs_f64() * 1_000.0
        );
    }
    Ok(())
}

fn run_show(args: &BoardArgs) -> Result<()> {
    let (name, space, initial) = args.load()?;
    println!(
        "{name}: {} holes, {} pegs, target {}",
        space.topology().hole_count(),
        initial.len(),
        space.goal().target
    );
    print!("{}", format_state(space.topology(), &initial));
    Ok(())
}

/// Greedy search on the full English board, then A* on the column endgame.
fn run_demo() -> Result<()> {
    let runs: [(&BoardDefinition, Algorithm, HeuristicKind); 2] = [
        (
            &ENGLISH,
            Algorithm::GreedyBestFirst,
            HeuristicKind::AverageDistance,
        ),
        (
            &COLUMN_ENDGAME,
            Algorithm::AStar,
            HeuristicKind::RemainingCount,
        ),
    ];
    for (definition, algorithm, heuristic) in runs {
        let (space, initial) = PegSolitaire::from_definition(definition, None)?;
        println!(
            "Running {algorithm} with {heuristic} on the {} board ({} pegs)",
            definition.name,
            initial.len()
        );
        let report = search(
            &space,
            initial,
            algorithm,
            heuristic,
            SearchConfig::default(),
        );
        print_summary(&report);
        println!();
    }
    Ok(())
}
