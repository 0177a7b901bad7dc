use ai_search::heuristics::Heuristic;
use ai_search::logging;
use ai_search::puzzle::PuzzleState;
use ai_search::search::{SearchOutcome, SearchStep};
use ai_search::solver::{AStarSolver, SolverConfig};
use ai_search::utils::puzzle_from_str;
use clap::Parser;
use std::process::ExitCode;

/// Open-list entries shown per step with --trace.
const OPEN_LIST_PREVIEW: usize = 5;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Solves the 8-puzzle with A*", long_about = None)]
struct Args {
    /// Start configuration, e.g. `123456078` or `1 2 3 4 5 6 0 7 8` (`_` for the blank)
    #[clap(required_unless_present = "random")]
    tiles: Vec<String>,

    /// Target configuration
    #[clap(long, value_parser = puzzle_from_str, default_value = "123456780")]
    goal: PuzzleState,

    /// Heuristic guiding the search
    #[clap(long, value_enum, default_value_t = Heuristic::Manhattan)]
    heuristic: Heuristic,

    /// Solve a random solvable configuration instead
    #[clap(long, conflicts_with = "tiles")]
    random: bool,

    /// Seed for --random
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Print every expansion with the head of the open list
    #[clap(long)]
    trace: bool,

    /// Increase log verbosity (-v, -vv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn compact(state: &PuzzleState) -> String {
    state.tiles().iter().map(|t| t.to_string()).collect()
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    let start = if args.random {
        PuzzleState::random_solvable(args.seed)
    } else {
        match puzzle_from_str(&args.tiles.join(" ")) {
            Ok(state) => state,
            Err(e) => {
                eprintln!("Invalid puzzle: {}", e);
                return ExitCode::FAILURE;
            }
        }
    };

    println!("Initial state:\n{}\n", start);
    println!("Goal state:\n{}\n", args.goal);
    if !start.can_reach(&args.goal) {
        println!("Parity differs from the goal; the search will exhaust the frontier.\n");
    }
    println!("Searching with {:?} heuristic...\n", args.heuristic);

    let solver = AStarSolver::new(SolverConfig {
        heuristic: args.heuristic,
        goal: args.goal,
    });
    let mut search = solver.search(&start);
    let outcome = loop {
        match search.step() {
            SearchStep::Finished(outcome) => break outcome,
            SearchStep::Expanded { state, g, h, pushed } if args.trace => {
                println!(
                    "Expand #{}: f={} (g={}, h={}), {} pushed\n{}",
                    search.stats().expanded,
                    g + h,
                    g,
                    h,
                    pushed,
                    state
                );
                for entry in search.open_list().iter().take(OPEN_LIST_PREVIEW) {
                    println!(
                        "  open {} f={} g={} h={}",
                        compact(&entry.state),
                        entry.f,
                        entry.g,
                        entry.h
                    );
                }
                println!();
            }
            _ => {}
        }
    };

    match outcome {
        SearchOutcome::Solved(solution) => {
            println!("Solution found in {} moves:\n", solution.len());
            for (i, (mv, state)) in solution.moves.iter().zip(&solution.path[1..]).enumerate() {
                println!("Step {}: {}\n{}\n", i + 1, mv, state);
            }
            println!(
                "Nodes expanded: {}, generated: {}",
                solution.stats.expanded, solution.stats.generated
            );
        }
        SearchOutcome::Unsolvable(stats) => {
            println!("No solution found (unsolvable configuration).");
            println!("Nodes expanded: {}", stats.expanded);
        }
    }
    ExitCode::SUCCESS
}
