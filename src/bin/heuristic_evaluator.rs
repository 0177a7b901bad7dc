use ai_search::heuristics::Heuristic;
use ai_search::logging;
use ai_search::puzzle::PuzzleState;
use ai_search::solver::{AStarSolver, SolverConfig};
use clap::Parser;
use std::collections::HashMap;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compares A* heuristics on random 8-puzzles", long_about = None)]
struct Args {
    /// Number of random solvable boards to evaluate
    #[clap(long, default_value_t = 20)]
    boards: u64,

    /// Seed of the first board; board i uses seed + i
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Increase log verbosity (-v, -vv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

const HEURISTICS: [(&str, Heuristic); 2] = [
    ("Manhattan", Heuristic::Manhattan),
    ("Misplaced", Heuristic::MisplacedTiles),
];

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut expanded: HashMap<&str, Vec<usize>> = HashMap::new();

    println!("Starting heuristic evaluation for {} boards...", args.boards);

    for board_idx in 0..args.boards {
        let seed = args.seed + board_idx;
        let start = PuzzleState::random_solvable(seed);
        println!("\nBoard {} (Seed: {})", board_idx, seed);

        let mut lengths = Vec::with_capacity(HEURISTICS.len());
        for (name, heuristic) in HEURISTICS {
            let solver = AStarSolver::new(SolverConfig {
                heuristic,
                ..SolverConfig::default()
            });
            let solution = solver
                .solve(&start)
                .into_solution()
                .expect("random_solvable produced an unsolvable board");
            println!(
                "  Heuristic: {:<10} Length: {:<3} Expanded: {}",
                name,
                solution.len(),
                solution.stats.expanded
            );
            lengths.push(solution.len());
            expanded.entry(name).or_default().push(solution.stats.expanded);
        }

        assert!(
            lengths.windows(2).all(|w| w[0] == w[1]),
            "heuristics disagree on optimal length for seed {}: {:?}",
            seed,
            lengths
        );
    }

    println!("\n--- Average Nodes Expanded ---");
    for (name, _) in HEURISTICS {
        let Some(counts) = expanded.get(name) else {
            println!("{:<10}: no boards evaluated", name);
            continue;
        };
        let avg = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        println!("{:<10}: {:.1}", name, avg);
    }
}
