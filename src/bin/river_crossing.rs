use ai_search::logging;
use ai_search::river::RiverCrossing;
use ai_search::search::{SearchOutcome, SearchStep};
use clap::Parser;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Missionaries and cannibals solved with A*", long_about = None)]
struct Args {
    /// Missionaries starting on the left bank
    #[clap(short, long, default_value_t = 3)]
    missionaries: u8,

    /// Cannibals starting on the left bank
    #[clap(short, long, default_value_t = 3)]
    cannibals: u8,

    /// Print every expansion and the open list
    #[clap(long)]
    trace: bool,

    /// Increase log verbosity (-v, -vv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    let problem = RiverCrossing::new(args.missionaries, args.cannibals);
    println!("Start: {}\n", problem.start());

    let mut search = problem.search();
    let outcome = loop {
        match search.step() {
            SearchStep::Finished(outcome) => break outcome,
            SearchStep::Expanded { state, g, h, .. } if args.trace => {
                let open: Vec<String> = search
                    .open_list()
                    .iter()
                    .map(|entry| format!("{} f={}", entry.state, entry.f))
                    .collect();
                println!("Expand {} g={} h={}", state, g, h);
                println!("  open: [{}]", open.join(", "));
            }
            _ => {}
        }
    };

    match outcome {
        SearchOutcome::Solved(solution) => {
            println!("Solution in {} crossings:", solution.len());
            let steps = solution.moves.iter().zip(&solution.path[1..]);
            for (i, (crossing, state)) in steps.enumerate() {
                println!("  {:>2}. {:<9} {}", i + 1, crossing.to_string(), state);
            }
            println!("Nodes expanded: {}", solution.stats.expanded);
            ExitCode::SUCCESS
        }
        SearchOutcome::Unsolvable(stats) => {
            println!("No safe sequence of crossings exists.");
            println!("Nodes expanded: {}", stats.expanded);
            ExitCode::FAILURE
        }
    }
}
