use ai_search::blocks::{execute_plan, BlocksWorld, Predicate, WorldState};
use ai_search::logging;
use ai_search::planner::{GoalStackPlanner, PlannerConfig, StepEvent};
use ai_search::utils::predicate_from_str;
use clap::Parser;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Goal-stack planner for the blocks world", long_about = None)]
struct Args {
    /// Block names, comma separated
    #[clap(long, value_delimiter = ',', default_value = "A,B,C")]
    blocks: Vec<String>,

    /// Initial fact, e.g. `ON(B,A)`; repeat for each fact
    #[clap(long = "init", value_parser = predicate_from_str)]
    init: Vec<Predicate>,

    /// Goal predicate; repeat for each goal
    #[clap(long = "goal", value_parser = predicate_from_str)]
    goal: Vec<Predicate>,

    /// Maximum number of stack pops
    #[clap(long, default_value_t = PlannerConfig::default().max_steps)]
    max_steps: usize,

    /// Maximum goal-stack depth
    #[clap(long, default_value_t = PlannerConfig::default().max_stack_depth)]
    max_depth: usize,

    /// Print every planner step
    #[clap(long)]
    trace: bool,

    /// Increase log verbosity (-v, -vv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn sample_initial() -> Vec<Predicate> {
    vec![
        Predicate::on_table("A"),
        Predicate::on("B", "A"),
        Predicate::on_table("C"),
        Predicate::clear("B"),
        Predicate::clear("C"),
        Predicate::ArmEmpty,
    ]
}

fn sample_goal() -> Vec<Predicate> {
    vec![
        Predicate::on("A", "B"),
        Predicate::on("B", "C"),
        Predicate::on_table("C"),
        Predicate::ArmEmpty,
    ]
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    let init = if args.init.is_empty() { sample_initial() } else { args.init };
    let goal = if args.goal.is_empty() { sample_goal() } else { args.goal };
    let initial: WorldState = init.into_iter().collect();

    println!("Initial state: {}", initial);
    println!(
        "Goal: {}\n",
        goal.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(", ")
    );

    let config = PlannerConfig {
        max_steps: args.max_steps,
        max_stack_depth: args.max_depth,
        ..PlannerConfig::default()
    };
    let mut planner =
        GoalStackPlanner::new(BlocksWorld::new(args.blocks), initial.clone(), &goal, config);

    if args.trace {
        loop {
            match planner.step() {
                Ok(StepEvent::Finished) => break,
                Ok(event) => println!("[{:>4}] {}", planner.steps(), event),
                Err(e) => {
                    eprintln!("Planning failed: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
        println!();
    }

    let plan = match planner.run() {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("Planning failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if plan.is_empty() {
        println!("Goal already satisfied, no actions needed.");
    } else {
        println!("Plan ({} steps, {} iterations):\n{}", plan.len(), plan.iterations, plan);
    }

    match execute_plan(&initial, &plan.steps) {
        Ok(final_state) if final_state.satisfies(&goal) => {
            println!("\nVerified. Final state: {}", final_state);
            ExitCode::SUCCESS
        }
        Ok(final_state) => {
            eprintln!("\nPlan replays but misses the goal. Final state: {}", final_state);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("\nPlan does not replay: {}", e);
            ExitCode::FAILURE
        }
    }
}
