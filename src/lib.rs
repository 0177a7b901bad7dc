//! # AI Search Library
//!
//! Two small classical AI reasoning engines:
//!
//! - a generic A* search, applied to the 3x3 sliding-tile puzzle (the
//!   "8-puzzle") and to missionaries and cannibals, which finds a
//!   minimum-length move sequence to a goal, and
//! - a goal-stack planner for the blocks world, which regresses a conjunctive
//!   goal into a sequence of STRIPS operators.
//!
//! It is used by four binaries:
//! - `puzzle_solver`: solves a configuration given on the command line.
//! - `blocks_planner`: plans for a blocks world given as predicates.
//! - `heuristic_evaluator`: compares A* heuristics on seeded random boards.
//! - `river_crossing`: solves missionaries and cannibals.
//!
//! ## Modules
//! - `search`: the generic A* engine (`AStarSearch`, `SearchProblem`) with a
//!   single-step API and open-list snapshots.
//! - `puzzle`: the board (`PuzzleState`), slides (`Move`), solvability and
//!   seeded scrambles.
//! - `heuristics`: Manhattan distance and misplaced-tile count.
//! - `solver`: the 8-puzzle as a search problem, `AStarSolver` and
//!   `solve_puzzle`.
//! - `river`: missionaries and cannibals as a search problem.
//! - `blocks`: predicates, world state, operators and the selection policy.
//! - `planner`: the goal-stack planner (`GoalStackPlanner`) and
//!   `plan_blocks_world`.
//! - `utils`: text parsers for boards and predicates.
//! - `error`: error types.
//! - `logging`: tracing subscriber setup for the binaries.

pub mod blocks;
pub mod error;
pub mod heuristics;
pub mod logging;
pub mod planner;
pub mod puzzle;
pub mod river;
pub mod search;
pub mod solver;
pub mod utils;

pub use error::{ParseError, PlanError, PuzzleError};
pub use planner::plan_blocks_world;
pub use solver::solve_puzzle;
