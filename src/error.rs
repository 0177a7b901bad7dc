//! Error types shared by the puzzle solver, the blocks-world planner and the
//! text parsers in [`crate::utils`].

use crate::blocks::{Operator, Predicate};
use thiserror::Error;

/// A tile configuration that is not a permutation of `0..=8`.
///
/// Returned before any search work is done; heuristics are never computed on
/// malformed input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("expected 9 tiles, found {found}")]
    WrongLength { found: usize },
    #[error("tile {tile} is out of range (expected 0..=8)")]
    TileOutOfRange { tile: u8 },
    #[error("tile {tile} appears more than once")]
    DuplicateTile { tile: u8 },
    #[error("invalid tile token '{token}'")]
    InvalidToken { token: String },
}

/// Failure of the goal-stack planner, or of replaying a plan.
///
/// The bound variants (`StepLimitExceeded`, `StackDepthExceeded`,
/// `CycleDetected`) all mean "no plan found within bound": the planner cannot
/// tell a truly unreachable goal apart from a gap in its selection policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("no plan found within {limit} planner steps")]
    StepLimitExceeded { limit: usize },
    #[error("goal stack grew past {limit} entries at step {step}")]
    StackDepthExceeded { limit: usize, step: usize },
    #[error("planner revisited an earlier stack configuration at step {step}")]
    CycleDetected { step: usize },
    #[error("no operator achieves goal {goal}")]
    NoOperator { goal: Predicate },
    #[error("plan step {step} ({operator}) is missing preconditions: {}", display_list(.missing))]
    PreconditionsUnmet {
        step: usize,
        operator: Operator,
        missing: Vec<Predicate>,
    },
}

/// Malformed predicate text such as `ON(A)` or `FLY(B)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty predicate")]
    Empty,
    #[error("unknown relation '{name}'")]
    UnknownRelation { name: String },
    #[error("{name} takes {expected} argument(s), found {found}")]
    WrongArity {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("malformed predicate '{input}'")]
    Malformed { input: String },
}

fn display_list(predicates: &[Predicate]) -> String {
    predicates
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
