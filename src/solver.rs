//! A* over 8-puzzle states.
//!
//! [`SlidingPuzzle`] plugs the board into the generic [`crate::search`]
//! engine; [`AStarSolver`] is the convenience front end used by the binaries.
use crate::error::PuzzleError;
use crate::heuristics::Heuristic;
use crate::puzzle::{Move, PuzzleState};
use crate::search::{AStarSearch, SearchOutcome, SearchProblem, Solution};

/// Outcome of an 8-puzzle search.
pub type PuzzleOutcome = SearchOutcome<PuzzleState, Move>;

/// Optimal slide sequence for an 8-puzzle.
pub type PuzzleSolution = Solution<PuzzleState, Move>;

/// Tunables for [`AStarSolver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    pub heuristic: Heuristic,
    /// Target layout; heuristics measure distance to it.
    pub goal: PuzzleState,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            heuristic: Heuristic::default(),
            goal: PuzzleState::GOAL,
        }
    }
}

/// The 8-puzzle as a search problem: slide the blank until `goal` is reached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SlidingPuzzle {
    config: SolverConfig,
}

impl SlidingPuzzle {
    pub fn new(config: SolverConfig) -> Self {
        SlidingPuzzle { config }
    }
}

impl SearchProblem for SlidingPuzzle {
    type State = PuzzleState;
    type Action = Move;

    fn is_goal(&self, state: &PuzzleState) -> bool {
        *state == self.config.goal
    }

    fn successors(&self, state: &PuzzleState) -> Vec<(Move, PuzzleState)> {
        state.neighbors()
    }

    fn heuristic(&self, state: &PuzzleState) -> u32 {
        self.config.heuristic.evaluate(state, &self.config.goal)
    }
}

/// Best-first search driver for the 8-puzzle.
#[derive(Clone, Debug, Default)]
pub struct AStarSolver {
    config: SolverConfig,
}

impl AStarSolver {
    pub fn new(config: SolverConfig) -> Self {
        AStarSolver { config }
    }

    /// Starts a search from `start` that the caller drives step by step.
    pub fn search(&self, start: &PuzzleState) -> AStarSearch<SlidingPuzzle> {
        AStarSearch::new(SlidingPuzzle::new(self.config), *start)
    }

    /// Searches for a minimal-length slide sequence from `start` to the goal.
    ///
    /// Unsolvable starts are detected by exhausting the reachable space (at
    /// most 181 440 states), not by a parity pre-check.
    ///
    /// # Examples
    /// ```
    /// use ai_search::puzzle::PuzzleState;
    /// use ai_search::solver::AStarSolver;
    ///
    /// let start = PuzzleState::new([1, 2, 3, 4, 5, 6, 0, 7, 8]).unwrap();
    /// let outcome = AStarSolver::default().solve(&start);
    /// let solution = outcome.solution().unwrap();
    /// assert_eq!(solution.len(), 2);
    /// assert_eq!(solution.path.last(), Some(&PuzzleState::GOAL));
    /// ```
    pub fn solve(&self, start: &PuzzleState) -> PuzzleOutcome {
        self.search(start).run()
    }
}

/// Solves a configuration given as raw tiles with the default configuration.
///
/// # Returns
/// * `Err(PuzzleError)` if `tiles` is not a permutation of `0..=8`; no search
///   is attempted.
/// * `Ok(None)` if the goal is unreachable.
/// * `Ok(Some(path))` with the states from `tiles` to the goal, both included.
///
/// # Examples
/// ```
/// use ai_search::solve_puzzle;
///
/// let path = solve_puzzle(&[1, 2, 3, 4, 5, 6, 0, 7, 8]).unwrap().unwrap();
/// assert_eq!(path.len(), 3);
/// assert!(solve_puzzle(&[1, 2, 3]).is_err());
/// ```
pub fn solve_puzzle(tiles: &[u8]) -> Result<Option<Vec<PuzzleState>>, PuzzleError> {
    let start = PuzzleState::from_slice(tiles)?;
    Ok(AStarSolver::default()
        .solve(&start)
        .into_solution()
        .map(|solution| solution.path))
}
