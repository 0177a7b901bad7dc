//! Sliding-tile puzzle state for the 3x3 board (the "8-puzzle").
//!
//! This module defines:
//! - `Move`: the direction the blank travels in a single slide.
//! - `PuzzleState`: an immutable, validated configuration of the nine cells,
//!   with adjacency (`neighbors`), solvability parity, and seeded scrambles.
use crate::error::PuzzleError;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Width (and height) of the board.
pub const SIDE: usize = 3;

/// Number of cells on the board, blank included.
pub const CELLS: usize = SIDE * SIDE;

/// A single slide, named by the direction the blank moves.
///
/// `Move::ALL` lists the moves in the order neighbors are generated:
/// up, down, left, right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All moves, in neighbor generation order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Returns the `(row, column)` offset applied to the blank.
    pub fn as_offset(self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    /// Returns the move that undoes this one.
    pub fn opposite(self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::Up => "UP",
            Move::Down => "DOWN",
            Move::Left => "LEFT",
            Move::Right => "RIGHT",
        };
        write!(f, "{}", s)
    }
}

/// An immutable 3x3 tile configuration.
///
/// Cell `i` sits at row `i / 3`, column `i % 3`. Tile `0` is the blank. Every
/// value of this type is a permutation of `0..=8`: the only ways to build one
/// are the validating constructors, the `GOAL` constant, and moves applied to
/// an existing state.
///
/// # Examples
/// ```
/// use ai_search::puzzle::PuzzleState;
///
/// let state = PuzzleState::new([1, 2, 3, 4, 5, 6, 0, 7, 8]).unwrap();
/// assert_eq!(state.blank_index(), 6);
/// assert!(!state.is_goal());
/// assert!(PuzzleState::new([1, 1, 2, 3, 4, 5, 6, 7, 8]).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PuzzleState {
    tiles: [u8; CELLS],
}

impl PuzzleState {
    /// The solved layout `123456780`.
    pub const GOAL: PuzzleState = PuzzleState {
        tiles: [1, 2, 3, 4, 5, 6, 7, 8, 0],
    };

    /// Builds a state after checking that `tiles` is a permutation of `0..=8`.
    ///
    /// # Returns
    /// * `Err(PuzzleError::TileOutOfRange)` if a tile is 9 or larger.
    /// * `Err(PuzzleError::DuplicateTile)` if a tile repeats (which also means
    ///   another one is missing).
    pub fn new(tiles: [u8; CELLS]) -> Result<Self, PuzzleError> {
        let mut seen = [false; CELLS];
        for &tile in &tiles {
            let idx = tile as usize;
            if idx >= CELLS {
                return Err(PuzzleError::TileOutOfRange { tile });
            }
            if seen[idx] {
                return Err(PuzzleError::DuplicateTile { tile });
            }
            seen[idx] = true;
        }
        Ok(PuzzleState { tiles })
    }

    /// Like [`PuzzleState::new`], but accepts a slice of any length and
    /// rejects anything other than nine tiles.
    pub fn from_slice(tiles: &[u8]) -> Result<Self, PuzzleError> {
        let tiles: [u8; CELLS] = tiles
            .try_into()
            .map_err(|_| PuzzleError::WrongLength { found: tiles.len() })?;
        Self::new(tiles)
    }

    /// Returns the tiles in row-major order.
    pub fn tiles(&self) -> &[u8; CELLS] {
        &self.tiles
    }

    /// Returns the tile at `(row, col)`.
    ///
    /// # Panics
    /// Panics if `row` or `col` is 3 or larger.
    pub fn tile(&self, row: usize, col: usize) -> u8 {
        assert!(row < SIDE && col < SIDE, "cell ({row}, {col}) is off the board");
        self.tiles[row * SIDE + col]
    }

    /// Index of the blank cell.
    pub fn blank_index(&self) -> usize {
        self.tiles
            .iter()
            .position(|&t| t == 0)
            .expect("a validated permutation always contains the blank")
    }

    pub fn is_goal(&self) -> bool {
        *self == Self::GOAL
    }

    /// Slides the blank one cell in direction `mv`.
    ///
    /// Returns `None` when the blank would leave the board.
    pub fn apply_move(&self, mv: Move) -> Option<Self> {
        let blank = self.blank_index();
        let (dr, dc) = mv.as_offset();
        let row = (blank / SIDE) as isize + dr;
        let col = (blank % SIDE) as isize + dc;

        if row < 0 || row >= SIDE as isize || col < 0 || col >= SIDE as isize {
            return None;
        }

        let target = row as usize * SIDE + col as usize;
        let mut tiles = self.tiles;
        tiles.swap(blank, target);
        Some(PuzzleState { tiles })
    }

    /// All states one slide away, each tagged with the move that produces it.
    ///
    /// The order is fixed (up, down, left, right, skipping moves that leave the
    /// board), so a blank in a corner yields 2 states, on an edge 3, and in the
    /// center 4.
    pub fn neighbors(&self) -> Vec<(Move, PuzzleState)> {
        Move::ALL
            .iter()
            .filter_map(|&mv| self.apply_move(mv).map(|next| (mv, next)))
            .collect()
    }

    /// Checks whether the goal is reachable from this state.
    ///
    /// On an odd-width board a slide never changes the parity of the number of
    /// inversions among the non-blank tiles, and the goal has zero inversions,
    /// so exactly the states with an even inversion count are solvable.
    pub fn is_solvable(&self) -> bool {
        self.can_reach(&Self::GOAL)
    }

    /// Checks whether `target` is reachable from this state.
    ///
    /// Two states are mutually reachable exactly when their inversion counts
    /// have the same parity.
    pub fn can_reach(&self, target: &PuzzleState) -> bool {
        self.count_inversions() % 2 == target.count_inversions() % 2
    }

    fn count_inversions(&self) -> usize {
        let tiles: Vec<u8> = self.tiles.iter().copied().filter(|&t| t != 0).collect();
        tiles
            .iter()
            .enumerate()
            .map(|(i, &val)| tiles[i + 1..].iter().filter(|&&next| next < val).count())
            .sum()
    }

    /// Returns a uniformly shuffled solvable state, reproducible from `seed`.
    pub fn random_solvable(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut tiles = Self::GOAL.tiles;
        loop {
            tiles.shuffle(&mut rng);
            let candidate = PuzzleState { tiles };
            if candidate.is_solvable() {
                return candidate;
            }
        }
    }

    /// Walks `moves` random slides away from the goal, never immediately
    /// undoing the previous slide.
    ///
    /// The result is always solvable and at most `moves` slides from the goal.
    pub fn scrambled(seed: u64, moves: usize) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut state = Self::GOAL;
        let mut last: Option<Move> = None;

        for _ in 0..moves {
            let options: Vec<(Move, PuzzleState)> = state
                .neighbors()
                .into_iter()
                .filter(|(mv, _)| last.map_or(true, |prev| *mv != prev.opposite()))
                .collect();
            let (mv, next) = options[rng.gen_range(0..options.len())];
            state = next;
            last = Some(mv);
        }
        state
    }
}

impl fmt::Display for PuzzleState {
    /// Three rows of space-separated tiles, `_` for the blank.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIDE {
            let cells: Vec<String> = (0..SIDE)
                .map(|col| match self.tile(row, col) {
                    0 => "_".to_string(),
                    t => t.to_string(),
                })
                .collect();
            write!(f, "{}", cells.join(" "))?;
            if row < SIDE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(tiles: [u8; CELLS]) -> PuzzleState {
        PuzzleState::new(tiles).unwrap()
    }

    fn swap_distance(a: &PuzzleState, b: &PuzzleState) -> usize {
        a.tiles().iter().zip(b.tiles()).filter(|(x, y)| x != y).count()
    }

    #[test]
    fn test_new_accepts_permutation() {
        let s = state([8, 7, 6, 5, 4, 3, 2, 1, 0]);
        assert_eq!(s.tile(0, 0), 8);
        assert_eq!(s.tile(2, 2), 0);
    }

    #[test]
    fn test_new_rejects_out_of_range_tile() {
        assert_eq!(
            PuzzleState::new([1, 2, 3, 4, 5, 6, 7, 9, 0]),
            Err(PuzzleError::TileOutOfRange { tile: 9 })
        );
    }

    #[test]
    fn test_new_rejects_duplicate_tile() {
        assert_eq!(
            PuzzleState::new([1, 2, 3, 4, 5, 6, 7, 7, 0]),
            Err(PuzzleError::DuplicateTile { tile: 7 })
        );
    }

    #[test]
    fn test_from_slice_rejects_wrong_length() {
        assert_eq!(
            PuzzleState::from_slice(&[1, 2, 3, 0]),
            Err(PuzzleError::WrongLength { found: 4 })
        );
        assert!(PuzzleState::from_slice(&[1, 2, 3, 4, 5, 6, 7, 8, 0, 0]).is_err());
        assert_eq!(
            PuzzleState::from_slice(&[1, 2, 3, 4, 5, 6, 7, 8, 0]),
            Ok(PuzzleState::GOAL)
        );
    }

    #[test]
    fn test_goal_constant() {
        assert!(PuzzleState::GOAL.is_goal());
        assert_eq!(PuzzleState::GOAL.blank_index(), 8);
        assert!(!state([1, 2, 3, 4, 5, 6, 7, 0, 8]).is_goal());
    }

    #[test]
    fn test_neighbors_count_by_blank_position() {
        // Corner, edge, center.
        assert_eq!(PuzzleState::GOAL.neighbors().len(), 2);
        assert_eq!(state([1, 2, 3, 4, 5, 0, 7, 8, 6]).neighbors().len(), 3);
        assert_eq!(state([1, 2, 3, 4, 0, 5, 7, 8, 6]).neighbors().len(), 4);

        for blank in 0..CELLS {
            let mut tiles = [0u8; CELLS];
            let mut next = 1;
            for (i, t) in tiles.iter_mut().enumerate() {
                if i != blank {
                    *t = next;
                    next += 1;
                }
            }
            let expected = match blank {
                4 => 4,
                0 | 2 | 6 | 8 => 2,
                _ => 3,
            };
            assert_eq!(state(tiles).neighbors().len(), expected, "blank at {}", blank);
        }
    }

    #[test]
    fn test_neighbors_order_up_down_left_right() {
        let center = state([1, 2, 3, 4, 0, 5, 7, 8, 6]);
        let moves: Vec<Move> = center.neighbors().into_iter().map(|(m, _)| m).collect();
        assert_eq!(moves, vec![Move::Up, Move::Down, Move::Left, Move::Right]);

        let neighbors = center.neighbors();
        assert_eq!(neighbors[0].1, state([1, 0, 3, 4, 2, 5, 7, 8, 6]));
        assert_eq!(neighbors[1].1, state([1, 2, 3, 4, 8, 5, 7, 0, 6]));
        assert_eq!(neighbors[2].1, state([1, 2, 3, 0, 4, 5, 7, 8, 6]));
        assert_eq!(neighbors[3].1, state([1, 2, 3, 4, 5, 0, 7, 8, 6]));

        let goal_moves: Vec<Move> = PuzzleState::GOAL
            .neighbors()
            .into_iter()
            .map(|(m, _)| m)
            .collect();
        assert_eq!(goal_moves, vec![Move::Up, Move::Left]);
    }

    #[test]
    fn test_neighbors_are_single_swaps() {
        for seed in 0..20 {
            let s = PuzzleState::random_solvable(seed);
            for (mv, next) in s.neighbors() {
                assert_eq!(swap_distance(&s, &next), 2);
                assert_eq!(next.apply_move(mv.opposite()), Some(s));
            }
        }
    }

    #[test]
    fn test_apply_move_off_board() {
        assert_eq!(PuzzleState::GOAL.apply_move(Move::Down), None);
        assert_eq!(PuzzleState::GOAL.apply_move(Move::Right), None);
        assert_eq!(
            PuzzleState::GOAL.apply_move(Move::Left),
            Some(state([1, 2, 3, 4, 5, 6, 7, 0, 8]))
        );
    }

    #[test]
    fn test_is_solvable_parity() {
        assert!(PuzzleState::GOAL.is_solvable());
        assert!(state([1, 2, 3, 4, 5, 6, 0, 7, 8]).is_solvable());
        // A single transposition of two tiles flips parity.
        assert!(!state([1, 2, 3, 4, 5, 6, 8, 7, 0]).is_solvable());
        assert!(!state([2, 1, 3, 4, 5, 6, 7, 8, 0]).is_solvable());
        // Blank position does not matter on an odd-width board.
        assert!(state([0, 1, 2, 3, 4, 5, 6, 7, 8]).is_solvable());
    }

    #[test]
    fn test_random_solvable_is_deterministic() {
        let a = PuzzleState::random_solvable(514514);
        let b = PuzzleState::random_solvable(514514);
        assert_eq!(a, b);
        assert!(a.is_solvable());

        let distinct: std::collections::HashSet<PuzzleState> =
            (0..10).map(PuzzleState::random_solvable).collect();
        assert!(distinct.len() > 1, "different seeds should give different boards");
    }

    #[test]
    fn test_scrambled_stays_solvable() {
        assert_eq!(PuzzleState::scrambled(1, 0), PuzzleState::GOAL);
        for seed in 0..10 {
            let s = PuzzleState::scrambled(seed, 25);
            assert!(s.is_solvable());
            assert_eq!(s, PuzzleState::scrambled(seed, 25));
        }
    }

    #[test]
    fn test_can_reach_is_symmetric_parity() {
        let even = state([1, 2, 3, 4, 5, 6, 0, 7, 8]);
        let odd = state([2, 1, 3, 4, 5, 6, 7, 8, 0]);
        assert!(even.can_reach(&PuzzleState::GOAL));
        assert!(PuzzleState::GOAL.can_reach(&even));
        assert!(!odd.can_reach(&PuzzleState::GOAL));
        assert!(odd.can_reach(&state([1, 2, 3, 4, 5, 6, 8, 7, 0])));
        assert!(odd.can_reach(&odd));
    }

    #[test]
    fn test_display_formatting() {
        let s = state([1, 2, 3, 4, 5, 6, 0, 7, 8]);
        assert_eq!(s.to_string(), "1 2 3\n4 5 6\n_ 7 8");
        assert_eq!(Move::Left.to_string(), "LEFT");
    }
}
