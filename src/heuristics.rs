use crate::puzzle::{PuzzleState, CELLS, SIDE};

/// Heuristic used by the A* solver to estimate remaining slides.
///
/// Both variants are admissible, so the solver stays optimal with either one;
/// `Manhattan` dominates `MisplacedTiles` and expands far fewer nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Heuristic {
    #[default]
    Manhattan,
    MisplacedTiles,
}

impl Heuristic {
    /// Estimates the number of slides from `state` to `goal`.
    pub fn evaluate(self, state: &PuzzleState, goal: &PuzzleState) -> u32 {
        match self {
            Heuristic::Manhattan => manhattan(state, goal),
            Heuristic::MisplacedTiles => misplaced_tiles(state, goal),
        }
    }
}

/// Sum of grid distances between each tile and its cell in `goal`.
///
/// The blank is not counted. Every slide moves one tile by one cell, so the
/// sum never overestimates (admissible) and changes by exactly one per slide
/// (consistent).
///
/// # Examples
/// ```
/// use ai_search::heuristics::manhattan;
/// use ai_search::puzzle::PuzzleState;
///
/// let goal = PuzzleState::GOAL;
/// assert_eq!(manhattan(&goal, &goal), 0);
/// let s = PuzzleState::new([8, 1, 3, 4, 0, 2, 7, 6, 5]).unwrap();
/// assert_eq!(manhattan(&s, &goal), 10);
/// ```
pub fn manhattan(state: &PuzzleState, goal: &PuzzleState) -> u32 {
    let mut home = [0usize; CELLS];
    for (idx, &tile) in goal.tiles().iter().enumerate() {
        home[tile as usize] = idx;
    }

    state
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(_, &tile)| tile != 0)
        .map(|(idx, &tile)| {
            let target = home[tile as usize];
            let (row, col) = (idx / SIDE, idx % SIDE);
            let (goal_row, goal_col) = (target / SIDE, target % SIDE);
            (row.abs_diff(goal_row) + col.abs_diff(goal_col)) as u32
        })
        .sum()
}

/// Number of non-blank tiles outside their cell in `goal`.
pub fn misplaced_tiles(state: &PuzzleState, goal: &PuzzleState) -> u32 {
    state
        .tiles()
        .iter()
        .zip(goal.tiles())
        .filter(|&(&tile, &target)| tile != 0 && tile != target)
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOAL: PuzzleState = PuzzleState::GOAL;

    fn state(tiles: [u8; CELLS]) -> PuzzleState {
        PuzzleState::new(tiles).unwrap()
    }

    #[test]
    fn test_manhattan_goal_is_zero() {
        assert_eq!(manhattan(&GOAL, &GOAL), 0);
        assert_eq!(misplaced_tiles(&GOAL, &GOAL), 0);
    }

    #[test]
    fn test_manhattan_one_slide_away() {
        let s = state([1, 2, 3, 4, 5, 6, 7, 0, 8]);
        assert_eq!(manhattan(&s, &GOAL), 1);
        assert_eq!(misplaced_tiles(&s, &GOAL), 1);
    }

    #[test]
    fn test_manhattan_known_values() {
        // Reversed board: every tile far from home.
        let s = state([8, 7, 6, 5, 4, 3, 2, 1, 0]);
        // 8:(0,0)->(2,1)=3, 7:(0,1)->(2,0)=3, 6:(0,2)->(1,2)=1, 5:(1,0)->(1,1)=1,
        // 4:(1,1)->(1,0)=1, 3:(1,2)->(0,2)=1, 2:(2,0)->(0,1)=3, 1:(2,1)->(0,0)=3
        assert_eq!(manhattan(&s, &GOAL), 16);
        assert_eq!(misplaced_tiles(&s, &GOAL), 8);
    }

    #[test]
    fn test_heuristics_zero_only_at_goal() {
        for seed in 0..200 {
            let s = PuzzleState::random_solvable(seed);
            if s.is_goal() {
                continue;
            }
            assert!(manhattan(&s, &GOAL) > 0, "{}", s);
            assert!(misplaced_tiles(&s, &GOAL) > 0, "{}", s);
        }
    }

    #[test]
    fn test_manhattan_dominates_misplaced() {
        for seed in 0..200 {
            let s = PuzzleState::random_solvable(seed);
            assert!(manhattan(&s, &GOAL) >= misplaced_tiles(&s, &GOAL));
        }
    }

    #[test]
    fn test_manhattan_consistent_across_slides() {
        for seed in 0..50 {
            let s = PuzzleState::random_solvable(seed);
            let h = manhattan(&s, &GOAL) as i64;
            for (_, next) in s.neighbors() {
                assert_eq!((manhattan(&next, &GOAL) as i64 - h).abs(), 1);
            }
        }
    }

    #[test]
    fn test_custom_goal_distances() {
        // Blank in the middle.
        let goal = state([1, 2, 3, 8, 0, 4, 7, 6, 5]);
        assert_eq!(manhattan(&goal, &goal), 0);
        assert_eq!(misplaced_tiles(&goal, &goal), 0);

        let s = state([2, 8, 3, 1, 6, 4, 7, 0, 5]);
        // 2:1, 8:2, 1:1, 6:1; 3, 4, 7, 5 at home.
        assert_eq!(manhattan(&s, &goal), 5);
        assert_eq!(misplaced_tiles(&s, &goal), 4);
    }

    #[test]
    fn test_distances_are_symmetric() {
        for seed in 0..50 {
            let a = PuzzleState::random_solvable(seed);
            let b = PuzzleState::random_solvable(seed + 1000);
            assert_eq!(manhattan(&a, &b), manhattan(&b, &a));
            assert_eq!(misplaced_tiles(&a, &b), misplaced_tiles(&b, &a));
        }
    }

    #[test]
    fn test_heuristic_enum_dispatch() {
        let s = state([1, 2, 3, 4, 5, 6, 0, 7, 8]);
        assert_eq!(Heuristic::default(), Heuristic::Manhattan);
        assert_eq!(Heuristic::Manhattan.evaluate(&s, &GOAL), 2);
        assert_eq!(Heuristic::MisplacedTiles.evaluate(&s, &GOAL), 2);
    }
}
