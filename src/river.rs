//! Missionaries and cannibals.
//!
//! Everyone starts on the left bank with the boat. The boat carries one or two
//! people per crossing, and cannibals may never outnumber missionaries on a
//! bank where missionaries are present. Solved with the generic A* engine.
use crate::search::{AStarSearch, SearchOutcome, SearchProblem};
use std::fmt;

/// People the boat carries per crossing.
pub const BOAT_CAPACITY: u8 = 2;

/// Which bank the boat is moored at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bank {
    Left,
    Right,
}

impl Bank {
    pub fn opposite(self) -> Self {
        match self {
            Bank::Left => Bank::Right,
            Bank::Right => Bank::Left,
        }
    }
}

/// People still on the left bank plus the boat's position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RiverState {
    pub missionaries: u8,
    pub cannibals: u8,
    pub boat: Bank,
}

impl fmt::Display for RiverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let boat = match self.boat {
            Bank::Left => "left",
            Bank::Right => "right",
        };
        write!(f, "({}M, {}C, boat {})", self.missionaries, self.cannibals, boat)
    }
}

/// One boat trip, from the boat's current bank to the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Crossing {
    pub missionaries: u8,
    pub cannibals: u8,
    pub to: Bank,
}

impl fmt::Display for Crossing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self.to {
            Bank::Right => "->",
            Bank::Left => "<-",
        };
        write!(f, "{}M {}C {}", self.missionaries, self.cannibals, arrow)
    }
}

/// Boat loads tried from every state, in this order.
const LOADS: [(u8, u8); 5] = [(1, 0), (2, 0), (0, 1), (0, 2), (1, 1)];

/// A river-crossing instance with `missionaries` and `cannibals` people.
///
/// # Examples
/// ```
/// use ai_search::river::RiverCrossing;
///
/// let solution = RiverCrossing::classic().solve().into_solution().unwrap();
/// assert_eq!(solution.len(), 11);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RiverCrossing {
    missionaries: u8,
    cannibals: u8,
}

impl RiverCrossing {
    pub fn new(missionaries: u8, cannibals: u8) -> Self {
        RiverCrossing {
            missionaries,
            cannibals,
        }
    }

    /// Three missionaries and three cannibals.
    pub fn classic() -> Self {
        Self::new(3, 3)
    }

    pub fn start(&self) -> RiverState {
        RiverState {
            missionaries: self.missionaries,
            cannibals: self.cannibals,
            boat: Bank::Left,
        }
    }

    /// Checks both banks: nobody is eaten and the counts fit.
    pub fn is_safe(&self, state: &RiverState) -> bool {
        if state.missionaries > self.missionaries || state.cannibals > self.cannibals {
            return false;
        }
        let right_m = self.missionaries - state.missionaries;
        let right_c = self.cannibals - state.cannibals;
        let left_ok = state.missionaries == 0 || state.cannibals <= state.missionaries;
        let right_ok = right_m == 0 || right_c <= right_m;
        left_ok && right_ok
    }

    pub fn search(&self) -> AStarSearch<RiverCrossing> {
        AStarSearch::new(*self, self.start())
    }

    pub fn solve(&self) -> SearchOutcome<RiverState, Crossing> {
        self.search().run()
    }
}

impl SearchProblem for RiverCrossing {
    type State = RiverState;
    type Action = Crossing;

    fn is_goal(&self, state: &RiverState) -> bool {
        state.missionaries == 0 && state.cannibals == 0 && state.boat == Bank::Right
    }

    fn successors(&self, state: &RiverState) -> Vec<(Crossing, RiverState)> {
        LOADS
            .iter()
            .filter_map(|&(m, c)| {
                let (missionaries, cannibals) = match state.boat {
                    Bank::Left => (
                        state.missionaries.checked_sub(m)?,
                        state.cannibals.checked_sub(c)?,
                    ),
                    Bank::Right => (state.missionaries + m, state.cannibals + c),
                };
                let next = RiverState {
                    missionaries,
                    cannibals,
                    boat: state.boat.opposite(),
                };
                let crossing = Crossing {
                    missionaries: m,
                    cannibals: c,
                    to: next.boat,
                };
                self.is_safe(&next).then_some((crossing, next))
            })
            .collect()
    }

    /// Fewest crossings that could empty the left bank.
    ///
    /// Each round trip nets at most `BOAT_CAPACITY - 1` people, and the final
    /// trip carries a full boat.
    fn heuristic(&self, state: &RiverState) -> u32 {
        let left = u32::from(state.missionaries) + u32::from(state.cannibals);
        if left == 0 {
            return 0;
        }
        let net = u32::from(BOAT_CAPACITY) - 1;
        match state.boat {
            Bank::Left => 2 * (left - 1).div_ceil(net).max(1) - 1,
            Bank::Right => 2 * left.div_ceil(net).max(1),
        }
    }
}
