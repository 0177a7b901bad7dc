//! Generic A* over unit-cost state spaces.
//!
//! A problem describes its states, the labelled moves between them, a goal
//! test and an admissible estimate of the remaining moves. [`AStarSearch`]
//! drives the search one expansion at a time so callers can watch the open
//! list evolve, or runs it to completion.
//!
//! The frontier is a `BinaryHeap` that may hold several entries for the same
//! state at different costs. A cheaper rediscovery pushes a fresh entry
//! instead of decreasing a key in place, and entries whose `g` exceeds the best
//! recorded cost are skipped when popped.
use std::cmp::{Ordering, Reverse};
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;
use std::hash::Hash;
use tracing::{debug, trace};

/// A unit-cost search problem.
pub trait SearchProblem {
    type State: Clone + Eq + Hash + fmt::Debug;
    type Action: Clone + fmt::Debug;

    fn is_goal(&self, state: &Self::State) -> bool;

    /// Legal moves out of `state`, each costing one.
    ///
    /// The order is part of the contract: among entries with equal `f` and
    /// `g`, earlier successors are expanded first.
    fn successors(&self, state: &Self::State) -> Vec<(Self::Action, Self::State)>;

    /// Lower bound on the moves left from `state`. Must be admissible for the
    /// returned solutions to be optimal.
    fn heuristic(&self, state: &Self::State) -> u32;
}

/// Counters collected during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States popped and expanded (stale entries excluded).
    pub expanded: usize,
    /// Frontier pushes, the start state included.
    pub generated: usize,
    /// Popped entries discarded because a cheaper path was already recorded.
    pub stale_skipped: usize,
    /// Largest frontier size observed.
    pub frontier_high_water: usize,
}

/// An optimal solution found by the search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution<S, A> {
    /// States from the start to the goal, both included.
    pub path: Vec<S>,
    /// Moves between consecutive states of `path`.
    pub moves: Vec<A>,
    pub stats: SearchStats,
}

impl<S, A> Solution<S, A> {
    /// Number of moves in the solution.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// `true` when the start state was already a goal.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Result of a completed search.
///
/// Running out of frontier is an expected outcome, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome<S, A> {
    Solved(Solution<S, A>),
    Unsolvable(SearchStats),
}

impl<S, A> SearchOutcome<S, A> {
    pub fn solution(&self) -> Option<&Solution<S, A>> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            SearchOutcome::Unsolvable(_) => None,
        }
    }

    pub fn into_solution(self) -> Option<Solution<S, A>> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            SearchOutcome::Unsolvable(_) => None,
        }
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            SearchOutcome::Solved(solution) => &solution.stats,
            SearchOutcome::Unsolvable(stats) => stats,
        }
    }
}

/// What a single call to [`AStarSearch::step`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchStep<S, A> {
    /// `state` was expanded and `pushed` successors entered the open list.
    Expanded {
        state: S,
        g: u32,
        h: u32,
        pushed: usize,
    },
    /// A popped entry was older than the best known path to its state.
    SkippedStale { state: S, g: u32 },
    /// The search is over; further calls return the same outcome.
    Finished(SearchOutcome<S, A>),
}

/// One live entry of the open list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenEntry<S> {
    pub state: S,
    pub f: u32,
    pub g: u32,
    pub h: u32,
}

/// Frontier ordering key: ascending `f`, then `g`, then insertion order.
///
/// `seq` is unique per push, so two entries never compare equal and the state
/// never takes part in the ordering.
#[derive(Debug)]
struct FrontierEntry<S> {
    f: u32,
    g: u32,
    h: u32,
    seq: u64,
    state: S,
}

impl<S> FrontierEntry<S> {
    fn key(&self) -> (u32, u32, u64) {
        (self.f, self.g, self.seq)
    }
}

impl<S> PartialEq for FrontierEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<S> Eq for FrontierEntry<S> {}

impl<S> PartialOrd for FrontierEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for FrontierEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// An A* run in progress.
///
/// # Examples
/// ```
/// use ai_search::puzzle::PuzzleState;
/// use ai_search::search::{AStarSearch, SearchStep};
/// use ai_search::solver::SlidingPuzzle;
///
/// let start = PuzzleState::new([1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
/// let mut search = AStarSearch::new(SlidingPuzzle::default(), start);
/// assert_eq!(search.open_list().len(), 1);
///
/// assert!(matches!(search.step(), SearchStep::Expanded { pushed: 3, .. }));
/// assert_eq!(search.open_list()[0].state, PuzzleState::GOAL);
///
/// let SearchStep::Finished(outcome) = search.step() else { panic!() };
/// assert_eq!(outcome.solution().map(|s| s.len()), Some(1));
/// ```
#[derive(Debug)]
pub struct AStarSearch<P: SearchProblem> {
    problem: P,
    frontier: BinaryHeap<Reverse<FrontierEntry<P::State>>>,
    best_g: HashMap<P::State, u32>,
    parent: HashMap<P::State, Option<(P::State, P::Action)>>,
    seq: u64,
    stats: SearchStats,
    outcome: Option<SearchOutcome<P::State, P::Action>>,
}

impl<P: SearchProblem> AStarSearch<P> {
    /// Seeds the open list with `start` at cost zero.
    pub fn new(problem: P, start: P::State) -> Self {
        let mut search = AStarSearch {
            problem,
            frontier: BinaryHeap::new(),
            best_g: HashMap::new(),
            parent: HashMap::new(),
            seq: 0,
            stats: SearchStats::default(),
            outcome: None,
        };
        let h = search.problem.heuristic(&start);
        search.best_g.insert(start.clone(), 0);
        search.parent.insert(start.clone(), None);
        search.push(start, 0, h);
        search
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Live open-list entries in the order they would be popped.
    ///
    /// Entries superseded by a cheaper path to the same state are left out.
    pub fn open_list(&self) -> Vec<OpenEntry<P::State>> {
        let mut live: Vec<&FrontierEntry<P::State>> = self
            .frontier
            .iter()
            .map(|Reverse(entry)| entry)
            .filter(|entry| self.best_g.get(&entry.state).map_or(true, |&best| entry.g <= best))
            .collect();
        live.sort();
        live.into_iter()
            .map(|entry| OpenEntry {
                state: entry.state.clone(),
                f: entry.f,
                g: entry.g,
                h: entry.h,
            })
            .collect()
    }

    /// Pops the best open entry and processes it.
    pub fn step(&mut self) -> SearchStep<P::State, P::Action> {
        if let Some(outcome) = &self.outcome {
            return SearchStep::Finished(outcome.clone());
        }

        let Some(Reverse(FrontierEntry { f, g, h, state, .. })) = self.frontier.pop() else {
            debug!(
                expanded = self.stats.expanded,
                generated = self.stats.generated,
                "frontier exhausted, no path to goal"
            );
            return self.finish(SearchOutcome::Unsolvable(self.stats));
        };

        if self.problem.is_goal(&state) {
            let (path, moves) = self.reconstruct(state);
            debug!(
                moves = moves.len(),
                expanded = self.stats.expanded,
                generated = self.stats.generated,
                "goal reached"
            );
            return self.finish(SearchOutcome::Solved(Solution {
                path,
                moves,
                stats: self.stats,
            }));
        }

        if self.best_g.get(&state).map_or(false, |&best| g > best) {
            self.stats.stale_skipped += 1;
            return SearchStep::SkippedStale { state, g };
        }

        self.stats.expanded += 1;
        trace!(f, g, h, state = ?state, "expand");

        let next_g = g + 1;
        let mut pushed = 0;
        for (action, next) in self.problem.successors(&state) {
            let improved = match self.best_g.entry(next.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(next_g);
                    true
                }
                Entry::Occupied(mut slot) if next_g < *slot.get() => {
                    slot.insert(next_g);
                    true
                }
                Entry::Occupied(_) => false,
            };
            if !improved {
                continue;
            }

            let next_h = self.problem.heuristic(&next);
            self.parent.insert(next.clone(), Some((state.clone(), action)));
            self.push(next, next_g, next_h);
            pushed += 1;
        }

        SearchStep::Expanded { state, g, h, pushed }
    }

    /// Steps until the search finishes.
    pub fn run(mut self) -> SearchOutcome<P::State, P::Action> {
        loop {
            if let SearchStep::Finished(outcome) = self.step() {
                return outcome;
            }
        }
    }

    fn push(&mut self, state: P::State, g: u32, h: u32) {
        self.seq += 1;
        self.frontier.push(Reverse(FrontierEntry {
            f: g + h,
            g,
            h,
            seq: self.seq,
            state,
        }));
        self.stats.generated += 1;
        self.stats.frontier_high_water = self.stats.frontier_high_water.max(self.frontier.len());
    }

    fn finish(
        &mut self,
        outcome: SearchOutcome<P::State, P::Action>,
    ) -> SearchStep<P::State, P::Action> {
        self.outcome = Some(outcome.clone());
        SearchStep::Finished(outcome)
    }

    /// Follows predecessor links from `goal` back to the start, then reverses.
    fn reconstruct(&self, goal: P::State) -> (Vec<P::State>, Vec<P::Action>) {
        let mut moves = Vec::new();
        let mut path = vec![goal];

        while let Some(Some((prev, action))) = path.last().and_then(|s| self.parent.get(s)) {
            moves.push(action.clone());
            path.push(prev.clone());
        }

        path.reverse();
        moves.reverse();
        (path, moves)
    }
}
