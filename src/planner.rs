//! Goal-stack planner for the blocks world.
//!
//! The planner keeps one stack of pending work. Popping a conjunction pushes
//! its unmet members, popping a goal pushes an operator that achieves it, and
//! popping an operator either applies it or pushes its unmet preconditions.
//! Planning ends when the stack is empty.
//!
//! The operator-selection policy in [`BlocksWorld::choose_action`] is not
//! complete, so the loop is bounded: a step ceiling, a stack-depth ceiling, and
//! detection of a repeated (stack, world) configuration. Each of them ends
//! planning with a [`PlanError`]. Configurations are remembered as 64-bit
//! fingerprints, so memory stays linear in the number of steps.
use crate::blocks::{BlocksWorld, Operator, Predicate, WorldState};
use crate::error::PlanError;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::{debug, warn};

/// One element of the goal stack.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StackEntry {
    /// All of these predicates must hold at the same time.
    Conjunction(Vec<Predicate>),
    /// A single predicate that must hold.
    Goal(Predicate),
    /// An operator waiting for its preconditions.
    Operator(Operator),
}

impl fmt::Display for StackEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackEntry::Conjunction(goals) => {
                let goals: Vec<String> = goals.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", goals.join(", "))
            }
            StackEntry::Goal(goal) => write!(f, "{}", goal),
            StackEntry::Operator(op) => write!(f, "{}", op),
        }
    }
}

/// Bounds on a single planning run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Maximum number of stack pops before giving up.
    pub max_steps: usize,
    /// Maximum number of entries the stack may hold.
    pub max_stack_depth: usize,
    /// Fail as soon as a (stack, world) configuration repeats.
    pub detect_cycles: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            max_steps: 10_000,
            max_stack_depth: 1_000,
            detect_cycles: true,
        }
    }
}

/// What a single planner step did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepEvent {
    /// A conjunction was popped and every member already held.
    ConjunctionSatisfied,
    /// A conjunction was pushed back with its unmet members on top.
    SubgoalsPushed(Vec<Predicate>),
    /// A single goal was popped and already held.
    GoalSatisfied(Predicate),
    /// An operator was chosen for an unmet goal and pushed.
    OperatorChosen { goal: Predicate, operator: Operator },
    /// An operator was pushed back with its unmet preconditions on top.
    PreconditionsPushed {
        operator: Operator,
        missing: Vec<Predicate>,
    },
    /// An operator was applied to the world and appended to the plan.
    Applied(Operator),
    /// The stack is empty; planning is complete.
    Finished,
}

impl fmt::Display for StepEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(predicates: &[Predicate]) -> String {
            predicates
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        }
        match self {
            StepEvent::ConjunctionSatisfied => write!(f, "all goals in conjunction hold"),
            StepEvent::SubgoalsPushed(goals) => write!(f, "unsatisfied goals: {}", list(goals)),
            StepEvent::GoalSatisfied(goal) => write!(f, "goal {} already holds", goal),
            StepEvent::OperatorChosen { goal, operator } => {
                write!(f, "selecting {} for goal {}", operator, goal)
            }
            StepEvent::PreconditionsPushed { operator, missing } => {
                write!(f, "{} needs preconditions: {}", operator, list(missing))
            }
            StepEvent::Applied(op) => write!(f, "executing {}", op),
            StepEvent::Finished => write!(f, "goal stack empty"),
        }
    }
}

/// A finished plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    /// Operators in application order.
    pub steps: Vec<Operator>,
    /// World reached by applying `steps` to the initial state.
    pub final_state: WorldState,
    /// Stack pops the planner needed.
    pub iterations: usize,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for Plan {
    /// One numbered operator per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.steps.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}. {}", i + 1, op)?;
        }
        Ok(())
    }
}

/// Stack-based goal-regression planner.
///
/// Drive it one pop at a time with [`GoalStackPlanner::step`], or to
/// completion with [`GoalStackPlanner::run`].
///
/// # Examples
/// ```
/// use ai_search::blocks::{BlocksWorld, Operator, Predicate, WorldState};
/// use ai_search::planner::{GoalStackPlanner, PlannerConfig};
///
/// let initial: WorldState = [
///     Predicate::on_table("A"),
///     Predicate::clear("A"),
///     Predicate::ArmEmpty,
/// ]
/// .into_iter()
/// .collect();
/// let planner = GoalStackPlanner::new(
///     BlocksWorld::new(["A"]),
///     initial,
///     &[Predicate::holding("A")],
///     PlannerConfig::default(),
/// );
/// let plan = planner.run().unwrap();
/// assert_eq!(plan.steps, vec![Operator::pickup("A")]);
/// ```
#[derive(Clone, Debug)]
pub struct GoalStackPlanner {
    domain: BlocksWorld,
    config: PlannerConfig,
    state: WorldState,
    stack: Vec<StackEntry>,
    plan: Vec<Operator>,
    steps: usize,
    seen: HashSet<u64>,
}

impl GoalStackPlanner {
    /// Sets up a run whose stack holds one conjunction of `goals`.
    ///
    /// Repeated goals are dropped; the remaining order is kept and decides
    /// which unmet goal is attacked first (the last one).
    pub fn new(
        domain: BlocksWorld,
        initial: WorldState,
        goals: &[Predicate],
        config: PlannerConfig,
    ) -> Self {
        let mut unique: Vec<Predicate> = Vec::with_capacity(goals.len());
        for goal in goals {
            if !unique.contains(goal) {
                unique.push(goal.clone());
            }
        }

        GoalStackPlanner {
            domain,
            config,
            state: initial,
            stack: vec![StackEntry::Conjunction(unique)],
            plan: Vec::new(),
            steps: 0,
            seen: HashSet::new(),
        }
    }

    /// Current world state.
    pub fn state(&self) -> &WorldState {
        &self.state
    }

    /// Pending entries, bottom first.
    pub fn stack(&self) -> &[StackEntry] {
        &self.stack
    }

    /// Operators applied so far.
    pub fn plan(&self) -> &[Operator] {
        &self.plan
    }

    /// Stack pops performed so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn is_finished(&self) -> bool {
        self.stack.is_empty()
    }

    /// Pops and processes the top of the stack.
    ///
    /// Returns `Ok(StepEvent::Finished)` once the stack is empty; further calls
    /// keep returning it.
    pub fn step(&mut self) -> Result<StepEvent, PlanError> {
        if self.stack.is_empty() {
            return Ok(StepEvent::Finished);
        }
        if self.steps >= self.config.max_steps {
            return Err(PlanError::StepLimitExceeded {
                limit: self.config.max_steps,
            });
        }
        if self.config.detect_cycles && !self.seen.insert(self.fingerprint()) {
            return Err(PlanError::CycleDetected { step: self.steps });
        }

        let Some(top) = self.stack.pop() else {
            return Ok(StepEvent::Finished);
        };
        self.steps += 1;

        let event = match top {
            StackEntry::Operator(operator) => {
                let missing = operator.missing_preconditions(&self.state);
                if missing.is_empty() {
                    self.state.apply(&operator);
                    self.plan.push(operator.clone());
                    StepEvent::Applied(operator)
                } else {
                    self.stack.push(StackEntry::Operator(operator.clone()));
                    self.stack.extend(missing.iter().cloned().map(StackEntry::Goal));
                    StepEvent::PreconditionsPushed { operator, missing }
                }
            }
            StackEntry::Conjunction(goals) => {
                let unsatisfied = self.state.missing(&goals);
                if unsatisfied.is_empty() {
                    StepEvent::ConjunctionSatisfied
                } else {
                    self.stack.push(StackEntry::Conjunction(goals));
                    self.stack.extend(unsatisfied.iter().cloned().map(StackEntry::Goal));
                    StepEvent::SubgoalsPushed(unsatisfied)
                }
            }
            StackEntry::Goal(goal) => {
                if self.state.holds(&goal) {
                    StepEvent::GoalSatisfied(goal)
                } else {
                    let operator = self
                        .domain
                        .choose_action(&goal, &self.state)
                        .ok_or_else(|| PlanError::NoOperator { goal: goal.clone() })?;
                    self.stack.push(StackEntry::Operator(operator.clone()));
                    StepEvent::OperatorChosen { goal, operator }
                }
            }
        };

        debug!(step = self.steps, depth = self.stack.len(), event = %event, "planner step");

        if self.stack.len() > self.config.max_stack_depth {
            return Err(PlanError::StackDepthExceeded {
                limit: self.config.max_stack_depth,
                step: self.steps,
            });
        }
        Ok(event)
    }

    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.stack.hash(&mut hasher);
        self.state.hash(&mut hasher);
        hasher.finish()
    }

    /// Runs until the stack empties or a bound is hit.
    pub fn run(mut self) -> Result<Plan, PlanError> {
        loop {
            match self.step() {
                Ok(StepEvent::Finished) => break,
                Ok(_) => {}
                Err(err) => {
                    warn!(steps = self.steps, error = %err, "planning failed");
                    return Err(err);
                }
            }
        }

        debug!(
            operators = self.plan.len(),
            iterations = self.steps,
            "plan found"
        );
        Ok(Plan {
            steps: self.plan,
            final_state: self.state,
            iterations: self.steps,
        })
    }
}

/// Plans with the default bounds.
///
/// `blocks` fixes the order in which the selection policy considers blocks.
///
/// # Examples
/// ```
/// use ai_search::blocks::Predicate;
/// use ai_search::plan_blocks_world;
///
/// let initial = [
///     Predicate::on_table("A"),
///     Predicate::on("B", "A"),
///     Predicate::clear("B"),
///     Predicate::ArmEmpty,
/// ];
/// let plan = plan_blocks_world(&initial, &[Predicate::clear("A")], &["A", "B"]).unwrap();
/// assert_eq!(plan.steps[0].to_string(), "UNSTACK(B,A)");
/// ```
pub fn plan_blocks_world(
    initial: &[Predicate],
    goals: &[Predicate],
    blocks: &[&str],
) -> Result<Plan, PlanError> {
    GoalStackPlanner::new(
        BlocksWorld::new(blocks.iter().copied()),
        initial.iter().cloned().collect(),
        goals,
        PlannerConfig::default(),
    )
    .run()
}
