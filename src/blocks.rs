//! Blocks-world planning domain.
//!
//! This module defines:
//! - `Predicate`: the five ground relations of the blocks world.
//! - `WorldState`: an ordered set of predicates describing one world.
//! - `Operator`: the four STRIPS operators PICKUP, PUTDOWN, UNSTACK and STACK.
//! - `BlocksWorld`: the block vocabulary and the policy that picks an operator
//!   to achieve an unmet goal.
use crate::error::PlanError;
use std::collections::BTreeSet;
use std::fmt;

/// Opaque block identifier such as `"A"`.
pub type Block = String;

/// A ground blocks-world relation.
///
/// Equality, hashing and ordering are structural (relation, then operands),
/// so a `BTreeSet<Predicate>` iterates in a stable order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Predicate {
    /// `ON(x,y)`: `x` sits directly on `y`.
    On(Block, Block),
    /// `ONTABLE(x)`: `x` sits on the table.
    OnTable(Block),
    /// `CLEAR(x)`: nothing is on `x`.
    Clear(Block),
    /// `HOLDING(x)`: the arm holds `x`.
    Holding(Block),
    /// `ARMEMPTY`: the arm holds nothing.
    ArmEmpty,
}

impl Predicate {
    pub fn on(x: impl Into<Block>, y: impl Into<Block>) -> Self {
        Predicate::On(x.into(), y.into())
    }

    pub fn on_table(x: impl Into<Block>) -> Self {
        Predicate::OnTable(x.into())
    }

    pub fn clear(x: impl Into<Block>) -> Self {
        Predicate::Clear(x.into())
    }

    pub fn holding(x: impl Into<Block>) -> Self {
        Predicate::Holding(x.into())
    }

    /// Relation name as written in plans: `ON`, `ONTABLE`, `CLEAR`, `HOLDING`
    /// or `ARMEMPTY`.
    pub fn name(&self) -> &'static str {
        match self {
            Predicate::On(..) => "ON",
            Predicate::OnTable(_) => "ONTABLE",
            Predicate::Clear(_) => "CLEAR",
            Predicate::Holding(_) => "HOLDING",
            Predicate::ArmEmpty => "ARMEMPTY",
        }
    }

    /// Operands in order; empty for `ARMEMPTY`.
    pub fn args(&self) -> Vec<&str> {
        match self {
            Predicate::On(x, y) => vec![x.as_str(), y.as_str()],
            Predicate::OnTable(x) | Predicate::Clear(x) | Predicate::Holding(x) => {
                vec![x.as_str()]
            }
            Predicate::ArmEmpty => Vec::new(),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_call(f, self.name(), &self.args())
    }
}

fn write_call(f: &mut fmt::Formatter<'_>, name: &str, args: &[&str]) -> fmt::Result {
    if args.is_empty() {
        write!(f, "{}", name)
    } else {
        write!(f, "{}({})", name, args.join(","))
    }
}

/// A set of predicates that currently hold.
///
/// Backed by a `BTreeSet`, so iteration (and therefore `Display` and any
/// output derived from it) is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct WorldState {
    facts: BTreeSet<Predicate>,
}

impl WorldState {
    pub fn new() -> Self {
        WorldState::default()
    }

    pub fn holds(&self, predicate: &Predicate) -> bool {
        self.facts.contains(predicate)
    }

    /// `true` if every predicate in `predicates` holds.
    pub fn satisfies<'a>(&self, predicates: impl IntoIterator<Item = &'a Predicate>) -> bool {
        predicates.into_iter().all(|p| self.holds(p))
    }

    /// Predicates from `predicates` that do not hold, in their original order.
    pub fn missing<'a>(
        &self,
        predicates: impl IntoIterator<Item = &'a Predicate>,
    ) -> Vec<Predicate> {
        predicates
            .into_iter()
            .filter(|p| !self.holds(p))
            .cloned()
            .collect()
    }

    /// Applies `operator`: delete-effects are removed, then add-effects added.
    ///
    /// Callers must check [`Operator::is_applicable`] first; applying an
    /// operator whose preconditions fail is an internal invariant violation.
    pub fn apply(&mut self, operator: &Operator) {
        debug_assert!(
            operator.is_applicable(self),
            "{} applied with unmet preconditions",
            operator
        );
        for p in operator.delete_effects() {
            self.facts.remove(p);
        }
        for p in operator.add_effects() {
            self.facts.insert(p.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Predicate> {
        self.facts.iter()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

impl FromIterator<Predicate> for WorldState {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        WorldState {
            facts: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for WorldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let facts: Vec<String> = self.facts.iter().map(ToString::to_string).collect();
        write!(f, "{{{}}}", facts.join(", "))
    }
}

/// The four blocks-world operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    PickUp,
    PutDown,
    Unstack,
    Stack,
}

impl OperatorKind {
    pub fn name(self) -> &'static str {
        match self {
            OperatorKind::PickUp => "PICKUP",
            OperatorKind::PutDown => "PUTDOWN",
            OperatorKind::Unstack => "UNSTACK",
            OperatorKind::Stack => "STACK",
        }
    }
}

/// A ground STRIPS operator.
///
/// Operators are immutable values: each constructor builds a fresh instance
/// from the operator template, so nothing shared is ever modified. Two
/// operators with the same kind and operands compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Operator {
    kind: OperatorKind,
    operands: Vec<Block>,
    preconditions: Vec<Predicate>,
    add: Vec<Predicate>,
    delete: Vec<Predicate>,
}

impl Operator {
    /// `PICKUP(x)`: lift a clear block off the table.
    pub fn pickup(x: impl Into<Block>) -> Self {
        let x = x.into();
        Operator {
            kind: OperatorKind::PickUp,
            preconditions: vec![
                Predicate::on_table(x.clone()),
                Predicate::clear(x.clone()),
                Predicate::ArmEmpty,
            ],
            add: vec![Predicate::holding(x.clone())],
            delete: vec![
                Predicate::on_table(x.clone()),
                Predicate::clear(x.clone()),
                Predicate::ArmEmpty,
            ],
            operands: vec![x],
        }
    }

    /// `PUTDOWN(x)`: place the held block on the table.
    pub fn putdown(x: impl Into<Block>) -> Self {
        let x = x.into();
        Operator {
            kind: OperatorKind::PutDown,
            preconditions: vec![Predicate::holding(x.clone())],
            add: vec![
                Predicate::on_table(x.clone()),
                Predicate::clear(x.clone()),
                Predicate::ArmEmpty,
            ],
            delete: vec![Predicate::holding(x.clone())],
            operands: vec![x],
        }
    }

    /// `UNSTACK(x,y)`: lift clear block `x` off block `y`.
    pub fn unstack(x: impl Into<Block>, y: impl Into<Block>) -> Self {
        let (x, y) = (x.into(), y.into());
        Operator {
            kind: OperatorKind::Unstack,
            preconditions: vec![
                Predicate::on(x.clone(), y.clone()),
                Predicate::clear(x.clone()),
                Predicate::ArmEmpty,
            ],
            add: vec![Predicate::holding(x.clone()), Predicate::clear(y.clone())],
            delete: vec![
                Predicate::on(x.clone(), y.clone()),
                Predicate::clear(x.clone()),
                Predicate::ArmEmpty,
            ],
            operands: vec![x, y],
        }
    }

    /// `STACK(x,y)`: place the held block `x` on clear block `y`.
    pub fn stack(x: impl Into<Block>, y: impl Into<Block>) -> Self {
        let (x, y) = (x.into(), y.into());
        Operator {
            kind: OperatorKind::Stack,
            preconditions: vec![Predicate::holding(x.clone()), Predicate::clear(y.clone())],
            add: vec![
                Predicate::on(x.clone(), y.clone()),
                Predicate::clear(x.clone()),
                Predicate::ArmEmpty,
            ],
            delete: vec![Predicate::holding(x.clone()), Predicate::clear(y.clone())],
            operands: vec![x, y],
        }
    }

    pub fn kind(&self) -> OperatorKind {
        self.kind
    }

    pub fn operands(&self) -> &[Block] {
        &self.operands
    }

    pub fn preconditions(&self) -> &[Predicate] {
        &self.preconditions
    }

    pub fn add_effects(&self) -> &[Predicate] {
        &self.add
    }

    pub fn delete_effects(&self) -> &[Predicate] {
        &self.delete
    }

    pub fn is_applicable(&self, state: &WorldState) -> bool {
        state.satisfies(&self.preconditions)
    }

    /// Preconditions that do not hold in `state`, in template order.
    pub fn missing_preconditions(&self, state: &WorldState) -> Vec<Predicate> {
        state.missing(&self.preconditions)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<&str> = self.operands.iter().map(String::as_str).collect();
        write_call(f, self.kind.name(), &args)
    }
}

/// Block vocabulary plus the operator-selection policy.
///
/// The block order matters: when several blocks could serve the policy, the
/// first one in this list wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlocksWorld {
    blocks: Vec<Block>,
}

impl BlocksWorld {
    pub fn new<I, S>(blocks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Block>,
    {
        BlocksWorld {
            blocks: blocks.into_iter().map(Into::into).collect(),
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Picks an operator whose add-effects achieve `goal` in `state`.
    ///
    /// - `ON(x,y)` → `STACK(x,y)`
    /// - `ONTABLE(x)` → `PUTDOWN(x)`
    /// - `CLEAR(x)` → `UNSTACK(b,x)` for the first `b` with `ON(b,x)`, else `PUTDOWN(x)`
    /// - `HOLDING(x)` → `PICKUP(x)` if `ONTABLE(x)`, else `UNSTACK(x,b)` for the
    ///   first `b` with `ON(x,b)`, else `PICKUP(x)`
    /// - `ARMEMPTY` → `PUTDOWN(b)` for the first held `b`, else `PUTDOWN` of the
    ///   first block
    ///
    /// The policy ignores goal interactions, so following it can undo goals
    /// that were already achieved. Returns `None` only for `ARMEMPTY` in a
    /// world with no blocks.
    ///
    /// # Examples
    /// ```
    /// use ai_search::blocks::{BlocksWorld, Operator, Predicate, WorldState};
    ///
    /// let world = BlocksWorld::new(["A", "B"]);
    /// let state: WorldState = [Predicate::on("B", "A"), Predicate::clear("B")]
    ///     .into_iter()
    ///     .collect();
    /// assert_eq!(
    ///     world.choose_action(&Predicate::clear("A"), &state),
    ///     Some(Operator::unstack("B", "A"))
    /// );
    /// ```
    pub fn choose_action(&self, goal: &Predicate, state: &WorldState) -> Option<Operator> {
        let action = match goal {
            Predicate::On(x, y) => Operator::stack(x.as_str(), y.as_str()),
            Predicate::OnTable(x) => Operator::putdown(x.as_str()),
            Predicate::Clear(x) => {
                match self.first_block(|b| state.holds(&Predicate::on(b, x.as_str()))) {
                    Some(b) => Operator::unstack(b, x.as_str()),
                    None => Operator::putdown(x.as_str()),
                }
            }
            Predicate::Holding(x) => {
                if state.holds(&Predicate::on_table(x.as_str())) {
                    Operator::pickup(x.as_str())
                } else {
                    match self.first_block(|b| state.holds(&Predicate::on(x.as_str(), b))) {
                        Some(b) => Operator::unstack(x.as_str(), b),
                        None => Operator::pickup(x.as_str()),
                    }
                }
            }
            Predicate::ArmEmpty => {
                match self.first_block(|b| state.holds(&Predicate::holding(b))) {
                    Some(b) => Operator::putdown(b),
                    None => Operator::putdown(self.blocks.first()?.as_str()),
                }
            }
        };
        Some(action)
    }

    fn first_block(&self, pred: impl Fn(&str) -> bool) -> Option<&str> {
        self.blocks.iter().map(String::as_str).find(|&b| pred(b))
    }
}

/// Replays `plan` from `initial`, checking every operator's preconditions at
/// the moment it is applied.
///
/// # Returns
/// * `Ok(final_state)` if every step was applicable.
/// * `Err(PlanError::PreconditionsUnmet)` for the first step (0-based) whose
///   preconditions fail.
pub fn execute_plan(initial: &WorldState, plan: &[Operator]) -> Result<WorldState, PlanError> {
    let mut state = initial.clone();
    for (step, operator) in plan.iter().enumerate() {
        let missing = operator.missing_preconditions(&state);
        if !missing.is_empty() {
            return Err(PlanError::PreconditionsUnmet {
                step,
                operator: operator.clone(),
                missing,
            });
        }
        state.apply(operator);
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> WorldState {
        [
            Predicate::on_table("A"),
            Predicate::on("B", "A"),
            Predicate::on_table("C"),
            Predicate::clear("B"),
            Predicate::clear("C"),
            Predicate::ArmEmpty,
        ]
        .into_iter()
        .collect()
    }

    fn abc() -> BlocksWorld {
        BlocksWorld::new(["A", "B", "C"])
    }

    #[test]
    fn test_predicate_display() {
        assert_eq!(Predicate::on("A", "B").to_string(), "ON(A,B)");
        assert_eq!(Predicate::on_table("A").to_string(), "ONTABLE(A)");
        assert_eq!(Predicate::clear("C").to_string(), "CLEAR(C)");
        assert_eq!(Predicate::holding("B").to_string(), "HOLDING(B)");
        assert_eq!(Predicate::ArmEmpty.to_string(), "ARMEMPTY");
    }

    #[test]
    fn test_predicate_structural_equality() {
        assert_eq!(Predicate::on("A", "B"), Predicate::On("A".into(), "B".into()));
        assert_ne!(Predicate::on("A", "B"), Predicate::on("B", "A"));
        let state: WorldState = [Predicate::clear("A"), Predicate::clear("A")]
            .into_iter()
            .collect();
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_world_state_display_is_ordered() {
        let state: WorldState = [
            Predicate::ArmEmpty,
            Predicate::clear("B"),
            Predicate::on("A", "B"),
        ]
        .into_iter()
        .collect();
        assert_eq!(state.to_string(), "{ON(A,B), CLEAR(B), ARMEMPTY}");
    }

    #[test]
    fn test_operator_templates() {
        let op = Operator::unstack("B", "A");
        assert_eq!(op.to_string(), "UNSTACK(B,A)");
        assert_eq!(op.kind(), OperatorKind::Unstack);
        assert_eq!(op.operands(), ["B".to_string(), "A".to_string()]);
        assert_eq!(
            op.preconditions(),
            [Predicate::on("B", "A"), Predicate::clear("B"), Predicate::ArmEmpty]
        );
        assert_eq!(op.add_effects(), [Predicate::holding("B"), Predicate::clear("A")]);

        assert_eq!(Operator::pickup("A").to_string(), "PICKUP(A)");
        assert_eq!(Operator::putdown("A").preconditions(), [Predicate::holding("A")]);
        assert_eq!(
            Operator::stack("A", "B").delete_effects(),
            [Predicate::holding("A"), Predicate::clear("B")]
        );
        // Fresh instances of the same template compare equal.
        assert_eq!(Operator::stack("A", "B"), Operator::stack("A", "B"));
    }

    #[test]
    fn test_apply_removes_then_adds() {
        let mut state = sample_state();
        let op = Operator::unstack("B", "A");
        assert!(op.is_applicable(&state));
        state.apply(&op);
        assert!(state.holds(&Predicate::holding("B")));
        assert!(state.holds(&Predicate::clear("A")));
        assert!(!state.holds(&Predicate::on("B", "A")));
        assert!(!state.holds(&Predicate::clear("B")));
        assert!(!state.holds(&Predicate::ArmEmpty));
    }

    #[test]
    fn test_missing_preconditions_in_template_order() {
        let state = sample_state();
        let op = Operator::stack("A", "B");
        assert_eq!(op.missing_preconditions(&state), vec![Predicate::holding("A")]);
        let op = Operator::pickup("A");
        assert_eq!(op.missing_preconditions(&state), vec![Predicate::clear("A")]);
    }

    #[test]
    fn test_choose_action_on_and_ontable() {
        let state = sample_state();
        assert_eq!(
            abc().choose_action(&Predicate::on("A", "B"), &state),
            Some(Operator::stack("A", "B"))
        );
        assert_eq!(
            abc().choose_action(&Predicate::on_table("B"), &state),
            Some(Operator::putdown("B"))
        );
    }

    #[test]
    fn test_choose_action_clear() {
        let state = sample_state();
        assert_eq!(
            abc().choose_action(&Predicate::clear("A"), &state),
            Some(Operator::unstack("B", "A"))
        );
        // Nothing on C: fall back to putting it down.
        let holding_c: WorldState = [Predicate::holding("C")].into_iter().collect();
        assert_eq!(
            abc().choose_action(&Predicate::clear("C"), &holding_c),
            Some(Operator::putdown("C"))
        );
    }

    #[test]
    fn test_choose_action_holding() {
        let state = sample_state();
        assert_eq!(
            abc().choose_action(&Predicate::holding("A"), &state),
            Some(Operator::pickup("A"))
        );
        assert_eq!(
            abc().choose_action(&Predicate::holding("B"), &state),
            Some(Operator::unstack("B", "A"))
        );
        assert_eq!(
            abc().choose_action(&Predicate::holding("D"), &state),
            Some(Operator::pickup("D"))
        );
    }

    #[test]
    fn test_choose_action_armempty() {
        let holding_b: WorldState = [Predicate::holding("B")].into_iter().collect();
        assert_eq!(
            abc().choose_action(&Predicate::ArmEmpty, &holding_b),
            Some(Operator::putdown("B"))
        );
        assert_eq!(
            abc().choose_action(&Predicate::ArmEmpty, &WorldState::new()),
            Some(Operator::putdown("A"))
        );
        assert_eq!(
            BlocksWorld::default().choose_action(&Predicate::ArmEmpty, &WorldState::new()),
            None
        );
    }

    #[test]
    fn test_execute_plan_valid() {
        let plan = vec![
            Operator::unstack("B", "A"),
            Operator::stack("B", "C"),
            Operator::pickup("A"),
            Operator::stack("A", "B"),
        ];
        let end = execute_plan(&sample_state(), &plan).unwrap();
        assert!(end.satisfies(&[
            Predicate::on("A", "B"),
            Predicate::on("B", "C"),
            Predicate::on_table("C"),
            Predicate::ArmEmpty,
        ]));
    }

    #[test]
    fn test_execute_plan_reports_first_bad_step() {
        let plan = vec![Operator::unstack("B", "A"), Operator::pickup("C")];
        let err = execute_plan(&sample_state(), &plan).unwrap_err();
        assert_eq!(
            err,
            PlanError::PreconditionsUnmet {
                step: 1,
                operator: Operator::pickup("C"),
                missing: vec![Predicate::ArmEmpty],
            }
        );
        assert_eq!(
            err.to_string(),
            "plan step 1 (PICKUP(C)) is missing preconditions: ARMEMPTY"
        );
    }
}
