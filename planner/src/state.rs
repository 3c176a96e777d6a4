//! State representation and application (spec.md §4.C/§4.D).
//!
//! A `State` is an immutable snapshot: a set of true ground predicates
//! (closed-world — absent means false) and a map from fluent reference to
//! its current integer value, plus bookkeeping (`cost`, `predecessor`) used
//! only for search/plan reconstruction. Equality and hashing consider only
//! `predicates`/`fluents`, so two distinct discovery paths to the same world
//! collapse in a search closed set (spec.md §3 "Invariants").
//!
//! `predicates`/`fluents` are `im` persistent collections — the same choice
//! `validator/src/models/state.rs` makes for its planning-adjacent state —
//! so producing a successor shares structure with its predecessor instead of
//! deep-copying (spec.md §3 "States are immutable and may be reference-shared").

use crate::error::PlannerError;
use crate::expr::{FluentRef, NumOp, NumericCondition, Predicate, Term};
use crate::ground_action::GroundAction;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Predecessor link: the prior state together with the action that produced
/// this one, used only to reconstruct a plan once a goal state is found.
type Predecessor = Rc<(State, GroundAction)>;

#[derive(Clone, Debug)]
pub struct State {
    pub predicates: im::HashSet<Predicate>,
    pub fluents: im::HashMap<FluentRef, i64>,
    pub cost: u32,
    pub predecessor: Option<Predecessor>,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.predicates == other.predicates && self.fluents == other.fluents
    }
}
impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // `im::HashSet`/`im::HashMap` don't implement `Hash` themselves
        // (their iteration order isn't canonical), so a commutative digest
        // (XOR of per-entry hashes) is used, per spec.md §9's "canonical
        // hashing" design note: two equal sets must hash identically
        // regardless of insertion order.
        let mut preds_digest: u64 = 0;
        for p in &self.predicates {
            preds_digest ^= hash_one(p);
        }
        let mut fluents_digest: u64 = 0;
        for (f, v) in &self.fluents {
            fluents_digest ^= hash_one((f, v));
        }
        preds_digest.hash(state);
        fluents_digest.hash(state);
    }
}

fn hash_one<T: Hash>(value: T) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

impl State {
    pub fn initial(predicates: im::HashSet<Predicate>, fluents: im::HashMap<FluentRef, i64>) -> Self {
        State {
            predicates,
            fluents,
            cost: 0,
            predecessor: None,
        }
    }

    fn eval_term(&self, term: &Term) -> Result<i64, PlannerError> {
        match term {
            Term::Int(i) => Ok(*i),
            Term::Fluent(f) => self
                .fluents
                .get(f)
                .copied()
                .ok_or_else(|| PlannerError::UnknownFluent(f.clone())),
        }
    }

    fn eval_condition(&self, cond: &NumericCondition) -> Result<bool, PlannerError> {
        let lhs = self.eval_term(&cond.lhs)?;
        let rhs = self.eval_term(&cond.rhs)?;
        Ok(cond.op.eval(lhs, rhs))
    }

    /// `is_true(symbolic_goals, numeric_goals)` (spec.md §4.C): every
    /// symbolic goal predicate is present and every numeric condition holds.
    pub fn is_true(&self, sym: &[Predicate], num: &[NumericCondition]) -> Result<bool, PlannerError> {
        if !sym.iter().all(|p| self.predicates.contains(p)) {
            return Ok(false);
        }
        for c in num {
            if !self.eval_condition(c)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Is `action` applicable in this state: every symbolic precondition is a
    /// member of `predicates`, every numeric precondition evaluates true.
    pub fn is_applicable(&self, action: &GroundAction) -> Result<bool, PlannerError> {
        self.is_true(&action.pre_sym, &action.pre_num)
    }

    /// Applies `action`, producing the successor state (spec.md §4.C).
    ///
    /// Adds are unioned in before deletes are removed: `new |= add; new -=
    /// del`, so a predicate that is both added and deleted by the same
    /// action ends up absent from the successor — preserved verbatim from
    /// `pyddl.State.apply`, documented as an ambiguity in spec.md §9, not
    /// "fixed" here. If `monotone`, the delete step is skipped entirely
    /// (delete-relaxation, used by the `Monotone` heuristic).
    pub fn apply(&self, action: &GroundAction, monotone: bool) -> Result<State, PlannerError> {
        let mut predicates = self.predicates.clone();
        for p in &action.add {
            predicates.insert(p.clone());
        }
        if !monotone {
            for p in &action.del {
                predicates.remove(p);
            }
        }

        // Numeric effects evaluate their RHS against the pre-state, then the
        // sum is applied to the pre-state's fluent value (spec.md §4.C):
        // two effects targeting the same fluent compose linearly.
        let mut fluents = self.fluents.clone();
        for (fluent, op, term) in &action.num_eff {
            let delta = self.eval_term(term)?;
            let delta = match op {
                NumOp::Add => delta,
                NumOp::Sub => -delta,
            };
            // Base off the running `fluents` map (not `self.fluents`), so
            // that two effects on the same fluent within one action compose
            // linearly rather than the second overwriting the first.
            let current = fluents
                .get(fluent)
                .copied()
                .ok_or_else(|| PlannerError::UnknownFluent(fluent.clone()))?;
            fluents.insert(fluent.clone(), current + delta);
        }

        Ok(State {
            predicates,
            fluents,
            cost: self.cost + 1,
            predecessor: Some(Rc::new((self.clone(), action.clone()))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::CmpOp;
    use crate::expr::NumOp;

    fn state_with(preds: &[&str], fluents: &[(&str, i64)]) -> State {
        let predicates = preds.iter().map(|h| Predicate::new(*h, vec![])).collect();
        let fluents = fluents.iter().map(|(h, v)| (FluentRef::new(*h, vec![]), *v)).collect();
        State::initial(predicates, fluents)
    }

    fn action(add: &[&str], del: &[&str], num_eff: Vec<(&str, NumOp, Term)>) -> GroundAction {
        GroundAction {
            schema_name: "a".into(),
            args: vec![],
            pre_sym: vec![],
            pre_num: vec![],
            add: add.iter().map(|h| Predicate::new(*h, vec![])).collect(),
            del: del.iter().map(|h| Predicate::new(*h, vec![])).collect(),
            num_eff: num_eff
                .into_iter()
                .map(|(h, op, t)| (FluentRef::new(h, vec![]), op, t))
                .collect(),
        }
    }

    #[test]
    fn apply_increments_cost() {
        let s0 = state_with(&["p"], &[]);
        let s1 = s0.apply(&action(&[], &[], vec![]), false).unwrap();
        assert_eq!(s1.cost, s0.cost + 1);
    }

    #[test]
    fn add_and_delete_of_same_predicate_deletes_it() {
        let s0 = state_with(&["p"], &[]);
        let a = action(&["p"], &["p"], vec![]);
        let s1 = s0.apply(&a, false).unwrap();
        assert!(!s1.predicates.contains(&Predicate::new("p", vec![])));
    }

    #[test]
    fn monotone_application_skips_deletes() {
        let s0 = state_with(&["p"], &[]);
        let a = action(&[], &["p"], vec![]);
        let s1 = s0.apply(&a, true).unwrap();
        assert!(s1.predicates.contains(&Predicate::new("p", vec![])));
    }

    #[test]
    fn numeric_effects_compose_linearly_over_the_pre_state() {
        let s0 = state_with(&[], &[("account", 10)]);
        let a = action(
            &[],
            &[],
            vec![("account", NumOp::Add, Term::Int(3)), ("account", NumOp::Add, Term::Int(5))],
        );
        // Both effects read the *pre-state* value, then the ground action's
        // loop applies them in order — net effect: +3 then +5 on the running value.
        let s1 = s0.apply(&a, false).unwrap();
        assert_eq!(s1.fluents.get(&FluentRef::new("account", vec![])), Some(&18));
    }

    #[test]
    fn reading_an_undefined_fluent_is_an_error() {
        let s0 = state_with(&[], &[]);
        let cond = NumericCondition {
            op: CmpOp::Gt,
            lhs: Term::Fluent(FluentRef::new("missing", vec![])),
            rhs: Term::Int(0),
        };
        assert!(s0.eval_condition(&cond).is_err());
    }

    #[test]
    fn equality_and_hash_ignore_cost_and_predecessor() {
        let s0 = state_with(&["p"], &[("x", 1)]);
        let s1 = s0.apply(&action(&[], &[], vec![]), false).unwrap();
        let s2 = s1.apply(&action(&[], &[], vec![]), false).unwrap();
        // s1 and s2 took different numbers of steps from s0 but are
        // otherwise identical worlds.
        assert_eq!(s1, s2);
        assert_eq!(hash_one(&s1), hash_one(&s2));
    }
}
