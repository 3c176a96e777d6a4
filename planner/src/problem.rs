//! Problem construction (spec.md §3/§6): `(domain, objects-by-type, init,
//! goal)`. Constructing a `Problem` grounds the domain and parses `init`/
//! `goal` into the initial `State` and the goal condition.

use crate::error::PlannerError;
use crate::expr::{FluentRef, NumericCondition, Predicate};
use crate::ground_action::GroundAction;
use crate::grounding::ground_domain;
use crate::schema::Domain;
use crate::state::State;
use crate::sym::ObjectPool;

/// One entry of a problem's `init`: either a ground predicate that holds, or
/// a fluent assignment `(=, fluent-ref, integer)` (spec.md §6).
#[derive(Clone, Debug)]
pub enum InitEntry {
    Pred(Predicate),
    Assign(FluentRef, i64),
}

/// One entry of a problem's `goal`: either a ground predicate that must
/// hold, or a numeric comparison that must evaluate true (spec.md §6).
#[derive(Clone, Debug)]
pub enum GoalEntry {
    Pred(Predicate),
    Num(NumericCondition),
}

pub struct Problem {
    pub operators: Vec<GroundAction>,
    pub initial_state: State,
    pub goal_sym: Vec<Predicate>,
    pub goal_num: Vec<NumericCondition>,
}

impl Problem {
    pub fn new(
        domain: &Domain,
        pool: &ObjectPool,
        init: Vec<InitEntry>,
        goal: Vec<GoalEntry>,
    ) -> Result<Self, PlannerError> {
        let operators = ground_domain(domain, pool)?;

        let mut predicates = im::HashSet::new();
        let mut fluents = im::HashMap::new();
        for entry in init {
            match entry {
                InitEntry::Pred(p) => {
                    predicates.insert(p);
                }
                InitEntry::Assign(f, v) => {
                    fluents.insert(f, v);
                }
            }
        }
        let initial_state = State::initial(predicates, fluents);

        let mut goal_sym = Vec::new();
        let mut goal_num = Vec::new();
        for entry in goal {
            match entry {
                GoalEntry::Pred(p) => goal_sym.push(p),
                GoalEntry::Num(n) => goal_num.push(n),
            }
        }

        Ok(Problem {
            operators,
            initial_state,
            goal_sym,
            goal_num,
        })
    }

    pub fn is_goal(&self, state: &State) -> Result<bool, PlannerError> {
        state.is_true(&self.goal_sym, &self.goal_num)
    }

    /// Enumerates all applicable ground actions and the successor produced
    /// by each, de-duplicated by state equality (spec.md §4.D).
    pub fn successors(&self, state: &State, monotone: bool) -> Result<Vec<State>, PlannerError> {
        let mut seen = im::HashSet::new();
        let mut out = Vec::new();
        for op in &self.operators {
            if state.is_applicable(op)? {
                let succ = state.apply(op, monotone)?;
                if seen.insert(succ.clone()).is_none() {
                    out.push(succ);
                }
            }
        }
        Ok(out)
    }
}
