//! The heuristic library (spec.md §4.F): null, monotone (delete-relaxation)
//! and subgoal-max. The two non-trivial heuristics recursively invoke the
//! planner on a simplified problem — the same construction as
//! `monotone_heuristic`/`subgoal_heuristic` in `pyddl/planner.py`, restated
//! as a borrowing trait rather than a Python closure (spec.md §9: "avoid
//! cyclic ownership by making the heuristic borrow, not own, the problem"),
//! with one correction: the incoming `state` is rebased (see `rebase` below)
//! before being handed to the nested search, so a sub-search rooted at a
//! non-initial outer state measures only the remaining distance from
//! `state`, not that distance plus however far the outer search already
//! traveled to reach it.

use crate::error::PlannerError;
use crate::problem::Problem;
use crate::search;
use crate::state::State;

pub trait Heuristic {
    /// Estimated cost to the goal from `state`. `f64::INFINITY` means the
    /// heuristic believes the goal is unreachable from `state`.
    fn estimate(&self, state: &State) -> Result<f64, PlannerError>;
}

/// `h ≡ 0`. Reduces A* to uniform-cost search (BFS under unit action costs).
pub struct Null;

impl Heuristic for Null {
    fn estimate(&self, _state: &State) -> Result<f64, PlannerError> {
        Ok(0.0)
    }
}

/// The delete-relaxation heuristic h⁺: recursively plans from `state` with
/// deletes suppressed in every state transition, under the null heuristic,
/// and returns the length of the resulting (relaxed) plan.
pub struct Monotone<'p> {
    problem: &'p Problem,
}

impl<'p> Monotone<'p> {
    pub fn new(problem: &'p Problem) -> Self {
        Monotone { problem }
    }
}

impl Heuristic for Monotone<'_> {
    fn estimate(&self, state: &State) -> Result<f64, PlannerError> {
        let rebased = rebase(state);
        let (plan, _stats) = search::plan(self.problem, &Null, Some(&rebased), None, true)?;
        Ok(plan_cost(&plan))
    }
}

/// For each individual symbolic/numeric goal condition, recursively plans
/// from `state` toward that single condition and returns the maximum of the
/// resulting plan lengths.
///
/// This is only admissible when subgoals do not interact (no action that
/// achieves one undoes another) — a caveat inherited unchanged from the
/// source (`pyddl/planner.py::subgoal_heuristic`); this implementation does
/// not attempt to detect or guard against interacting subgoals.
pub struct SubgoalMax<'p> {
    problem: &'p Problem,
}

impl<'p> SubgoalMax<'p> {
    pub fn new(problem: &'p Problem) -> Self {
        SubgoalMax { problem }
    }
}

impl Heuristic for SubgoalMax<'_> {
    fn estimate(&self, state: &State) -> Result<f64, PlannerError> {
        let rebased = rebase(state);
        let mut worst = 0.0_f64;
        for g in &self.problem.goal_sym {
            let goal = (std::slice::from_ref(g), [].as_slice());
            let (plan, _stats) = search::plan(self.problem, &Null, Some(&rebased), Some(goal), false)?;
            worst = worst.max(plan_cost(&plan));
        }
        for g in &self.problem.goal_num {
            let goal = ([].as_slice(), std::slice::from_ref(g));
            let (plan, _stats) = search::plan(self.problem, &Null, Some(&rebased), Some(goal), false)?;
            worst = worst.max(plan_cost(&plan));
        }
        Ok(worst)
    }
}

/// Strips `state`'s `cost`/`predecessor` before handing it to a nested
/// `search::plan` call as its root. Without this, `reconstruct` walks the
/// sub-search's backpointers all the way past `state` into whatever outer
/// search produced it, and the returned plan — and so `plan_cost` — would
/// count the already-traveled outer prefix in addition to the distance from
/// `state` to its (relaxed/single-subgoal) target. `pyddl/planner.py`'s
/// `monotone_heuristic`/`subgoal_heuristic` pass `state0` into their
/// recursive `planner()` call the same un-rebased way, so this is a
/// deliberate departure from the source to keep the heuristic an estimate of
/// remaining cost only, which is what makes it usable as `f = g + h`.
fn rebase(state: &State) -> State {
    State::initial(state.predicates.clone(), state.fluents.clone())
}

fn plan_cost(plan: &Option<crate::search::Plan>) -> f64 {
    match plan {
        Some(p) => p.len() as f64,
        None => f64::INFINITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{ParamEffect, ParamPredicate};
    use crate::problem::{GoalEntry, InitEntry};
    use crate::schema::{ActionSchema, Domain};
    use crate::sym::{ObjectPool, Sym};

    fn pred(h: &str) -> ParamPredicate {
        ParamPredicate {
            head: Sym::from(h),
            args: Default::default(),
        }
    }

    /// A three-step chain `at0 -> at1 -> at2 -> at3`, one zero-parameter
    /// schema per step, so every state along the unique path has a known
    /// distance-to-goal independent of the path already walked to reach it.
    fn chain_problem() -> Problem {
        let step = |from: &str, to: &str| {
            ActionSchema::new(
                format!("{from}-to-{to}"),
                Vec::<(&str, &str)>::new(),
                vec![pred(from)],
                vec![],
                vec![ParamEffect::Add(pred(to)), ParamEffect::Del(pred(from))],
            )
            .unwrap()
        };
        let domain = Domain::new(vec![step("at0", "at1"), step("at1", "at2"), step("at2", "at3")]);
        let pool = ObjectPool::new();
        Problem::new(
            &domain,
            &pool,
            vec![InitEntry::Pred(crate::expr::Predicate::new("at0", vec![]))],
            vec![GoalEntry::Pred(crate::expr::Predicate::new("at3", vec![]))],
        )
        .unwrap()
    }

    #[test]
    fn monotone_estimates_remaining_distance_not_total_path_cost() {
        let problem = chain_problem();
        let first_step = problem
            .operators
            .iter()
            .find(|op| op.schema_name.as_str() == "at0-to-at1")
            .unwrap();
        let state = problem.initial_state.apply(first_step, false).unwrap();
        assert_eq!(state.cost, 1);

        let h = Monotone::new(&problem).estimate(&state).unwrap();
        // Two steps remain (at1->at2->at3); the already-traveled at0->at1
        // step must not be folded back into the estimate.
        assert_eq!(h, 2.0);
    }

    #[test]
    fn subgoal_max_estimates_remaining_distance_not_total_path_cost() {
        let problem = chain_problem();
        let first_step = problem
            .operators
            .iter()
            .find(|op| op.schema_name.as_str() == "at0-to-at1")
            .unwrap();
        let state = problem.initial_state.apply(first_step, false).unwrap();

        let h = SubgoalMax::new(&problem).estimate(&state).unwrap();
        assert_eq!(h, 2.0);
    }

    #[test]
    fn monotone_on_the_initial_state_is_unaffected_by_rebasing() {
        let problem = chain_problem();
        let h = Monotone::new(&problem).estimate(&problem.initial_state).unwrap();
        assert_eq!(h, 3.0);
    }
}
