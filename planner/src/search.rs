//! Heuristic A* search (spec.md §4.E): a min-priority frontier keyed by
//! `f = g + h`, ties broken by preferring deeper nodes, and a closed set of
//! already-expanded states. Translates `pyddl/planner.py::planner()`'s
//! `heapq` loop (`(f, -cost, node)` keys) into a Rust `BinaryHeap`.

use crate::config;
use crate::error::PlannerError;
use crate::expr::{NumericCondition, Predicate};
use crate::ground_action::GroundAction;
use crate::heuristics::Heuristic;
use crate::problem::Problem;
use crate::state::State;
use crate::stats::SearchStats;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

/// An ordered sequence of ground actions, in application order.
pub type Plan = Vec<GroundAction>;

/// A frontier entry. `Ord` is implemented so that the smallest `f`, then the
/// *largest* `g` (deeper nodes preferred, spec.md §4.E's "standard A*
/// tie-break"), then the smallest insertion sequence number (spec.md §5(ii)'s
/// determinism requirement) sorts first out of a `BinaryHeap` — which is
/// normally a max-heap, hence the reversed `Ord` below.
struct Node {
    f: f64,
    g: u32,
    seq: u64,
    state: State,
}

impl Node {
    fn key(&self) -> (f64, i64, u64) {
        (self.f, -(self.g as i64), self.seq)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}
impl Eq for Node {}
impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        // f64 here is always finite or +inf, never NaN (heuristics return
        // plan lengths or f64::INFINITY), so total_cmp is a true total order.
        let (f1, g1, s1) = self.key();
        let (f2, g2, s2) = other.key();
        f1.total_cmp(&f2)
            .then(g1.cmp(&g2))
            .then(s1.cmp(&s2))
            .reverse() // BinaryHeap is a max-heap; we want the smallest key first.
    }
}

/// Finds a plan for `problem` with A*.
///
/// - `initial`: the state search starts from (`problem.initial_state` if `None`).
/// - `goal`: the `(symbolic, numeric)` goal condition to satisfy
///   (`(problem.goal_sym, problem.goal_num)` if `None`).
/// - `monotone`: if true, actions are applied with their delete lists
///   suppressed (used internally by the `Monotone` heuristic).
///
/// Returns `(None, stats)` if the frontier is exhausted without finding a
/// goal state — "no plan exists" is not an error (spec.md §7).
pub fn plan(
    problem: &Problem,
    heuristic: &dyn Heuristic,
    initial: Option<&State>,
    goal: Option<(&[Predicate], &[NumericCondition])>,
    monotone: bool,
) -> Result<(Option<Plan>, SearchStats), PlannerError> {
    let _span = tracing::span!(tracing::Level::DEBUG, "a_star").entered();

    let start = initial.cloned().unwrap_or_else(|| problem.initial_state.clone());
    let (goal_sym, goal_num): (&[Predicate], &[NumericCondition]) =
        goal.unwrap_or((&problem.goal_sym, &problem.goal_num));

    let node_limit = config::NODE_LIMIT.get();
    let trace = config::TRACE_EXPANSIONS.get();

    let mut closed: im::HashSet<State> = im::HashSet::new();
    let mut frontier = BinaryHeap::new();
    let mut next_seq: u64 = 0;
    let started_at = Instant::now();

    let h0 = heuristic.estimate(&start)?;
    frontier.push(Node {
        f: start.cost as f64 + h0,
        g: start.cost,
        seq: next_seq,
        state: start,
    });
    next_seq += 1;

    let mut expanded = 0usize;
    while let Some(node) = frontier.pop() {
        if node_limit > 0 && expanded as u64 >= node_limit {
            tracing::debug!(expanded, "node limit reached, aborting search");
            break;
        }
        expanded += 1;
        if trace {
            tracing::trace!(cost = node.state.cost, f = node.f, "expanding state");
        }

        // Goal test runs on every popped node, even one already in the
        // closed set — matching `pyddl/planner.py`'s loop, which tests
        // `node.is_true(*goal)` unconditionally before the closed-set check.
        if node.state.is_true(goal_sym, goal_num)? {
            let stats = SearchStats {
                expanded,
                elapsed: started_at.elapsed(),
                plan_len: Some(node.state.cost),
            };
            tracing::debug!(
                expanded,
                elapsed_ms = stats.elapsed.as_secs_f64() * 1000.0,
                plan_len = node.state.cost,
                "plan found"
            );
            return Ok((Some(reconstruct(node.state)), stats));
        }

        if closed.contains(&node.state) {
            continue;
        }
        closed.insert(node.state.clone());

        for succ in problem.successors(&node.state, monotone)? {
            if closed.contains(&succ) {
                continue;
            }
            let h = heuristic.estimate(&succ)?;
            let f = succ.cost as f64 + h;
            frontier.push(Node {
                f,
                g: succ.cost,
                seq: next_seq,
                state: succ,
            });
            next_seq += 1;
        }
    }

    let stats = SearchStats {
        expanded,
        elapsed: started_at.elapsed(),
        plan_len: None,
    };
    tracing::debug!(expanded, "no plan found");
    Ok((None, stats))
}

/// Walks `predecessor` links from the goal state back to the initial state,
/// collecting the action taken at each step, then reverses (spec.md §4.E
/// "Plan reconstruction").
fn reconstruct(mut state: State) -> Plan {
    let mut actions = Vec::with_capacity(state.cost as usize);
    while let Some(pred) = state.predecessor.clone() {
        let (prior, action) = (*pred).clone();
        actions.push(action);
        state = prior;
    }
    actions.reverse();
    actions
}
