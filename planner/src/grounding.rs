//! The grounder (spec.md §4.B): turns an action schema into its set of
//! applicable ground instances, honouring the `unique`/`no_permute`
//! symmetry-reduction flags.

use crate::error::PlannerError;
use crate::expr::Effect;
use crate::ground_action::GroundAction;
use crate::schema::{ActionSchema, Domain};
use crate::sym::{ObjectPool, Sym};
use hashbrown::HashSet;
use itertools::Itertools;
use std::collections::BTreeSet;

/// Grounds every schema of `domain` against `pool`, in declared schema order
/// and, within a schema, in the Cartesian-product order of its parameter
/// type pools — the ordering spec.md §5 requires for reproducible runs.
pub fn ground_domain(domain: &Domain, pool: &ObjectPool) -> Result<Vec<GroundAction>, PlannerError> {
    let mut actions = Vec::new();
    for schema in &domain.schemas {
        ground_schema_into(schema, pool, &mut actions)?;
    }
    Ok(actions)
}

fn ground_schema_into(
    schema: &ActionSchema,
    pool: &ObjectPool,
    out: &mut Vec<GroundAction>,
) -> Result<(), PlannerError> {
    if schema.params.is_empty() {
        out.push(bind_action(schema, &[]));
        return Ok(());
    }

    let mut pools = Vec::with_capacity(schema.params.len());
    for p in &schema.params {
        let objects = pool
            .objects_of(&p.tpe)
            .ok_or_else(|| PlannerError::UnknownType(p.tpe.clone()))?;
        pools.push(objects.to_vec());
    }

    // remembers the unordered argument sets already ground for this schema,
    // for the `no_permute` filter (spec.md §9: a set, not a multiset).
    let mut seen_arg_sets: HashSet<Vec<Sym>> = HashSet::new();

    for args in pools.into_iter().multi_cartesian_product() {
        if schema.unique && has_duplicate(&args) {
            continue;
        }
        if schema.no_permute {
            let key = canonical_set(&args);
            if !seen_arg_sets.insert(key) {
                continue;
            }
        }
        out.push(bind_action(schema, &args));
    }
    Ok(())
}

fn has_duplicate(args: &[Sym]) -> bool {
    let mut seen = HashSet::with_capacity(args.len());
    !args.iter().all(|a| seen.insert(a.clone()))
}

/// Canonicalizes argument tuple into its unordered-set representation,
/// collapsing duplicates exactly as `pyddl.Domain.ground`'s `frozenset(params)` does.
fn canonical_set(args: &[Sym]) -> Vec<Sym> {
    args.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect()
}

fn bind_action(schema: &ActionSchema, args: &[Sym]) -> GroundAction {
    let mut pre_sym = Vec::with_capacity(schema.pre_sym.len());
    for p in &schema.pre_sym {
        pre_sym.push(p.bind(args));
    }
    let mut pre_num = Vec::with_capacity(schema.pre_num.len());
    for c in &schema.pre_num {
        pre_num.push(c.bind(args));
    }
    let mut add = Vec::new();
    let mut del = Vec::new();
    let mut num_eff = Vec::new();
    for e in &schema.eff {
        match e.bind(args) {
            Effect::Add(p) => add.push(p),
            Effect::Del(p) => del.push(p),
            Effect::Num(f, op, t) => num_eff.push((f, op, t)),
        }
    }
    GroundAction {
        schema_name: schema.name.clone(),
        args: args.to_vec(),
        pre_sym,
        pre_num,
        add,
        del,
        num_eff,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{CmpOp, Holed, ParamEffect, ParamFluentRef, ParamNumericCondition, ParamPredicate, ParamTerm};

    fn pred(head: &str, params: &[usize]) -> ParamPredicate {
        ParamPredicate {
            head: head.into(),
            args: params.iter().map(|&i| Holed::Param(i)).collect(),
        }
    }

    fn pool_of(tpe: &str, objs: &[&str]) -> ObjectPool {
        let mut pool = ObjectPool::new();
        for o in objs {
            pool.add(tpe, *o);
        }
        pool
    }

    #[test]
    fn unique_rejects_duplicate_arguments() {
        let schema = ActionSchema::new(
            "swap",
            vec![("Obj", "x"), ("Obj", "y")],
            vec![],
            vec![],
            vec![ParamEffect::Add(pred("swapped", &[0, 1]))],
        )
        .unwrap()
        .unique(true);
        let pool = pool_of("Obj", &["a", "b", "c"]);
        let ground = ground_schema(&schema, &pool);
        assert_eq!(ground.len(), 3 * 3 - 3); // 9 pairs minus the 3 (x,x) pairs
        for g in &ground {
            assert_ne!(g.args[0], g.args[1]);
        }
    }

    #[test]
    fn no_permute_collapses_permutations_into_a_set() {
        let schema = ActionSchema::new(
            "pair",
            vec![("Obj", "x"), ("Obj", "y")],
            vec![],
            vec![],
            vec![ParamEffect::Add(pred("paired", &[0, 1]))],
        )
        .unwrap()
        .no_permute(true);
        let pool = pool_of("Obj", &["a", "b"]);
        let ground = ground_schema(&schema, &pool);
        // (a,a),(a,b),(b,a),(b,b) -> canonical sets {a}, {a,b}, {a,b}, {b}
        // so (b,a) is dropped as a repeat of {a,b}'s first occurrence (a,b),
        // leaving (a,a), (a,b), (b,b).
        assert_eq!(ground.len(), 3);
    }

    #[test]
    fn unknown_type_is_an_error() {
        let schema = ActionSchema::new("noop", vec![("Missing", "x")], vec![], vec![], vec![]).unwrap();
        let pool = ObjectPool::new();
        let err = ground_domain(&Domain::new(vec![schema]), &pool).unwrap_err();
        assert_eq!(err, PlannerError::UnknownType("Missing".into()));
    }

    #[test]
    fn numeric_precondition_binds_parameters() {
        let schema = ActionSchema::new(
            "sell",
            vec![("Product", "p")],
            vec![],
            vec![ParamNumericCondition {
                op: CmpOp::Gt,
                lhs: ParamTerm::Fluent(ParamFluentRef {
                    head: "quantity".into(),
                    args: smallvec::smallvec![Holed::Param(0)],
                }),
                rhs: ParamTerm::Int(0),
            }],
            vec![],
        )
        .unwrap();
        let pool = pool_of("Product", &["apples"]);
        let ground = ground_schema(&schema, &pool);
        assert_eq!(ground.len(), 1);
        assert_eq!(ground[0].pre_num[0].op, CmpOp::Gt);
    }

    fn ground_schema(schema: &ActionSchema, pool: &ObjectPool) -> Vec<GroundAction> {
        ground_domain(&Domain::new(vec![schema.clone()]), pool).unwrap()
    }
}
