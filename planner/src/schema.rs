//! Action schemas and domains (spec.md §3/§4.B).

use crate::error::PlannerError;
use crate::expr::{Holed, ParamEffect, ParamNumericCondition, ParamPredicate};
use crate::sym::Sym;

/// A schema parameter: its declared type and, for display purposes only, its
/// source name.
#[derive(Clone, Debug)]
pub struct Param {
    pub tpe: Sym,
    pub name: Sym,
}

/// An action schema: `(name, ordered parameter list, preconditions, effects,
/// unique, no_permute)` (spec.md §3).
#[derive(Clone, Debug)]
pub struct ActionSchema {
    pub name: Sym,
    pub params: Vec<Param>,
    pub pre_sym: Vec<ParamPredicate>,
    pub pre_num: Vec<ParamNumericCondition>,
    pub eff: Vec<ParamEffect>,
    /// Reject groundings whose argument multiset contains duplicates.
    pub unique: bool,
    /// At most one grounding per unordered argument *set* (spec.md §9: the
    /// source collapses repeats, this is preserved, not fixed).
    pub no_permute: bool,
}

impl ActionSchema {
    pub fn new(
        name: impl Into<Sym>,
        params: Vec<(impl Into<Sym>, impl Into<Sym>)>,
        pre_sym: Vec<ParamPredicate>,
        pre_num: Vec<ParamNumericCondition>,
        eff: Vec<ParamEffect>,
    ) -> Result<Self, PlannerError> {
        let params: Vec<Param> = params
            .into_iter()
            .map(|(tpe, name)| Param {
                tpe: tpe.into(),
                name: name.into(),
            })
            .collect();
        let schema = ActionSchema {
            name: name.into(),
            params,
            pre_sym,
            pre_num,
            eff,
            unique: false,
            no_permute: false,
        };
        schema.check_params_bound()?;
        Ok(schema)
    }

    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    pub fn no_permute(mut self, no_permute: bool) -> Self {
        self.no_permute = no_permute;
        self
    }

    /// Every `Holed::Param(i)` appearing in preconditions/effects must index
    /// into `self.params`; otherwise the schema is malformed (spec.md §7).
    fn check_params_bound(&self) -> Result<(), PlannerError> {
        let n = self.params.len();
        let check = |h: &Holed<Sym>| match h {
            Holed::Param(i) if *i >= n => Err(PlannerError::UnboundParameter(*i)),
            _ => Ok(()),
        };
        for p in &self.pre_sym {
            p.args.iter().try_for_each(check)?;
        }
        for e in &self.eff {
            match e {
                ParamEffect::Add(p) | ParamEffect::Del(p) => p.args.iter().try_for_each(check)?,
                ParamEffect::Num(f, _, t) => {
                    f.args.iter().try_for_each(check)?;
                    check_term(t, &check)?;
                }
            }
        }
        for c in &self.pre_num {
            check_term(&c.lhs, &check)?;
            check_term(&c.rhs, &check)?;
        }
        Ok(())
    }
}

fn check_term(
    t: &crate::expr::ParamTerm,
    check: &impl Fn(&Holed<Sym>) -> Result<(), PlannerError>,
) -> Result<(), PlannerError> {
    match t {
        crate::expr::ParamTerm::Int(_) => Ok(()),
        crate::expr::ParamTerm::Fluent(f) => f.args.iter().try_for_each(check),
    }
}

/// An ordered collection of action schemas (spec.md §6 "Domain construction").
/// Schemas are immutable once the `Domain` is constructed.
#[derive(Clone, Debug, Default)]
pub struct Domain {
    pub schemas: Vec<ActionSchema>,
}

impl Domain {
    pub fn new(schemas: Vec<ActionSchema>) -> Self {
        Domain { schemas }
    }
}
