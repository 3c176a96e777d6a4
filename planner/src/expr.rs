//! Expression model (spec.md §4.A): the vocabulary schemas and problems are
//! written in — ground predicates, fluent references, numeric terms and
//! effects — plus their schema-level, parameter-holed counterparts.

use crate::sym::Sym;
use smallvec::SmallVec;
use std::fmt::{self, Display};

/// Inline storage for up to 4 arguments before spilling to the heap; matches
/// the typical arity of STRIPS predicates/fluents in the worked examples
/// (gripper's `at-ball`/`pick-up` top out at 3).
pub type Args = SmallVec<[Sym; 4]>;

/// An ordered tuple `(head, arg1, …, argn)`. Two ground predicates are equal
/// iff all positions are equal; arity is fixed by `head` (spec.md §3).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Predicate {
    pub head: Sym,
    pub args: Args,
}

impl Predicate {
    pub fn new(head: impl Into<Sym>, args: impl IntoIterator<Item = Sym>) -> Self {
        Predicate {
            head: head.into(),
            args: args.into_iter().collect(),
        }
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.head)?;
        for a in &self.args {
            write!(f, " {a}")?;
        }
        write!(f, ")")
    }
}

/// A tuple `(function-head, arg1, …, argn)` naming a numeric cell. Nullary
/// fluents (empty `args`) are permitted (spec.md §3).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FluentRef {
    pub head: Sym,
    pub args: Args,
}

impl FluentRef {
    pub fn new(head: impl Into<Sym>, args: impl IntoIterator<Item = Sym>) -> Self {
        FluentRef {
            head: head.into(),
            args: args.into_iter().collect(),
        }
    }
}

impl Display for FluentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.head)?;
        for a in &self.args {
            write!(f, " {a}")?;
        }
        write!(f, ")")
    }
}

/// Either an integer literal or a fluent reference (spec.md §3 "Numeric term").
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Term {
    Int(i64),
    Fluent(FluentRef),
}

/// A comparison op applied to two numeric terms (spec.md §3).
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum CmpOp {
    Gt,
    Lt,
    Eq,
    Ge,
    Le,
}

impl CmpOp {
    pub fn eval(self, lhs: i64, rhs: i64) -> bool {
        match self {
            CmpOp::Gt => lhs > rhs,
            CmpOp::Lt => lhs < rhs,
            CmpOp::Eq => lhs == rhs,
            CmpOp::Ge => lhs >= rhs,
            CmpOp::Le => lhs <= rhs,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct NumericCondition {
    pub op: CmpOp,
    pub lhs: Term,
    pub rhs: Term,
}

/// The sign of a numeric assign-add effect (spec.md §3 "`+=`, `−=`").
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum NumOp {
    Add,
    Sub,
}

/// One ground effect (spec.md §3/§9): a delete is represented as an `Effect`
/// tagged negative rather than as a distinct predicate shape — the grounder
/// resolves its inner predicate exactly like an add.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Effect {
    Add(Predicate),
    Del(Predicate),
    Num(FluentRef, NumOp, Term),
}

/// A value that might already be known (`Full`) or is a schema parameter
/// waiting to be bound during grounding (`Param`), named after
/// `classical::Holed<A>` in the teacher's grounded-planning module.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Holed<A> {
    Full(A),
    Param(usize),
}

impl Holed<Sym> {
    fn bind(&self, params: &[Sym]) -> Sym {
        match self {
            Holed::Full(s) => s.clone(),
            Holed::Param(i) => params[*i].clone(),
        }
    }
}

/// A predicate written in a schema: each argument is either a bound
/// constant or a schema parameter index.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParamPredicate {
    pub head: Sym,
    pub args: SmallVec<[Holed<Sym>; 4]>,
}

impl ParamPredicate {
    pub fn bind(&self, params: &[Sym]) -> Predicate {
        Predicate::new(self.head.clone(), self.args.iter().map(|h| h.bind(params)))
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParamFluentRef {
    pub head: Sym,
    pub args: SmallVec<[Holed<Sym>; 4]>,
}

impl ParamFluentRef {
    pub fn bind(&self, params: &[Sym]) -> FluentRef {
        FluentRef::new(self.head.clone(), self.args.iter().map(|h| h.bind(params)))
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParamTerm {
    Int(i64),
    Fluent(ParamFluentRef),
}

impl ParamTerm {
    pub fn bind(&self, params: &[Sym]) -> Term {
        match self {
            ParamTerm::Int(i) => Term::Int(*i),
            ParamTerm::Fluent(f) => Term::Fluent(f.bind(params)),
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParamNumericCondition {
    pub op: CmpOp,
    pub lhs: ParamTerm,
    pub rhs: ParamTerm,
}

impl ParamNumericCondition {
    pub fn bind(&self, params: &[Sym]) -> NumericCondition {
        NumericCondition {
            op: self.op,
            lhs: self.lhs.bind(params),
            rhs: self.rhs.bind(params),
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParamEffect {
    Add(ParamPredicate),
    Del(ParamPredicate),
    Num(ParamFluentRef, NumOp, ParamTerm),
}

impl ParamEffect {
    pub fn bind(&self, params: &[Sym]) -> Effect {
        match self {
            ParamEffect::Add(p) => Effect::Add(p.bind(params)),
            ParamEffect::Del(p) => Effect::Del(p.bind(params)),
            ParamEffect::Num(f, op, t) => Effect::Num(f.bind(params), *op, t.bind(params)),
        }
    }
}

/// Makes the given parameterized predicate a delete effect, mirroring the
/// source's `neg(effect)` helper (`examples/original_source/pyddl/pyddl.py`).
pub fn neg(predicate: ParamPredicate) -> ParamEffect {
    ParamEffect::Del(predicate)
}
