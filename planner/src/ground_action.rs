//! Ground actions (spec.md §3): immutable once constructed.

use crate::expr::{FluentRef, NumOp, NumericCondition, Predicate, Term};
use crate::sym::Sym;
use std::fmt::{self, Display};

#[derive(Clone, Debug)]
pub struct GroundAction {
    pub schema_name: Sym,
    pub args: Vec<Sym>,
    pub pre_sym: Vec<Predicate>,
    pub pre_num: Vec<NumericCondition>,
    pub add: Vec<Predicate>,
    pub del: Vec<Predicate>,
    pub num_eff: Vec<(FluentRef, NumOp, Term)>,
}

impl Display for GroundAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.schema_name)?;
        for (i, a) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{a}")?;
        }
        write!(f, ")")
    }
}
