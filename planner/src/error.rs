//! Error taxonomy (spec.md §7). Construction-time errors (schema malformed,
//! type absent from the object pool) and the one runtime error kind (a
//! fluent read before it was ever written) are all fatal: there is no retry
//! and no partial result. "No plan exists" is *not* an error — `search::plan`
//! returns `Option<Plan>` for that case.

use crate::expr::FluentRef;
use crate::sym::Sym;
use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum PlannerError {
    /// A `Holed::Param(i)` in an action schema's preconditions or effects
    /// references a parameter position the schema does not declare.
    #[error("parameter index {0} referenced in a schema's preconditions/effects is not bound by any of its parameters")]
    UnboundParameter(usize),

    /// A schema parameter's declared type has no objects in the pool used
    /// to ground the problem (spec.md §7 "Type absent from object pool").
    #[error("type `{0}` has no objects in the object pool")]
    UnknownType(Sym),

    /// A fluent was read (in a precondition, goal or numeric effect) before
    /// any value was ever assigned to it (spec.md §7 "Fluent read before write").
    #[error("fluent {0} was read before any value was assigned to it")]
    UnknownFluent(FluentRef),
}
