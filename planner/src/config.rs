//! Environment-tunable knobs for the search, in the style of
//! `planning/planning/src/classical/mod.rs`'s `static FOO: EnvParam<bool> =
//! EnvParam::new(...)` constants. Both default to "off", so default
//! behavior matches spec.md exactly (no cancellation, full tracing verbosity
//! left to the caller's subscriber).

use env_param::EnvParam;

/// Optional cap on the number of states `search::plan` will expand before
/// giving up and returning `None`, honouring spec.md §5's "wrapper may
/// impose... node-count limits by polling between expansions" at the loop
/// boundary between an expansion and the next pop. `0` means unlimited.
pub static NODE_LIMIT: EnvParam<u64> = EnvParam::new("ARIES_PLANNER_NODE_LIMIT", "0");

/// When set, emits a `tracing::trace!` event for every node expansion in
/// addition to the summary `tracing::debug!` emitted at the end of a search.
pub static TRACE_EXPANSIONS: EnvParam<bool> = EnvParam::new("ARIES_PLANNER_TRACE", "false");
