//! The statistics surface (spec.md §6): states expanded, elapsed time, time
//! per expansion, plan length. Emission is the caller's concern (this crate
//! only logs through `tracing`); collection is always populated.

use std::time::Duration;

#[derive(Clone, Copy, Debug, Default)]
pub struct SearchStats {
    pub expanded: usize,
    pub elapsed: Duration,
    pub plan_len: Option<u32>,
}

impl SearchStats {
    pub fn time_per_expansion(&self) -> Duration {
        if self.expanded == 0 {
            Duration::ZERO
        } else {
            self.elapsed / self.expanded as u32
        }
    }
}
