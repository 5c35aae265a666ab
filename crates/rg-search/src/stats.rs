//! Search effort counters.

/// How much work one search did.  Returned alongside the route by
/// [`search`](crate::search) and logged at `debug` level after every query.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SearchStats {
    /// Entries taken off the frontier, stale ones included.
    pub popped:            usize,
    /// Popped entries discarded because their node was already finalized.
    pub stale_skipped:     usize,
    /// Nodes finalized and expanded (goal excluded).
    pub expanded:          usize,
    /// Entries pushed onto the frontier, the start included.
    pub pushed:            usize,
    /// Entries still queued when the search stopped.
    pub frontier_residual: usize,
}

impl SearchStats {
    /// Nodes handed to the visitation hook.
    pub fn visited(&self) -> usize {
        self.popped - self.stale_skipped
    }

    /// Share of pops that were stale duplicates, in `[0, 1]`.
    pub fn stale_ratio(&self) -> f64 {
        if self.popped == 0 {
            0.0
        } else {
            self.stale_skipped as f64 / self.popped as f64
        }
    }
}
