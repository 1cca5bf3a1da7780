//! Run metrics.
//!
//! Counters collected by the backtracking search and timings for one
//! constrained path. They are cheap to collect and always on; the API only
//! surfaces them through the verbose entry point.

use std::time::Duration;

/// Counters from one search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Value assignments tried.
    pub nodes: u64,
    /// Constraint evaluations (`check` and `prune`).
    pub checks: u64,
    /// Partial assignments rejected by a pruning hook.
    pub prunes: u64,
    /// Assignments rejected before descending further.
    pub backtracks: u64,
    /// Solutions collected.
    pub solutions: usize,
}

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for the run.
    pub total: Duration,
    /// Time spent validating padas and registering variables/constraints.
    pub build: Duration,
    /// Time spent in the search.
    pub search: Duration,
    pub stats: SearchStats,
    /// Product of all domain sizes.
    pub search_space: u128,
}
