//! Constraint engine.
//!
//! The engine is split into focused submodules:
//!
//! ```text
//! [Pada] ──┐
//!          │  PathConstrainer::build          (builder.rs)
//! rules ───┤    - validate candidates
//!          │    - one variable per pada       (naming.rs)
//!          │    - one constraint per rule
//!          v
//!      Problem<Candidate>                     (problem.rs)
//!          │
//!          v
//!      Problem::solve_all                     (search.rs)
//!          - backtracking, smallest domain first
//!          - check completed scopes, prune partial ones
//!          │
//!          v
//!      Vec<Morphology> + RunMetrics           (metrics.rs)
//! ```
//!
//! ## Responsibilities by module
//!
//! - `problem.rs`: the generic CSP definition: variables over borrowed
//!   domains, the [`Constraint`] trait and scoped registration.
//! - `search.rs`: exhaustive backtracking search returning every satisfying
//!   total assignment, optionally capped.
//! - `naming.rs`: per-call de-duplication of variable names.
//! - `builder.rs`: validation of padas and wiring of rules into a problem.
//! - `metrics.rs`: search counters and timings.
//!
//! Nothing here is shared between calls: each run builds its own name table
//! and problem, and options are borrowed for the run's duration.
//!
//! ## Debugging
//!
//! Rule outcomes and search steps are emitted as `tracing` events at the
//! `debug` and `trace` levels.

#[path = "engine/builder.rs"]
mod builder;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/naming.rs"]
mod naming;
#[path = "engine/problem.rs"]
mod problem;
#[path = "engine/search.rs"]
mod search;

pub(crate) use builder::PathConstrainer;
pub use metrics::{RunMetrics, SearchStats};
pub use problem::{Binding, Constraint, Problem, VarId};
pub use search::Solutions;
