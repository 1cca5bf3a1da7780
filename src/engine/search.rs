//! Backtracking search over a [`Problem`].
//!
//! Variables are assigned one at a time in a fixed order (smallest domain
//! first, ties broken by insertion order). After each assignment the search
//! evaluates:
//!
//! - every constraint whose scope just became fully bound (`check`), and
//! - every pruning constraint whose scope is now partially bound (`prune`).
//!
//! ```text
//! depth 0: v1 = a ── ok ──▶ depth 1: v0 = x ── check c1 ✗ (backtrack)
//!                                     v0 = y ── check c1 ✓ ──▶ depth 2 ...
//! ```
//!
//! The search is exhaustive unless a solution limit is given. Solutions are
//! reported as one domain index per variable, in variable order.

use tracing::trace;

use super::metrics::SearchStats;
use super::problem::{Binding, Problem, VarId};
use crate::Result;

/// A total assignment: `indices[v]` is the chosen position in variable `v`'s domain.
pub type Assignment = Vec<usize>;

/// Output of [`Problem::solve_all`].
#[derive(Debug, Clone, Default)]
pub struct Solutions {
    pub assignments: Vec<Assignment>,
    pub stats: SearchStats,
}

/// Which constraints to evaluate once the variable at a given depth is bound.
#[derive(Debug, Default, Clone)]
struct DepthPlan {
    complete: Vec<usize>,
    partial: Vec<usize>,
}

struct Search<'s, 'p, V> {
    problem: &'s Problem<'p, V>,
    order: Vec<VarId>,
    scopes: Vec<Vec<VarId>>,
    plan: Vec<DepthPlan>,
    chosen: Vec<Option<usize>>,
    limit: Option<usize>,
    found: Vec<Assignment>,
    stats: SearchStats,
}

impl<'p, V> Problem<'p, V> {
    /// Find every total assignment satisfying all constraints.
    ///
    /// `limit` caps the number of solutions collected. A problem without
    /// variables, or with an empty domain, has no solutions.
    pub fn solve_all(&self, limit: Option<usize>) -> Result<Solutions> {
        if self.variables.is_empty() || self.variables.iter().any(|v| v.domain.is_empty()) {
            return Ok(Solutions::default());
        }

        let mut order: Vec<VarId> = (0..self.variables.len()).map(VarId).collect();
        order.sort_by_key(|id| self.variables[id.index()].domain.len());

        let mut depth_of = vec![0usize; self.variables.len()];
        for (depth, id) in order.iter().enumerate() {
            depth_of[id.index()] = depth;
        }

        let scopes: Vec<Vec<VarId>> = self.constraints.iter().map(|c| self.scope_of(c)).collect();
        let mut plan = vec![DepthPlan::default(); order.len()];
        for (cid, scope) in scopes.iter().enumerate() {
            let mut depths: Vec<usize> = scope.iter().map(|id| depth_of[id.index()]).collect();
            depths.sort_unstable();
            depths.dedup();
            let last = depths.pop().unwrap_or(0);
            plan[last].complete.push(cid);
            if self.constraints[cid].constraint.prunes() {
                for d in depths {
                    plan[d].partial.push(cid);
                }
            }
        }

        let mut search = Search {
            problem: self,
            chosen: vec![None; self.variables.len()],
            order,
            scopes,
            plan,
            limit,
            found: Vec::new(),
            stats: SearchStats::default(),
        };
        search.descend(0)?;
        search.stats.solutions = search.found.len();

        Ok(Solutions { assignments: search.found, stats: search.stats })
    }
}

impl<V> Search<'_, '_, V> {
    fn limit_reached(&self) -> bool {
        self.limit.is_some_and(|limit| self.found.len() >= limit)
    }

    fn descend(&mut self, depth: usize) -> Result<()> {
        if depth == self.order.len() {
            let assignment: Assignment = self.chosen.iter().map(|c| c.unwrap_or_default()).collect();
            trace!(solution = ?assignment, "solution found");
            self.found.push(assignment);
            return Ok(());
        }

        let var = self.order[depth];
        let domain_len = self.problem.variables[var.index()].domain.len();

        for value in 0..domain_len {
            if self.limit_reached() {
                break;
            }
            self.chosen[var.index()] = Some(value);
            self.stats.nodes += 1;

            if self.consistent(depth)? {
                self.descend(depth + 1)?;
            } else {
                self.stats.backtracks += 1;
            }
        }

        self.chosen[var.index()] = None;
        Ok(())
    }

    fn consistent(&mut self, depth: usize) -> Result<bool> {
        let problem = self.problem;
        let plan = &self.plan[depth];

        for &cid in &plan.complete {
            let bindings: Vec<Binding<'_, V>> =
                self.scopes[cid].iter().filter_map(|&id| binding(problem, &self.chosen, id)).collect();
            let constraint = &problem.constraints[cid].constraint;
            self.stats.checks += 1;
            if !constraint.check(&bindings)? {
                trace!(constraint = constraint.name(), depth, "constraint rejected assignment");
                return Ok(false);
            }
        }

        for &cid in &plan.partial {
            let partial: Vec<Option<Binding<'_, V>>> =
                self.scopes[cid].iter().map(|&id| binding(problem, &self.chosen, id)).collect();
            let constraint = &problem.constraints[cid].constraint;
            self.stats.checks += 1;
            if !constraint.prune(&partial)? {
                self.stats.prunes += 1;
                trace!(constraint = constraint.name(), depth, "constraint pruned partial assignment");
                return Ok(false);
            }
        }

        Ok(true)
    }
}

fn binding<'s, V>(problem: &'s Problem<'_, V>, chosen: &[Option<usize>], id: VarId) -> Option<Binding<'s, V>> {
    let variable = &problem.variables[id.index()];
    let index = chosen[id.index()]?;
    Some(Binding { name: variable.name.as_str(), value: &variable.domain[index] })
}
