//! Constraint problem builder.
//!
//! Turns an ordered path of tagged padas into a [`Problem`] over their
//! candidates and runs it:
//!
//! ```text
//! [Pada]  ── validate ──▶ variables (NameTable)  ──▶ Problem
//!                         rules ──▶ RuleConstraint ─┘     │
//!                                                         v
//!                                   solve_all ──▶ assignments ──▶ Morphology
//! ```
//!
//! Validation happens before any search: a pada without candidates or a
//! candidate carrying two labels of one category is a contract violation and
//! fails the whole call.

use std::time::Instant;

use tracing::{debug, info};

use super::metrics::RunMetrics;
use super::naming::NameTable;
use super::problem::{Binding, Constraint, Problem, VarId};
use crate::api::{Assignment, Morphology};
use crate::tags::{Candidate, Pada};
use crate::{MorphError, Options, Result, Rule, Scope};

/// Adapts a [`Rule`] plus the call's options to the solver's [`Constraint`].
struct RuleConstraint<'r> {
    rule: &'r Rule,
    options: &'r Options,
}

impl Constraint<Candidate> for RuleConstraint<'_> {
    fn name(&self) -> &str {
        self.rule.name
    }

    fn check(&self, bindings: &[Binding<'_, Candidate>]) -> Result<bool> {
        let ok = (self.rule.check)(bindings, self.options)?;
        if !ok {
            debug!(rule = self.rule.name, "rule rejected binding");
        }
        Ok(ok)
    }

    fn prunes(&self) -> bool {
        self.rule.prune.is_some()
    }

    fn prune(&self, partial: &[Option<Binding<'_, Candidate>>]) -> Result<bool> {
        match self.rule.prune {
            Some(prune) => prune(partial, self.options),
            None => Ok(true),
        }
    }
}

/// Output of [`PathConstrainer::run`].
#[derive(Debug, Clone)]
pub(crate) struct RunResult {
    pub variables: Vec<String>,
    pub morphologies: Vec<Morphology>,
    pub metrics: RunMetrics,
}

/// Builds and solves the constraint problem for one path at a time.
#[derive(Debug)]
pub(crate) struct PathConstrainer<'a> {
    rules: &'a [Rule],
    options: &'a Options,
}

impl<'a> PathConstrainer<'a> {
    pub(crate) fn new(rules: &'a [Rule], options: &'a Options) -> Self {
        PathConstrainer { rules, options }
    }

    /// Names of the rules this constrainer registers.
    pub(crate) fn active_rule_names(&self) -> Vec<&'static str> {
        self.active_rules().map(|r| r.name).collect()
    }

    fn active_rules(&self) -> impl Iterator<Item = &'a Rule> + '_ {
        self.rules.iter().filter(|r| !self.options.disabled_rules.contains(r.id))
    }

    /// Validate `path` and build its problem. Returns the problem and the
    /// variable names in sequence order.
    pub(crate) fn build<'p>(&self, path: &'p [Pada]) -> Result<(Problem<'p, Candidate>, Vec<String>)>
    where
        'a: 'p,
    {
        for pada in path {
            if pada.candidates.is_empty() {
                return Err(MorphError::EmptyDomain { pada: pada.surface.clone() });
            }
            for candidate in &pada.candidates {
                candidate.tags.validate(&pada.surface)?;
            }
        }

        let mut names = NameTable::new();
        let mut problem = Problem::new();
        let mut ids: Vec<VarId> = Vec::with_capacity(path.len());
        for pada in path {
            let name = names.unique(&pada.surface);
            debug!(variable = %name, candidates = pada.candidates.len(), "added variable");
            ids.push(problem.add_variable(name, &pada.candidates));
        }

        for rule in self.active_rules() {
            let scope = match rule.scope {
                Scope::All => None,
                Scope::Sequence => Some(ids.clone()),
            };
            problem.add_constraint(RuleConstraint { rule, options: self.options }, scope)?;
        }

        debug!(
            variables = problem.variable_count(),
            constraints = problem.constraint_count(),
            search_space = %problem.search_space(),
            "built problem"
        );

        let variables = ids.iter().map(|&id| problem.variable_name(id).to_string()).collect();
        Ok((problem, variables))
    }

    /// Build and solve `path`.
    pub(crate) fn run(&self, path: &[Pada]) -> Result<RunResult> {
        let start = Instant::now();
        let (problem, variables) = self.build(path)?;
        let build = start.elapsed();

        let search_start = Instant::now();
        let solutions = problem.solve_all(self.options.max_solutions)?;
        let search = search_start.elapsed();

        let morphologies: Vec<Morphology> = solutions
            .assignments
            .iter()
            .map(|indices| Morphology {
                assignments: path
                    .iter()
                    .zip(&variables)
                    .zip(indices)
                    .map(|((pada, variable), &index)| Assignment {
                        variable: variable.clone(),
                        surface: pada.surface.clone(),
                        candidate: pada.candidates[index].clone(),
                    })
                    .collect(),
            })
            .collect();

        info!(
            padas = path.len(),
            solutions = morphologies.len(),
            nodes = solutions.stats.nodes,
            checks = solutions.stats.checks,
            "constrained path"
        );

        let metrics = RunMetrics {
            total: start.elapsed(),
            build,
            search,
            stats: solutions.stats,
            search_space: problem.search_space(),
        };

        Ok(RunResult { variables, morphologies, metrics })
    }
}
