//! Constraint-satisfaction problem definition.
//!
//! A [`Problem`] is a list of named variables, each ranging over a finite
//! domain borrowed from the caller, plus n-ary [`Constraint`]s bound to an
//! ordered subset of those variables. Solving lives in `search.rs`.
//!
//! ```text
//! Problem
//!   variables:   [ v0: &[V] , v1: &[V] , v2: &[V] ]
//!   constraints: [ c0 over (all)      ,
//!                  c1 over (v0,v1,v2) ]
//! ```
//!
//! A constraint registered without a scope is bound to every variable in
//! insertion order at solve time, so variables added after it are covered
//! too.

use std::fmt;

use crate::{MorphError, Result};

/// Handle to a variable of a [`Problem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub(crate) usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A variable name paired with the value currently assigned to it.
#[derive(Debug)]
pub struct Binding<'a, V> {
    pub name: &'a str,
    pub value: &'a V,
}

impl<V> Clone for Binding<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Binding<'_, V> {}

/// An n-ary predicate over the values bound to its scope, in scope order.
pub trait Constraint<V> {
    /// Name used in traces.
    fn name(&self) -> &str;

    /// Decide a fully bound scope. `Err` aborts the search.
    fn check(&self, bindings: &[Binding<'_, V>]) -> Result<bool>;

    /// Whether [`Constraint::prune`] can reject partial bindings.
    fn prunes(&self) -> bool {
        false
    }

    /// Reject a partially bound scope early. Unbound positions are `None`.
    ///
    /// Must only return `false` when no completion could satisfy
    /// [`Constraint::check`].
    fn prune(&self, _partial: &[Option<Binding<'_, V>>]) -> Result<bool> {
        Ok(true)
    }
}

pub(crate) struct Variable<'p, V> {
    pub name: String,
    pub domain: &'p [V],
}

pub(crate) struct Registered<'p, V> {
    pub constraint: Box<dyn Constraint<V> + 'p>,
    pub scope: Option<Vec<VarId>>,
}

/// Variables, domains and constraints for one solve.
pub struct Problem<'p, V> {
    pub(crate) variables: Vec<Variable<'p, V>>,
    pub(crate) constraints: Vec<Registered<'p, V>>,
}

impl<'p, V> Problem<'p, V> {
    pub fn new() -> Self {
        Problem { variables: Vec::new(), constraints: Vec::new() }
    }

    /// Add a variable ranging over `domain`.
    pub fn add_variable(&mut self, name: impl Into<String>, domain: &'p [V]) -> VarId {
        self.variables.push(Variable { name: name.into(), domain });
        VarId(self.variables.len() - 1)
    }

    /// Register `constraint` over `scope`, or over every variable when `None`.
    pub fn add_constraint<C>(&mut self, constraint: C, scope: Option<Vec<VarId>>) -> Result<()>
    where
        C: Constraint<V> + 'p,
    {
        if let Some(ids) = &scope {
            if let Some(bad) = ids.iter().find(|id| id.0 >= self.variables.len()) {
                return Err(MorphError::UnknownVariable { id: bad.0 });
            }
        }
        self.constraints.push(Registered { constraint: Box::new(constraint), scope });
        Ok(())
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn variable_name(&self, id: VarId) -> &str {
        &self.variables[id.0].name
    }

    /// Product of all domain sizes: an upper bound on the solution count.
    pub fn search_space(&self) -> u128 {
        self.variables.iter().fold(1u128, |acc, v| acc.saturating_mul(v.domain.len() as u128))
    }

    /// Resolve a constraint's scope to concrete variables.
    pub(crate) fn scope_of(&self, registered: &Registered<'p, V>) -> Vec<VarId> {
        match &registered.scope {
            Some(ids) => ids.clone(),
            None => (0..self.variables.len()).map(VarId).collect(),
        }
    }
}

impl<V> Default for Problem<'_, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for Problem<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.variables.iter().map(|v| v.name.as_str()).collect();
        let constraints: Vec<&str> = self.constraints.iter().map(|c| c.constraint.name()).collect();
        f.debug_struct("Problem").field("variables", &names).field("constraints", &constraints).finish()
    }
}
