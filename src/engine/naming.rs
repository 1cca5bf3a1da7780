//! Per-call variable naming.
//!
//! Every pada becomes a CSP variable named after its surface form. The same
//! surface form can occur more than once in a split (`ca ... ca`), so repeated
//! names get a numeric suffix:
//!
//! ```text
//! ca, rAmaH, ca  ──▶  ca, rAmaH, ca_1
//! ```
//!
//! A `NameTable` lives for one builder invocation only.

use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
pub(crate) struct NameTable {
    counters: HashMap<String, usize>,
    issued: HashSet<String>,
}

impl NameTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Return a name for `surface` not issued before by this table.
    pub(crate) fn unique(&mut self, surface: &str) -> String {
        let mut name = surface.to_string();
        while self.issued.contains(&name) {
            let counter = self.counters.entry(surface.to_string()).or_insert(0);
            *counter += 1;
            name = format!("{surface}_{counter}");
        }
        self.issued.insert(name.clone());
        name
    }
}
