//! Morphological agreement checking for segmented Sanskrit sentences.
//!
//! A sandhi split is a sequence of padas, each with a finite set of candidate
//! analyses (stem + grammatical tags). This crate turns such a sequence into a
//! constraint-satisfaction problem (one variable per pada, domain = its
//! candidates) constrained by six agreement rules, and returns every
//! consistent combination of analyses.
//!
//! ```
//! use sanskrit_morph::{Candidate, Pada, constrain_path};
//!
//! let path = vec![
//!     Pada::new("rAmaH", vec![Candidate::from_labels("rAma", ["praTamAviBaktiH", "ekavacanam", "puMlliNgam"])]),
//!     Pada::new("gacCati", vec![Candidate::from_labels("gam", ["law", "ekavacanam", "praTamapuruzaH"])]),
//! ];
//!
//! let analysis = constrain_path(&path).unwrap();
//! assert_eq!(analysis.morphologies.len(), 1);
//! ```

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod input;
mod rules;
mod tags;

pub use api::{
    Analysis, AnalysisDetails, AnalysisVerbose, Assignment, GenderlessCase, Morphology, Options, constrain_path,
    constrain_path_verbose_with, constrain_path_with,
};
pub use engine::{Binding, Constraint, Problem, RunMetrics, SearchStats, Solutions, VarId};
pub use error::{MorphError, Result};
pub use input::{parse_json_paths, parse_paths, parse_text_paths};
pub use tags::{Candidate, Category, Lakara, LakaraForm, Linga, Pada, Puruza, Tag, TagFlags, TagSet, Vacana, Vibhakti};

// --- Rules ------------------------------------------------------------------

/// A pada variable bound to one candidate analysis.
pub(crate) type Bound<'a> = Binding<'a, Candidate>;

pub(crate) type Check = fn(&[Bound<'_>], &Options) -> Result<bool>;

pub(crate) type Prune = fn(&[Option<Bound<'_>>], &Options) -> Result<bool>;

/// Which variables a rule is registered over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    /// No explicit variable list; the solver binds every variable.
    All,
    /// The full ordered list of pada variables.
    Sequence,
}

bitflags::bitflags! {
    /// Identifies rules, e.g. to switch some of them off via [`Options`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RuleMask: u8 {
        const SINGLE_LAKARA        = 1 << 0;
        const FINAL_PADA           = 1 << 1;
        const UPASARGA             = 1 << 2;
        const PRATHAMA_AGREEMENT   = 1 << 3;
        const VIBHAKTI_AGREEMENT   = 1 << 4;
        const SAMASA_CONTINUATION  = 1 << 5;
    }
}

impl RuleMask {
    /// Look up a rule by its short name (as used on the command line).
    pub fn from_rule_name(name: &str) -> Option<RuleMask> {
        match name {
            "single-lakara" => Some(RuleMask::SINGLE_LAKARA),
            "final-pada" => Some(RuleMask::FINAL_PADA),
            "upasarga" => Some(RuleMask::UPASARGA),
            "prathama-agreement" => Some(RuleMask::PRATHAMA_AGREEMENT),
            "vibhakti-agreement" => Some(RuleMask::VIBHAKTI_AGREEMENT),
            "samasa-continuation" => Some(RuleMask::SAMASA_CONTINUATION),
            _ => None,
        }
    }
}

/// A morphological rule: a name, the variables it is registered over and the
/// predicate deciding whether a binding of those variables is admissible.
pub(crate) struct Rule {
    pub name: &'static str,
    pub id: RuleMask,
    pub scope: Scope,
    pub check: Check,
    /// Optional early rejection of partial bindings.
    pub prune: Option<Prune>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("scope", &self.scope)
            .field("check", &"<function>")
            .field("prune", &self.prune.map(|_| "<function>"))
            .finish()
    }
}
