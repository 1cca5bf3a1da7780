use crate::engine::{self, RunMetrics};
use crate::tags::{Candidate, Pada};
use crate::{Result, Rule, RuleMask};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

static DEFAULT_RULES: Lazy<Vec<Rule>> = Lazy::new(crate::rules::morph::rules::get);

/// What to do with a case-inflected pada that has neither a gender nor the
/// numeral marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenderlessCase {
    /// Treat it as malformed input ([`MorphError::MissingCategory`](crate::MorphError)).
    #[default]
    Reject,
    /// Exempt it from gender/number agreement, like a numeral.
    Exempt,
}

/// Options that affect rule evaluation.
///
/// A value is borrowed for the duration of one call; nothing is global.
#[derive(Debug, Clone)]
pub struct Options {
    /// Require exactly one finite verb (otherwise at most one).
    pub require_lakara: bool,
    /// Stop after this many solutions.
    pub max_solutions: Option<usize>,
    pub genderless_case: GenderlessCase,
    /// Rules to leave out of the problem.
    pub disabled_rules: RuleMask,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            require_lakara: false,
            max_solutions: None,
            genderless_case: GenderlessCase::default(),
            disabled_rules: RuleMask::empty(),
        }
    }
}

/// One pada's chosen analysis within a [`Morphology`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    /// CSP variable name (the surface form, suffixed when repeated).
    pub variable: String,
    pub surface: String,
    pub candidate: Candidate,
}

/// A consistent choice of one candidate per pada, in sequence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Morphology {
    pub assignments: Vec<Assignment>,
}

impl Morphology {
    /// The candidate chosen for `variable`.
    pub fn get(&self, variable: &str) -> Option<&Candidate> {
        self.assignments.iter().find(|a| a.variable == variable).map(|a| &a.candidate)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter()
    }
}

/// Result of [`constrain_path`] and [`constrain_path_with`].
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Variable names in sequence order.
    pub variables: Vec<String>,
    /// Every consistent morphology. Empty when none exists. Order is not
    /// meaningful.
    pub morphologies: Vec<Morphology>,
    pub elapsed: Duration,
}

impl Analysis {
    pub fn is_valid(&self) -> bool {
        !self.morphologies.is_empty()
    }
}

/// Extra details returned by [`constrain_path_verbose_with`].
#[derive(Debug, Clone)]
pub struct AnalysisDetails {
    pub metrics: RunMetrics,
    /// Names of the rules registered for the run.
    pub active_rules: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AnalysisVerbose {
    pub analysis: Analysis,
    pub details: AnalysisDetails,
}

/// Constrain `path` with default [`Options`].
pub fn constrain_path(path: &[Pada]) -> Result<Analysis> {
    constrain_path_with(path, &Options::default())
}

/// Constrain `path`: build one variable per pada over its candidates, apply
/// every enabled rule and return all consistent morphologies.
///
/// Fails only on malformed input (a pada without candidates, or a candidate
/// with conflicting or missing categories).
pub fn constrain_path_with(path: &[Pada], options: &Options) -> Result<Analysis> {
    Ok(constrain_path_verbose_with(path, options)?.analysis)
}

/// Like [`constrain_path_with`], also returning search metrics.
pub fn constrain_path_verbose_with(path: &[Pada], options: &Options) -> Result<AnalysisVerbose> {
    let constrainer = engine::PathConstrainer::new(&DEFAULT_RULES, options);
    let active_rules = constrainer.active_rule_names().into_iter().map(str::to_string).collect();
    let run = constrainer.run(path)?;

    let analysis = Analysis { variables: run.variables, morphologies: run.morphologies, elapsed: run.metrics.total };
    Ok(AnalysisVerbose { analysis, details: AnalysisDetails { metrics: run.metrics, active_rules } })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MorphError;

    fn pada(surface: &str, stem: &str, labels: &[&str]) -> Pada {
        Pada::new(surface, vec![Candidate::from_labels(stem, labels)])
    }

    #[test]
    fn constrain_path_returns_named_assignments() {
        let path = vec![
            pada("rAmaH", "rAma", &["praTamAviBaktiH", "ekavacanam", "puMlliNgam"]),
            pada("gacCati", "gam", &["law", "ekavacanam", "praTamapuruzaH"]),
        ];

        let res = constrain_path(&path).unwrap();
        assert_eq!(res.variables, vec!["rAmaH", "gacCati"]);
        assert!(res.is_valid());

        let morph = &res.morphologies[0];
        assert_eq!(morph.get("gacCati").unwrap().stem, "gam");
        assert_eq!(morph.iter().map(|a| a.surface.as_str()).collect::<Vec<_>>(), vec!["rAmaH", "gacCati"]);
    }

    #[test]
    fn verbose_reports_metrics_and_rules() {
        let path = vec![pada("vanam", "vana", &["dvitIyAviBaktiH", "ekavacanam", "napuMsakaliNgam"])];
        let res = constrain_path_verbose_with(&path, &Options::default()).unwrap();

        assert_eq!(res.details.active_rules.len(), 6);
        assert_eq!(res.details.metrics.search_space, 1);
        assert_eq!(res.details.metrics.stats.solutions, 1);
        assert!(res.details.metrics.build <= res.details.metrics.total);
    }

    #[test]
    fn disabled_rules_are_not_registered() {
        let options =
            Options { disabled_rules: RuleMask::FINAL_PADA | RuleMask::SAMASA_CONTINUATION, ..Options::default() };
        let path = vec![pada("rAma", "rAma", &["samAsapUrvapadanAmapadam"])];

        let res = constrain_path_verbose_with(&path, &options).unwrap();
        assert_eq!(res.details.active_rules.len(), 4);
        assert_eq!(res.analysis.morphologies.len(), 1);
    }

    #[test]
    fn empty_candidate_list_is_a_contract_violation() {
        let path = vec![Pada::new("kaH", Vec::new())];
        let err = constrain_path(&path).unwrap_err();
        assert!(matches!(err, MorphError::EmptyDomain { ref pada } if pada == "kaH"));
    }

    #[test]
    fn max_solutions_caps_results() {
        let path = vec![Pada::new(
            "Palam",
            vec![
                Candidate::from_labels("Pala", ["dvitIyAviBaktiH", "ekavacanam", "napuMsakaliNgam"]),
                Candidate::from_labels("Pala", ["praTamAviBaktiH", "ekavacanam", "napuMsakaliNgam"]),
            ],
        )];
        let options = Options { max_solutions: Some(1), ..Options::default() };

        assert_eq!(constrain_path(&path).unwrap().morphologies.len(), 2);
        assert_eq!(constrain_path_with(&path, &options).unwrap().morphologies.len(), 1);
    }
}
