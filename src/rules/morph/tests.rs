use std::collections::HashSet;

use crate::engine::{Binding, PathConstrainer};
use crate::rules::morph::predicates::{has_lakara, is_disallowed_final, is_sankhya};
use crate::rules::morph::rules;
use crate::tags::{Category, Candidate, Pada};
use crate::{
    GenderlessCase, MorphError, Morphology, Options, Rule, RuleMask, constrain_path, constrain_path_with,
    parse_text_paths,
};

fn pada(surface: &str, stem: &str, labels: &[&str]) -> Pada {
    Pada::new(surface, vec![Candidate::from_labels(stem, labels)])
}

fn solutions(path: &[Pada], options: &Options) -> usize {
    constrain_path_with(path, options).unwrap().morphologies.len()
}

fn need_lakara() -> Options {
    Options { require_lakara: true, ..Options::default() }
}

#[test]
fn subject_and_verb_agree_in_number() {
    let path = vec![
        pada("rAmaH", "rAma", &["praTamAviBaktiH", "ekavacanam", "puMlliNgam"]),
        pada("gacCati", "gam", &["law", "ekavacanam", "praTamapuruzaH"]),
    ];
    assert_eq!(solutions(&path, &Options::default()), 1);
}

#[test]
fn subject_and_verb_number_mismatch_has_no_solution() {
    let path = vec![
        pada("rAmaH", "rAma", &["praTamAviBaktiH", "ekavacanam", "puMlliNgam"]),
        pada("gacCanti", "gam", &["law", "bahuvacanam", "praTamapuruzaH"]),
    ];
    let res = constrain_path(&path).unwrap();
    assert!(res.morphologies.is_empty());
}

#[test]
fn lone_compound_member_has_no_solution() {
    let path = vec![pada("rAma", "rAma", &["samAsapUrvapadanAmapadam"])];
    assert_eq!(solutions(&path, &Options::default()), 0);
}

#[test]
fn preverb_followed_by_non_verb_has_no_solution() {
    let path = vec![
        pada("pra", "pra", &["upasargaH"]),
        pada("vanam", "vana", &["dvitIyAviBaktiH", "ekavacanam", "napuMsakaliNgam"]),
    ];
    assert_eq!(solutions(&path, &Options::default()), 0);

    let with_verb = vec![
        pada("pra", "pra", &["upasargaH"]),
        pada("gacCati", "gam", &["law", "ekavacanam", "praTamapuruzaH"]),
    ];
    assert_eq!(solutions(&with_verb, &Options::default()), 1);
}

#[test]
fn preverb_or_compound_member_cannot_end_the_sentence_on_its_own() {
    // Without the final-pada rule the look-ahead of the preverb and compound
    // rules must still reject a missing successor.
    let options = Options { disabled_rules: RuleMask::FINAL_PADA, ..Options::default() };

    let preverb = vec![pada("pra", "pra", &["upasargaH"])];
    assert_eq!(solutions(&preverb, &options), 0);

    let member = vec![pada("rAma", "rAma", &["samAsapUrvapadanAmapadam"])];
    assert_eq!(solutions(&member, &options), 0);

    let trailing = vec![
        pada("gacCati", "gam", &["law", "ekavacanam", "praTamapuruzaH"]),
        pada("pra", "pra", &["upasargaH"]),
    ];
    assert_eq!(solutions(&trailing, &options), 0);
}

#[test]
fn required_lakara_without_verb_has_no_solution() {
    let path = vec![pada("vanam", "vana", &["praTamAviBaktiH", "ekavacanam", "napuMsakaliNgam"])];
    assert_eq!(solutions(&path, &Options::default()), 1);
    assert_eq!(solutions(&path, &need_lakara()), 0);
}

#[test]
fn at_most_one_lakara_unless_required() {
    let path = vec![
        pada("gacCati", "gam", &["law", "ekavacanam", "praTamapuruzaH"]),
        pada("paWati", "paW", &["law", "ekavacanam", "praTamapuruzaH"]),
    ];
    assert_eq!(solutions(&path, &Options::default()), 0);
    assert_eq!(solutions(&path, &need_lakara()), 0);
}

#[test]
fn lakara_choice_is_pruned_to_a_single_verb() {
    // Each pada is ambiguous between a verb and a nominal reading.
    let ambiguous = |surface: &str| {
        Pada::new(
            surface,
            vec![
                Candidate::from_labels("BU", ["law", "ekavacanam", "praTamapuruzaH"]),
                Candidate::from_labels("Bava", ["saptamIviBaktiH", "ekavacanam", "puMlliNgam"]),
            ],
        )
    };
    let path = vec![ambiguous("Bavati"), ambiguous("Bave")];

    let res = constrain_path(&path).unwrap();
    // Two nominal readings, or exactly one verb reading.
    assert_eq!(res.morphologies.len(), 3);
    assert_eq!(solutions(&path, &need_lakara()), 2);
}

#[test]
fn madhyama_verb_requires_yuzmad_subject() {
    let verb = pada("gacCasi", "gam", &["law", "ekavacanam", "maDyamapuruzaH"]);
    let tvam = pada("tvam", "yuzmad", &["praTamAviBaktiH", "ekavacanam", "puMlliNgam"]);
    let ramah = pada("rAmaH", "rAma", &["praTamAviBaktiH", "ekavacanam", "puMlliNgam"]);

    assert_eq!(solutions(&[tvam, verb.clone()], &Options::default()), 1);
    assert_eq!(solutions(&[ramah, verb], &Options::default()), 0);
}

#[test]
fn uttama_verb_requires_asmad_subject() {
    let verb = pada("gacCAmi", "gam", &["law", "ekavacanam", "uttamapuruzaH"]);
    let aham = pada("aham", "asmad", &["praTamAviBaktiH", "ekavacanam", "puMlliNgam"]);
    let tvam = pada("tvam", "yuzmad", &["praTamAviBaktiH", "ekavacanam", "puMlliNgam"]);

    assert_eq!(solutions(&[aham, verb.clone()], &Options::default()), 1);
    assert_eq!(solutions(&[tvam, verb], &Options::default()), 0);
}

#[test]
fn same_case_padas_agree_in_gender_and_number() {
    let ramah = pada("rAmaH", "rAma", &["praTamAviBaktiH", "ekavacanam", "puMlliNgam"]);
    let vanam = pada("vanam", "vana", &["praTamAviBaktiH", "ekavacanam", "napuMsakaliNgam"]);
    let dirghah = pada("dIrGaH", "dIrGa", &["praTamAviBaktiH", "ekavacanam", "puMlliNgam"]);

    assert_eq!(solutions(&[ramah.clone(), dirghah], &Options::default()), 1);
    assert_eq!(solutions(&[ramah, vanam], &Options::default()), 0);
}

#[test]
fn different_cases_do_not_interact() {
    let path = vec![
        pada("rAmaH", "rAma", &["praTamAviBaktiH", "ekavacanam", "puMlliNgam"]),
        pada("vanAni", "vana", &["dvitIyAviBaktiH", "bahuvacanam", "napuMsakaliNgam"]),
    ];
    assert_eq!(solutions(&path, &Options::default()), 1);
}

#[test]
fn numeral_without_gender_is_exempt_from_case_agreement() {
    let path = vec![
        pada("paYca", "paYcan", &["praTamAviBaktiH", "bahuvacanam", "saNKyA"]),
        pada("rAmaH", "rAma", &["praTamAviBaktiH", "ekavacanam", "puMlliNgam"]),
    ];
    assert_eq!(solutions(&path, &Options::default()), 1);
}

#[test]
fn genderless_case_follows_options() {
    let path = vec![pada("aham", "asmad", &["praTamAviBaktiH", "ekavacanam"])];

    let err = constrain_path(&path).unwrap_err();
    assert!(matches!(err, MorphError::MissingCategory { category: Category::Linga, .. }));

    let exempt = Options { genderless_case: GenderlessCase::Exempt, ..Options::default() };
    assert_eq!(solutions(&path, &exempt), 1);
}

#[test]
fn compound_member_continues_into_nominal() {
    let path = vec![
        pada("rAma", "rAma", &["samAsapUrvapadanAmapadam"]),
        pada("lakzmaRa", "lakzmaRa", &["samAsapUrvapadanAmapadam"]),
        pada("BaratAH", "Barata", &["praTamAviBaktiH", "bahuvacanam", "puMlliNgam"]),
    ];
    assert_eq!(solutions(&path, &Options::default()), 1);

    let into_verb = vec![
        pada("rAma", "rAma", &["samAsapUrvapadanAmapadam"]),
        pada("gacCati", "gam", &["law", "ekavacanam", "praTamapuruzaH"]),
    ];
    assert_eq!(solutions(&into_verb, &Options::default()), 0);
}

#[test]
fn conflicting_labels_are_rejected_before_search() {
    let path = vec![pada("Pale", "Pala", &["praTamAviBaktiH", "saptamIviBaktiH", "ekavacanam", "napuMsakaliNgam"])];
    let err = constrain_path(&path).unwrap_err();
    let MorphError::ConflictingCategory { pada, category, .. } = err else {
        panic!("expected a conflicting category error");
    };
    assert_eq!(pada, "Pale");
    assert_eq!(category, Category::Vibhakti);
}

#[test]
fn verb_without_vacana_is_a_contract_violation() {
    let path = vec![pada("gacCati", "gam", &["law", "praTamapuruzaH"])];
    let err = constrain_path(&path).unwrap_err();
    assert!(matches!(err, MorphError::MissingCategory { category: Category::Vacana, .. }));
}

#[test]
fn repeated_surface_forms_get_distinct_variables() {
    let ca = pada("ca", "ca", &["avyayam"]);
    let path = vec![ca.clone(), pada("rAmaH", "rAma", &["praTamAviBaktiH", "ekavacanam", "puMlliNgam"]), ca];

    let res = constrain_path(&path).unwrap();
    assert_eq!(res.variables, vec!["ca", "rAmaH", "ca_1"]);
    assert!(res.morphologies[0].get("ca_1").is_some());
}

const SENTENCE: &str = "
rAmaH: rAma{praTamAviBaktiH ekavacanam puMlliNgam} | rAma{saMboDanaviBaktiH ekavacanam puMlliNgam}
vanam: vana{praTamAviBaktiH ekavacanam napuMsakaliNgam} | vana{dvitIyAviBaktiH ekavacanam napuMsakaliNgam}
dve: dvi{praTamAviBaktiH dvivacanam saNKyA} | dvi{dvitIyAviBaktiH dvivacanam saNKyA}
gacCati: gam{law ekavacanam praTamapuruzaH} | gacCat{saptamIviBaktiH ekavacanam puMlliNgam}
";

fn sentence() -> Vec<Pada> {
    parse_text_paths(SENTENCE).unwrap().remove(0)
}

#[test]
fn every_solution_satisfies_the_rules() {
    let path = sentence();
    let res = constrain_path(&path).unwrap();
    assert!(!res.morphologies.is_empty());

    let product: usize = path.iter().map(|p| p.candidates.len()).product();
    assert!(res.morphologies.len() <= product);

    for morph in &res.morphologies {
        let chosen: Vec<&Candidate> = morph.iter().map(|a| &a.candidate).collect();

        assert!(chosen.iter().filter(|c| has_lakara(c)).count() <= 1);
        assert!(!is_disallowed_final(chosen[chosen.len() - 1]));

        let mut concord = std::collections::HashMap::new();
        for c in chosen.iter().filter(|c| !is_sankhya(c)) {
            let tags = &c.tags;
            let (v, l, n) = (tags.vibhaktis().next(), tags.lingas().next(), tags.vacanas().next());
            if let (Some(v), Some(l), Some(n)) = (v, l, n) {
                let first = concord.entry(v).or_insert((l, n));
                assert_eq!(*first, (l, n));
            }
        }
    }
}

#[test]
fn rerunning_yields_the_same_solution_set() {
    let path = sentence();
    let key = |res: crate::Analysis| -> HashSet<Vec<String>> {
        res.morphologies.iter().map(|m| m.iter().map(|a| a.candidate.to_string()).collect()).collect()
    };

    let first = key(constrain_path(&path).unwrap());
    let second = key(constrain_path(&path).unwrap());
    assert_eq!(first, second);
}

#[test]
fn required_lakara_solutions_carry_exactly_one_verb() {
    let path = sentence();
    let res = constrain_path_with(&path, &need_lakara()).unwrap();
    assert!(!res.morphologies.is_empty());
    for morph in &res.morphologies {
        assert_eq!(morph.iter().filter(|a| has_lakara(&a.candidate)).count(), 1);
    }
}

type SolutionSet = HashSet<Vec<String>>;

fn solution_set(morphologies: &[Morphology]) -> SolutionSet {
    morphologies.iter().map(|m| m.iter().map(|a| a.candidate.to_string()).collect()).collect()
}

/// Every combination of candidates accepted by every enabled rule.
fn exhaustive(path: &[Pada], options: &Options) -> SolutionSet {
    let rules: Vec<Rule> = rules::get().into_iter().filter(|r| !options.disabled_rules.contains(r.id)).collect();
    let mut found = SolutionSet::new();
    let mut indices = vec![0usize; path.len()];

    loop {
        let bindings: Vec<Binding<'_, Candidate>> = path
            .iter()
            .zip(&indices)
            .map(|(p, &i)| Binding { name: p.surface.as_str(), value: &p.candidates[i] })
            .collect();
        if rules.iter().all(|r| (r.check)(&bindings, options).unwrap()) {
            found.insert(bindings.iter().map(|b| b.value.to_string()).collect());
        }

        let mut k = 0;
        loop {
            if k == indices.len() {
                return found;
            }
            indices[k] += 1;
            if indices[k] < path[k].candidates.len() {
                break;
            }
            indices[k] = 0;
            k += 1;
        }
    }
}

#[test]
fn pruning_does_not_change_the_solution_set() {
    let path = sentence();
    let unpruned: Vec<Rule> = rules::get().into_iter().map(|r| Rule { prune: None, ..r }).collect();

    let variants = [
        Options::default(),
        need_lakara(),
        Options { disabled_rules: RuleMask::FINAL_PADA, ..Options::default() },
        Options { disabled_rules: RuleMask::SINGLE_LAKARA | RuleMask::UPASARGA, ..Options::default() },
    ];
    for options in &variants {
        let pruned = constrain_path_with(&path, options).unwrap();
        let plain = PathConstrainer::new(&unpruned, options).run(&path).unwrap();

        let expected = exhaustive(&path, options);
        assert_eq!(solution_set(&pruned.morphologies), expected);
        assert_eq!(solution_set(&plain.morphologies), expected);
        assert_eq!(plain.metrics.stats.prunes, 0);
    }
}

#[test]
fn only_single_lakara_and_final_pada_carry_prune_hooks() {
    let with_prune: Vec<&str> = rules::get().iter().filter(|r| r.prune.is_some()).map(|r| r.name).collect();
    assert_eq!(with_prune, vec!["single lakara", "final pada"]);
}
