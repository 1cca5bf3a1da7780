use std::collections::BTreeMap;

use tracing::debug;

use crate::rules::morph::helpers::{Concord, at_most_one, exactly_one};
use crate::rules::morph::predicates::{
    has_lakara, has_vibhakti, is_disallowed_final, is_prathama, is_samasa_purvapada, is_sankhya, is_upasarga,
};
use crate::rules::morph::vocab::{ASMAD, YUZMAD};
use crate::tags::{Category, Puruza, Vibhakti};
use crate::{GenderlessCase, Rule, RuleMask, Scope};

/// Rule: at most one finite verb in the sentence (exactly one when a lakara
/// is required).
///
/// Registered without a variable list. The pruning hook rejects a partial
/// binding as soon as two lakaras are bound.
fn rule_single_lakara() -> Rule {
    rule! {
        name: "single lakara",
        id: RuleMask::SINGLE_LAKARA,
        scope: Scope::All,
        check: |padas, options| {
            let count = padas.iter().filter(|p| has_lakara(p.value)).count();
            Ok(if options.require_lakara { count == 1 } else { count <= 1 })
        },
        prune: |padas, _options| {
            Ok(padas.iter().flatten().filter(|p| has_lakara(p.value)).count() <= 1)
        },
    }
}

/// Rule: the sentence cannot end on a compound prior-member or a preverb.
fn rule_final_pada() -> Rule {
    rule! {
        name: "final pada",
        id: RuleMask::FINAL_PADA,
        scope: Scope::Sequence,
        check: |padas, _options| {
            let Some(last) = padas.last() else {
                return Ok(true);
            };
            debug!(pada = last.name, tags = %last.value.tags, "final pada");
            Ok(!is_disallowed_final(last.value))
        },
        prune: |padas, _options| {
            Ok(!matches!(padas.last(), Some(Some(last)) if is_disallowed_final(last.value)))
        },
    }
}

/// Rule: a preverb must be immediately followed by a finite verb.
fn rule_upasarga() -> Rule {
    rule! {
        name: "upasarga before verb",
        id: RuleMask::UPASARGA,
        scope: Scope::Sequence,
        check: |padas, _options| {
            let ok = padas
                .iter()
                .enumerate()
                .filter(|(_, p)| is_upasarga(p.value))
                .all(|(ix, _)| padas.get(ix + 1).is_some_and(|next| has_lakara(next.value)));
            Ok(ok)
        },
    }
}

/// Rule: padas in the nominative must agree with the finite verb.
///
/// The verb's vacana must match every nominative pada's vacana. A maDyama
/// (2nd person) verb requires its nominatives to be forms of `yuzmad`, an
/// uttama (1st person) verb forms of `asmad`. Without a finite verb the rule
/// holds unless a lakara is required.
fn rule_prathama_agreement() -> Rule {
    rule! {
        name: "prathama agreement",
        id: RuleMask::PRATHAMA_AGREEMENT,
        scope: Scope::Sequence,
        check: |padas, options| {
            let Some(verb) = padas.iter().find(|p| has_lakara(p.value)) else {
                return Ok(!options.require_lakara);
            };
            let lakara = exactly_one(verb.value.tags.lakaras(), verb.name, Category::Lakara)?;
            let vacana = exactly_one(verb.value.tags.vacanas(), verb.name, Category::Vacana)?;
            let puruza = exactly_one(verb.value.tags.puruzas(), verb.name, Category::Puruza)?;
            debug!(pada = verb.name, %lakara, ?vacana, ?puruza, "found lakara");

            let mut ok = true;
            for pada in padas.iter().filter(|p| is_prathama(p.value)) {
                let subject_vacana = exactly_one(pada.value.tags.vacanas(), pada.name, Category::Vacana)?;
                debug!(pada = pada.name, vacana = ?subject_vacana, stem = %pada.value.stem, "found prathama");
                ok &= subject_vacana == vacana;
                match puruza {
                    Puruza::Uttama => ok &= pada.value.stem == ASMAD,
                    Puruza::Madhyama => ok &= pada.value.stem == YUZMAD,
                    Puruza::Prathama => {}
                }
            }
            Ok(ok)
        },
    }
}

/// Rule: all padas in the same case agree in gender and number.
///
/// The first pada seen with a case fixes its (linga, vacana); every later
/// pada in that case must match. Numerals without a gender are exempt.
fn rule_vibhakti_agreement() -> Rule {
    rule! {
        name: "vibhakti agreement",
        id: RuleMask::VIBHAKTI_AGREEMENT,
        scope: Scope::Sequence,
        check: |padas, options| {
            let mut seen: BTreeMap<Vibhakti, Concord> = BTreeMap::new();

            for pada in padas.iter().filter(|p| has_vibhakti(p.value)) {
                let tags = &pada.value.tags;
                let vibhakti = exactly_one(tags.vibhaktis(), pada.name, Category::Vibhakti)?;
                let vacana = exactly_one(tags.vacanas(), pada.name, Category::Vacana)?;

                let linga = match at_most_one(tags.lingas(), pada.name, Category::Linga)? {
                    Some(linga) => linga,
                    None if is_sankhya(pada.value) => continue,
                    None => match options.genderless_case {
                        GenderlessCase::Exempt => continue,
                        GenderlessCase::Reject => {
                            return Err(crate::MorphError::MissingCategory {
                                pada: pada.name.to_string(),
                                category: Category::Linga,
                            });
                        }
                    },
                };

                let concord = Concord { linga, vacana };
                match seen.get(&vibhakti) {
                    Some(first) if *first != concord => {
                        debug!(pada = pada.name, ?vibhakti, expected = ?first, found = ?concord, "unequal");
                        return Ok(false);
                    }
                    Some(_) => {}
                    None => {
                        seen.insert(vibhakti, concord);
                    }
                }
            }
            Ok(true)
        },
    }
}

/// Rule: a compound prior-member is followed by another prior-member or by a
/// case-inflected pada, and never ends the sentence.
fn rule_samasa_continuation() -> Rule {
    rule! {
        name: "samasa continuation",
        id: RuleMask::SAMASA_CONTINUATION,
        scope: Scope::Sequence,
        check: |padas, _options| {
            let ok = padas.iter().enumerate().filter(|(_, p)| is_samasa_purvapada(p.value)).all(|(ix, _)| {
                padas.get(ix + 1).is_some_and(|next| is_samasa_purvapada(next.value) || has_vibhakti(next.value))
            });
            Ok(ok)
        },
    }
}

/// All morphological rules, in registration order.
pub fn get() -> Vec<Rule> {
    vec![
        rule_single_lakara(),
        rule_final_pada(),
        rule_upasarga(),
        rule_prathama_agreement(),
        rule_samasa_continuation(),
        rule_vibhakti_agreement(),
    ]
}
