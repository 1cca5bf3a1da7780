//! Closed vocabularies of grammatical labels (SLP1).
//!
//! These are fixed lookup tables. Labels outside of them are still accepted
//! but carry no meaning for the agreement rules.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::tags::{Lakara, LakaraForm, Linga, Puruza, Tag, Vacana, Vibhakti};

/// Suffix marking the passive (karmaRi prayoga) variant of a lakara.
pub const PASSIVE_SUFFIX: &str = "-karmaRi";

pub const SANKHYA: &str = "saNKyA";
pub const UPASARGA: &str = "upasargaH";
pub const SAMASA_PURVAPADA: &str = "samAsapUrvapadanAmapadam";

/// Stem of the first-person pronoun (aham, AvAm, vayam ...).
pub const ASMAD: &str = "asmad";
/// Stem of the second-person pronoun (tvam, yuvAm, yUyam ...).
pub const YUZMAD: &str = "yuzmad";

pub const VIBHAKTIS: [Vibhakti; 8] = [
    Vibhakti::Prathama,
    Vibhakti::Dvitiya,
    Vibhakti::Trtiya,
    Vibhakti::Caturthi,
    Vibhakti::Pancami,
    Vibhakti::Sasthi,
    Vibhakti::Saptami,
    Vibhakti::Sambodhana,
];

pub const VACANAS: [Vacana; 3] = [Vacana::Eka, Vacana::Dvi, Vacana::Bahu];

pub const PURUZAS: [Puruza; 3] = [Puruza::Prathama, Puruza::Madhyama, Puruza::Uttama];

pub const LINGAS: [Linga; 3] = [Linga::Pum, Linga::Napumsaka, Linga::Stri];

/// Map of every known SLP1 label to its typed tag.
pub static LABELS: Lazy<HashMap<String, Tag>> = Lazy::new(|| {
    let mut map = HashMap::new();

    for form in LakaraForm::ALL {
        for lakara in [Lakara::active(form), Lakara::passive(form)] {
            map.insert(lakara.to_string(), Tag::Lakara(lakara));
        }
    }
    for v in VIBHAKTIS {
        map.insert(v.as_str().to_string(), Tag::Vibhakti(v));
    }
    for v in VACANAS {
        map.insert(v.as_str().to_string(), Tag::Vacana(v));
    }
    for p in PURUZAS {
        map.insert(p.as_str().to_string(), Tag::Puruza(p));
    }
    for l in LINGAS {
        map.insert(l.as_str().to_string(), Tag::Linga(l));
    }
    map.insert(SANKHYA.to_string(), Tag::Sankhya);
    map.insert(UPASARGA.to_string(), Tag::Upasarga);
    map.insert(SAMASA_PURVAPADA.to_string(), Tag::SamasaPurvapada);

    map
});
