//! Grammatical categories, tag-sets and padas.
//!
//! Every candidate interpretation of a pada carries a [`TagSet`]: a set of
//! category labels written in SLP1. Labels belonging to one of the closed
//! vocabularies (lakara, vibhakti, vacana, puruza, linga and the special
//! markers) are parsed into typed [`Tag`]s so that rule code compares enum
//! values instead of strings. Anything else is kept verbatim as
//! [`Tag::Other`].
//!
//! ```text
//! "rAmaH" ──▶ Pada { surface: "rAmaH", candidates: [
//!                Candidate { stem: "rAma", tags: {praTamAviBaktiH, ekavacanam, puMlliNgam} },
//!                ...
//!             ] }
//! ```

use crate::rules::morph::vocab;
use crate::{MorphError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Tense-mood forms (the ten lakaras minus the Vedic `lew`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LakaraForm {
    Law,
    Liw,
    Luw,
    Lrw,
    Low,
    LaN,
    LiN,
    LuN,
    LfN,
}

impl LakaraForm {
    pub const ALL: [LakaraForm; 9] = [
        LakaraForm::Law,
        LakaraForm::Liw,
        LakaraForm::Luw,
        LakaraForm::Lrw,
        LakaraForm::Low,
        LakaraForm::LaN,
        LakaraForm::LiN,
        LakaraForm::LuN,
        LakaraForm::LfN,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LakaraForm::Law => "law",
            LakaraForm::Liw => "liw",
            LakaraForm::Luw => "luw",
            LakaraForm::Lrw => "lrw",
            LakaraForm::Low => "low",
            LakaraForm::LaN => "laN",
            LakaraForm::LiN => "liN",
            LakaraForm::LuN => "luN",
            LakaraForm::LfN => "lfN",
        }
    }
}

/// A lakara label, optionally in the passive (`-karmaRi`) voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lakara {
    pub form: LakaraForm,
    pub passive: bool,
}

impl Lakara {
    pub const fn active(form: LakaraForm) -> Self {
        Lakara { form, passive: false }
    }

    pub const fn passive(form: LakaraForm) -> Self {
        Lakara { form, passive: true }
    }
}

impl fmt::Display for Lakara {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.form.as_str())?;
        if self.passive { f.write_str(vocab::PASSIVE_SUFFIX) } else { Ok(()) }
    }
}

/// Grammatical case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Vibhakti {
    Prathama,
    Dvitiya,
    Trtiya,
    Caturthi,
    Pancami,
    Sasthi,
    Saptami,
    Sambodhana,
}

impl Vibhakti {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vibhakti::Prathama => "praTamAviBaktiH",
            Vibhakti::Dvitiya => "dvitIyAviBaktiH",
            Vibhakti::Trtiya => "tritIyAviBaktiH",
            Vibhakti::Caturthi => "caturTIviBaktiH",
            Vibhakti::Pancami => "paNcamIviBaktiH",
            Vibhakti::Sasthi => "zazWIviBaktiH",
            Vibhakti::Saptami => "saptamIviBaktiH",
            Vibhakti::Sambodhana => "saMboDanaviBaktiH",
        }
    }
}

/// Grammatical number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Vacana {
    Eka,
    Dvi,
    Bahu,
}

impl Vacana {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vacana::Eka => "ekavacanam",
            Vacana::Dvi => "dvivacanam",
            Vacana::Bahu => "bahuvacanam",
        }
    }
}

/// Grammatical person, in the traditional order: praTama (3rd), maDyama (2nd),
/// uttama (1st).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Puruza {
    Prathama,
    Madhyama,
    Uttama,
}

impl Puruza {
    pub fn as_str(&self) -> &'static str {
        match self {
            Puruza::Prathama => "praTamapuruzaH",
            Puruza::Madhyama => "maDyamapuruzaH",
            Puruza::Uttama => "uttamapuruzaH",
        }
    }
}

/// Grammatical gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Linga {
    Pum,
    Napumsaka,
    Stri,
}

impl Linga {
    pub fn as_str(&self) -> &'static str {
        match self {
            Linga::Pum => "puMlliNgam",
            Linga::Napumsaka => "napuMsakaliNgam",
            Linga::Stri => "strIliNgam",
        }
    }
}

/// Mutually exclusive category groups. Used for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Lakara,
    Vibhakti,
    Vacana,
    Puruza,
    Linga,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Lakara => "lakara",
            Category::Vibhakti => "vibhakti",
            Category::Vacana => "vacana",
            Category::Puruza => "puruza",
            Category::Linga => "linga",
        };
        f.write_str(name)
    }
}

/// A single grammatical label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tag {
    Lakara(Lakara),
    Vibhakti(Vibhakti),
    Vacana(Vacana),
    Puruza(Puruza),
    Linga(Linga),
    /// Numeral (`saNKyA`); stands in for gender in case agreement.
    Sankhya,
    /// Preverb (`upasargaH`).
    Upasarga,
    /// Prior member of a compound (`samAsapUrvapadanAmapadam`).
    SamasaPurvapada,
    /// Any label outside the closed vocabularies.
    Other(String),
}

impl Tag {
    /// Parse an SLP1 label. Unknown labels become [`Tag::Other`].
    pub fn parse(label: &str) -> Tag {
        let label = label.trim();
        vocab::LABELS.get(label).cloned().unwrap_or_else(|| Tag::Other(label.to_string()))
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            Tag::Lakara(_) => Some(Category::Lakara),
            Tag::Vibhakti(_) => Some(Category::Vibhakti),
            Tag::Vacana(_) => Some(Category::Vacana),
            Tag::Puruza(_) => Some(Category::Puruza),
            Tag::Linga(_) => Some(Category::Linga),
            _ => None,
        }
    }

    fn flags(&self) -> TagFlags {
        match self {
            Tag::Lakara(_) => TagFlags::LAKARA,
            Tag::Vibhakti(Vibhakti::Prathama) => TagFlags::VIBHAKTI | TagFlags::PRATHAMA,
            Tag::Vibhakti(_) => TagFlags::VIBHAKTI,
            Tag::Vacana(_) => TagFlags::VACANA,
            Tag::Puruza(_) => TagFlags::PURUZA,
            Tag::Linga(_) => TagFlags::LINGA,
            Tag::Sankhya => TagFlags::SANKHYA,
            Tag::Upasarga => TagFlags::UPASARGA,
            Tag::SamasaPurvapada => TagFlags::SAMASA_PURVAPADA,
            Tag::Other(_) => TagFlags::empty(),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Lakara(l) => fmt::Display::fmt(l, f),
            Tag::Vibhakti(v) => f.write_str(v.as_str()),
            Tag::Vacana(v) => f.write_str(v.as_str()),
            Tag::Puruza(p) => f.write_str(p.as_str()),
            Tag::Linga(l) => f.write_str(l.as_str()),
            Tag::Sankhya => f.write_str(vocab::SANKHYA),
            Tag::Upasarga => f.write_str(vocab::UPASARGA),
            Tag::SamasaPurvapada => f.write_str(vocab::SAMASA_PURVAPADA),
            Tag::Other(s) => f.write_str(s),
        }
    }
}

macro_rules! impl_from_category {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for Tag {
                fn from(value: $ty) -> Self {
                    Tag::$ty(value)
                }
            }
        )*
    };
}

impl_from_category!(Lakara, Vibhakti, Vacana, Puruza, Linga);

bitflags::bitflags! {
    /// Coarse summary of which categories a tag-set touches.
    ///
    /// Computed once per tag-set so rules can skip the common "not relevant"
    /// case without walking the labels.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TagFlags: u16 {
        const LAKARA           = 1 << 0;
        const VIBHAKTI         = 1 << 1;
        const PRATHAMA         = 1 << 2;
        const VACANA           = 1 << 3;
        const PURUZA           = 1 << 4;
        const LINGA            = 1 << 5;
        const SANKHYA          = 1 << 6;
        const UPASARGA         = 1 << 7;
        const SAMASA_PURVAPADA = 1 << 8;

        /// Labels a sentence may not end on.
        const DISALLOWED_FINAL = Self::UPASARGA.bits() | Self::SAMASA_PURVAPADA.bits();
    }
}

/// An immutable, normalized set of labels for one candidate interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagSet {
    tags: BTreeSet<Tag>,
    flags: TagFlags,
}

impl TagSet {
    /// Build a tag-set from SLP1 labels. Blank labels are dropped.
    ///
    /// Normalizing the labels of an existing tag-set yields the same set.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels.into_iter().filter(|l| !l.as_ref().trim().is_empty()).map(|l| Tag::parse(l.as_ref())).collect()
    }

    pub fn flags(&self) -> TagFlags {
        self.flags
    }

    /// SLP1 labels in canonical (sorted) order.
    pub fn labels(&self) -> Vec<String> {
        self.tags.iter().map(Tag::to_string).collect()
    }

    pub fn lakaras(&self) -> impl Iterator<Item = Lakara> + '_ {
        self.tags.iter().filter_map(|t| if let Tag::Lakara(l) = t { Some(*l) } else { None })
    }

    pub fn vibhaktis(&self) -> impl Iterator<Item = Vibhakti> + '_ {
        self.tags.iter().filter_map(|t| if let Tag::Vibhakti(v) = t { Some(*v) } else { None })
    }

    pub fn vacanas(&self) -> impl Iterator<Item = Vacana> + '_ {
        self.tags.iter().filter_map(|t| if let Tag::Vacana(v) = t { Some(*v) } else { None })
    }

    pub fn puruzas(&self) -> impl Iterator<Item = Puruza> + '_ {
        self.tags.iter().filter_map(|t| if let Tag::Puruza(p) = t { Some(*p) } else { None })
    }

    pub fn lingas(&self) -> impl Iterator<Item = Linga> + '_ {
        self.tags.iter().filter_map(|t| if let Tag::Linga(l) = t { Some(*l) } else { None })
    }

    /// Check that no mutually exclusive category appears twice.
    pub fn validate(&self, pada: &str) -> Result<()> {
        for category in [Category::Lakara, Category::Vibhakti, Category::Vacana, Category::Puruza, Category::Linga] {
            let labels: Vec<String> =
                self.tags.iter().filter(|t| t.category() == Some(category)).map(Tag::to_string).collect();
            if labels.len() > 1 {
                return Err(MorphError::ConflictingCategory { pada: pada.to_string(), category, labels });
            }
        }
        Ok(())
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let tags: BTreeSet<Tag> = iter.into_iter().collect();
        let flags = tags.iter().fold(TagFlags::empty(), |acc, t| acc | t.flags());
        TagSet { tags, flags }
    }
}

impl From<Vec<String>> for TagSet {
    fn from(labels: Vec<String>) -> Self {
        TagSet::from_labels(labels)
    }
}

impl From<TagSet> for Vec<String> {
    fn from(set: TagSet) -> Self {
        set.labels()
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.labels().join(" "))
    }
}

/// One candidate interpretation of a pada: the stem it derives from and its
/// tags. This is the value a CSP variable ranges over.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub stem: String,
    pub tags: TagSet,
}

impl Candidate {
    pub fn new(stem: impl Into<String>, tags: TagSet) -> Self {
        Candidate { stem: stem.into(), tags }
    }

    /// Shorthand for `Candidate::new(stem, TagSet::from_labels(labels))`.
    pub fn from_labels<I, S>(stem: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Candidate::new(stem, TagSet::from_labels(labels))
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{{}}}", self.stem, self.tags)
    }
}

/// One segment of a sandhi split together with its candidate analyses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pada {
    pub surface: String,
    pub candidates: Vec<Candidate>,
}

impl Pada {
    pub fn new(surface: impl Into<String>, candidates: Vec<Candidate>) -> Self {
        Pada { surface: surface.into(), candidates }
    }
}

impl fmt::Display for Pada {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_closed_vocabulary_labels() {
        assert_eq!(Tag::parse("law"), Tag::Lakara(Lakara::active(LakaraForm::Law)));
        assert_eq!(Tag::parse("laN-karmaRi"), Tag::Lakara(Lakara::passive(LakaraForm::LaN)));
        assert_eq!(Tag::parse(" praTamAviBaktiH "), Tag::Vibhakti(Vibhakti::Prathama));
        assert_eq!(Tag::parse("saNKyA"), Tag::Sankhya);
        assert_eq!(Tag::parse("subanta"), Tag::Other("subanta".to_string()));
    }

    #[test]
    fn labels_round_trip_through_display() {
        for label in vocab::LABELS.keys() {
            assert_eq!(Tag::parse(label).to_string(), *label);
        }
    }

    #[test]
    fn flags_summarize_categories() {
        let set = TagSet::from_labels(["praTamAviBaktiH", "ekavacanam", "puMlliNgam"]);
        assert!(set.flags().contains(TagFlags::VIBHAKTI | TagFlags::PRATHAMA | TagFlags::VACANA | TagFlags::LINGA));
        assert!(!set.flags().intersects(TagFlags::LAKARA | TagFlags::DISALLOWED_FINAL));

        let upasarga = TagSet::from_labels(["upasargaH"]);
        assert!(upasarga.flags().intersects(TagFlags::DISALLOWED_FINAL));
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = TagSet::from_labels(["ekavacanam", "", " law ", "praTamapuruzaH", "tiN"]);
        let twice = TagSet::from_labels(once.labels());
        assert_eq!(once, twice);
        assert_eq!(once.labels().len(), 4);
    }

    #[test]
    fn validate_rejects_two_labels_from_one_group() {
        let set = TagSet::from_labels(["praTamAviBaktiH", "dvitIyAviBaktiH", "ekavacanam"]);
        let err = set.validate("vanam").unwrap_err();
        match err {
            MorphError::ConflictingCategory { pada, category, labels } => {
                assert_eq!(pada, "vanam");
                assert_eq!(category, Category::Vibhakti);
                assert_eq!(labels.len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(TagSet::from_labels(["law", "ekavacanam", "praTamapuruzaH"]).validate("gacCati").is_ok());
    }

    #[test]
    fn tag_set_serializes_as_label_list() {
        let candidate = Candidate::from_labels("rAma", ["puMlliNgam", "ekavacanam"]);
        let json = serde_json::to_string(&candidate).unwrap();
        assert_eq!(json, r#"{"stem":"rAma","tags":["ekavacanam","puMlliNgam"]}"#);
        let back: Candidate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, candidate);
    }
}
