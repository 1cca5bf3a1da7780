use crate::tags::{Candidate, TagFlags};

/// Returns true when the candidate carries a finite verb form.
pub fn has_lakara(c: &Candidate) -> bool {
    c.tags.flags().contains(TagFlags::LAKARA)
}

/// Returns true when the candidate carries any case label.
pub fn has_vibhakti(c: &Candidate) -> bool {
    c.tags.flags().contains(TagFlags::VIBHAKTI)
}

/// Returns true when the candidate is in the nominative (praTamA).
pub fn is_prathama(c: &Candidate) -> bool {
    c.tags.flags().contains(TagFlags::PRATHAMA)
}

/// Returns true when the candidate is a preverb.
pub fn is_upasarga(c: &Candidate) -> bool {
    c.tags.flags().contains(TagFlags::UPASARGA)
}

/// Returns true when the candidate is the prior member of a compound.
pub fn is_samasa_purvapada(c: &Candidate) -> bool {
    c.tags.flags().contains(TagFlags::SAMASA_PURVAPADA)
}

/// Returns true when the candidate is a numeral (exempt from gender agreement).
pub fn is_sankhya(c: &Candidate) -> bool {
    c.tags.flags().contains(TagFlags::SANKHYA)
}

/// Returns true when a sentence may not end on this candidate.
pub fn is_disallowed_final(c: &Candidate) -> bool {
    c.tags.flags().intersects(TagFlags::DISALLOWED_FINAL)
}
