//! Morphological agreement rules for tagged Sanskrit padas.

pub mod helpers;
pub mod predicates;
pub mod rules;
pub mod vocab;

#[cfg(test)]
mod tests;
