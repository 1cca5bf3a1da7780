use crate::tags::{Category, Linga, Tag, Vacana};
use crate::{MorphError, Result};

/// Return the single value of `category` drawn from `values`.
///
/// Zero values is [`MorphError::MissingCategory`], more than one is
/// [`MorphError::ConflictingCategory`].
pub fn exactly_one<T, I>(values: I, pada: &str, category: Category) -> Result<T>
where
    T: Copy + Into<Tag>,
    I: IntoIterator<Item = T>,
{
    match at_most_one(values, pada, category)? {
        Some(v) => Ok(v),
        None => Err(MorphError::MissingCategory { pada: pada.to_string(), category }),
    }
}

/// Like [`exactly_one`], but an absent category is `Ok(None)`.
pub fn at_most_one<T, I>(values: I, pada: &str, category: Category) -> Result<Option<T>>
where
    T: Copy + Into<Tag>,
    I: IntoIterator<Item = T>,
{
    let found: Vec<T> = values.into_iter().collect();
    match found.as_slice() {
        [] => Ok(None),
        [one] => Ok(Some(*one)),
        many => Err(MorphError::ConflictingCategory {
            pada: pada.to_string(),
            category,
            labels: many.iter().map(|&v| Into::<Tag>::into(v).to_string()).collect(),
        }),
    }
}

/// Gender and number as recorded for a case by the agreement rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Concord {
    pub linga: Linga,
    pub vacana: Vacana,
}
