//! Error types.
//!
//! Only contract violations are errors. A path whose candidates admit no
//! consistent assignment is an ordinary, empty result.

use thiserror::Error;

use crate::tags::Category;

#[derive(Debug, Error)]
pub enum MorphError {
    /// A pada reached the builder without any candidate analyses.
    #[error("no candidate tags for pada '{pada}'")]
    EmptyDomain { pada: String },

    /// A tag-set holds more than one label from a mutually exclusive group.
    #[error("pada '{pada}' has more than one {category}: {labels:?}")]
    ConflictingCategory { pada: String, category: Category, labels: Vec<String> },

    /// A rule needed exactly one label from a group and found none.
    #[error("pada '{pada}' has no {category}")]
    MissingCategory { pada: String, category: Category },

    /// A constraint was registered against a variable the problem does not own.
    #[error("unknown constraint variable #{id}")]
    UnknownVariable { id: usize },

    /// Malformed line in the text input format.
    #[error("line {line}: {message}")]
    Input { line: usize, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for morphological analysis.
pub type Result<T> = std::result::Result<T, MorphError>;
