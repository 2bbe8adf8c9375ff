//! Query errors.

use thiserror::Error;

/// Result type alias for graph queries.
pub type Result<T> = std::result::Result<T, QueryError>;

/// Errors raised by the ranking and filtering queries.
///
/// Queries either fully succeed or fail with one of these; there are no
/// partial results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Unknown ranking policy '{0}' (expected views, comments or mixed)")]
    InvalidPolicy(String),

    #[error("Weight {0} is outside [0, 1]")]
    InvalidWeight(f64),

    /// A post does not have exactly one author.
    #[error("Post '{post}' has {authors} authors, expected exactly one")]
    Integrity { post: String, authors: usize },
}
