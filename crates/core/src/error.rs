use std::result::Result as StdResult;

use thiserror::Error;

/// Errors raised by the pure domain layer.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid sort key: {0} (expected one of {expected})", expected = crate::SortKey::ALL_VARIANTS_STR)]
    InvalidSortKey(String),

    #[error("invalid filter value: {0} (expected \"all\" or an integer)")]
    InvalidFilter(String),

    #[error("invalid movie: {0}")]
    InvalidMovie(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = StdResult<T, CoreError>;
