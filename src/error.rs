//! Error type shared by construction, resizing and value ordering.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// A bucket array needs at least one slot.
    #[error("capacity must be positive, got {requested}")]
    InvalidCapacity { requested: usize },
    /// `sorted_pairs` found a value it could not read as a number.
    #[error("value stored under key '{key}' is not numeric")]
    NonNumericValue { key: String },
}
