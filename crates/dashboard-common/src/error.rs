//! Error types shared by the data-preparation crates.

use thiserror::Error;

/// Result type alias using PrepError.
pub type PrepResult<T> = Result<T, PrepError>;

/// Errors raised by the common grid and time helpers.
#[derive(Debug, Error)]
pub enum PrepError {
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Grid shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time units: {0}")]
    InvalidTimeUnits(String),

    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}
