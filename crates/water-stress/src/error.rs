//! Error types for the water-stress crate.

use chrono::NaiveDate;
use country_mask::MaskError;
use dashboard_common::PrepError;
use netcdf_io::NetCdfError;
use thiserror::Error;

/// Errors that abort a water-stress update.
#[derive(Error, Debug)]
pub enum StressError {
    #[error("Dates are not contiguous: {previous} {next}")]
    NotContiguous { previous: NaiveDate, next: NaiveDate },

    #[error("Mask '{code}' has shape {expected:?} but the field has shape {found:?}")]
    ShapeMismatch {
        code: String,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read or write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Mask(#[from] MaskError),

    #[error(transparent)]
    NetCdf(#[from] NetCdfError),

    #[error(transparent)]
    Prep(#[from] PrepError),
}

/// Result type for water-stress operations.
pub type StressResult<T> = std::result::Result<T, StressError>;
