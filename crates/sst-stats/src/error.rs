//! Error types for the sst-stats crate.

use std::path::PathBuf;

use dashboard_common::PrepError;
use netcdf_io::NetCdfError;
use thiserror::Error;

/// Errors that can occur while computing SST statistics.
#[derive(Error, Debug)]
pub enum SstError {
    #[error("{path} has no '{name}' global attribute")]
    MissingAttribute { path: PathBuf, name: String },

    #[error("Variable '{0}' not found")]
    MissingVariable(String),

    #[error("{what} has {found} cells, expected {expected}")]
    ShapeMismatch {
        what: String,
        expected: usize,
        found: usize,
    },

    #[error("Failed to walk input directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to read or write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    NetCdf(#[from] NetCdfError),

    #[error(transparent)]
    Prep(#[from] PrepError),
}

/// Result type for SST operations.
pub type SstResult<T> = std::result::Result<T, SstError>;
