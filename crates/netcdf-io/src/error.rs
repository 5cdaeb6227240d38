//! Error types for NetCDF reading and writing.

use thiserror::Error;

/// Result type for NetCDF operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for NetCDF access.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error reported by libnetcdf
    #[error("NetCDF library error: {0}")]
    Library(#[from] netcdf::Error),

    /// Missing required variable, dimension or attribute
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Grid, time or unit errors from the common helpers
    #[error(transparent)]
    Grid(#[from] dashboard_common::PrepError),
}
