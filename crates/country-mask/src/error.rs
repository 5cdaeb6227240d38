//! Error types for the country-mask crate.

use dashboard_common::PrepError;
use netcdf_io::NetCdfError;
use thiserror::Error;

/// Errors that can occur while loading boundaries or building masks.
#[derive(Error, Debug)]
pub enum MaskError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse GeoJSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Feature '{feature}' has unsupported geometry type '{kind}'")]
    UnsupportedGeometry { feature: String, kind: String },

    #[error("Feature '{feature}' has invalid geometry: {reason}")]
    InvalidGeometry { feature: String, reason: String },

    #[error(transparent)]
    NetCdf(#[from] NetCdfError),

    #[error(transparent)]
    Grid(#[from] PrepError),
}

/// Result type for mask operations.
pub type MaskResult<T> = std::result::Result<T, MaskError>;
