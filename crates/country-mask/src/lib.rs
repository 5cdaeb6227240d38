//! Per-country grid masks.
//!
//! Country outlines are read from a GeoJSON FeatureCollection (properties
//! `name` and `adm0_a3`), rasterised onto the lat/lon grid of a reference
//! NetCDF file by point-in-polygon tests on cell centres, and written as one
//! NetCDF file per country.

pub mod boundary;
pub mod error;
pub mod geojson;
pub mod job;
pub mod mask;
pub mod store;

pub use boundary::{load_boundaries, parse_boundaries, CountryBoundary};
pub use error::{MaskError, MaskResult};
pub use job::MaskJob;
pub use mask::{build_mask, CountryMask};
pub use store::{load_masks, mask_path, read_mask, write_mask};
