//! NetCDF access for the dashboard jobs.
//!
//! Reading covers the CF conventions the input products rely on:
//! `_FillValue` masking, `scale_factor`/`add_offset` packing and time
//! coordinates expressed as `"<unit> since <epoch>"`. Writing covers the two
//! outputs we produce: per-country mask files and time-indexed statistics
//! tables.
//!
//! # System requirements
//!
//! The `netcdf` crate links against libnetcdf and HDF5
//! (`libhdf5-dev libnetcdf-dev` on Debian-based systems).

pub mod attrs;
pub mod error;
pub mod reader;
pub mod series;
pub mod writer;

pub use attrs::{attr_as_f64, attr_as_string, Attributes};
pub use error::{NetCdfError, NetCdfResult};
pub use netcdf::AttributeValue;
pub use reader::{silence_hdf5_errors, GriddedDataset};
pub use series::{SeriesTable, SeriesVariable};
pub use writer::write_mask_file;
