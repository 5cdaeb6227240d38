//! Global and Arctic mean sea-surface temperature.
//!
//! Each L4 analysis file is reduced to area-weighted (`cos(lat)`) means of
//! its SST over two latitude bands, under three masks:
//!
//! * `analysed_<region>`: water, ice free, and water in the ESA CCI land-sea mask
//! * `all_<region>`: water, and water in the ESA CCI land-sea mask
//! * `self_<region>`: water according to the product alone
//!
//! plus the mean Arctic sea-ice fraction. Results from all files are
//! concatenated along time into one NetCDF table, which [`extract_csv`]
//! turns into the CSV the dashboard reads.

pub mod error;
pub mod extract;
pub mod job;
pub mod masks;
pub mod process;
pub mod products;
pub mod region;
pub mod walk;
pub mod weighted;

pub use error::{SstError, SstResult};
pub use extract::extract_csv;
pub use job::SstJob;
pub use masks::CellMasks;
pub use process::SstProcessor;
pub use products::{Product, WaterMask, KELVIN_OFFSET, SEA_ICE_THRESHOLD};
pub use region::{Region, REGIONS};
pub use walk::{already_processed, filename_times, find_input_files};
pub use weighted::weighted_mean;
