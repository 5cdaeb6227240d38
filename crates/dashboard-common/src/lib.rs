//! Common types shared by the dashboard data-preparation jobs.

pub mod bbox;
pub mod error;
pub mod format;
pub mod grid;
pub mod logging;
pub mod time;

pub use bbox::BoundingBox;
pub use error::{PrepError, PrepResult};
pub use format::format_value;
pub use grid::LatLonGrid;
pub use logging::init_tracing;
pub use time::{next_day, parse_iso_date, CfTimeUnits, TimeStep, DATE_FORMAT};
