//! Plant water stress per country.
//!
//! Daily soil-moisture fields are reduced to one masked mean per country
//! and appended to per-country CSV series. Each run resumes where the last
//! one stopped (`status.json`) and publishes a `metadata.json` summary for
//! the dashboard.
//!
//! # Example
//!
//! ```ignore
//! use water_stress::{NetCdfDailySource, StressConfig, StressUpdater, UpdatePaths};
//!
//! let config = StressConfig::load(None)?;
//! let updater = StressUpdater::from_paths(UpdatePaths::new(input, deployment))?;
//! let outcome = updater.update(start, None, &mut NetCdfDailySource::new(config))?;
//! outcome.save(updater.paths())?;
//! ```

pub mod config;
pub mod csv_store;
pub mod error;
pub mod loader;
pub mod series;
pub mod status;
pub mod updater;

pub use config::{render_template, StressConfig};
pub use csv_store::{read_series, snapshot_path, write_series, write_snapshot};
pub use error::{StressError, StressResult};
pub use loader::{DailyField, DailyFieldSource, NetCdfDailySource};
pub use series::DailySeries;
pub use status::{DashboardMetadata, RunStatus};
pub use updater::{masked_mean, resolve_start_date, StressUpdater, UpdateOutcome, UpdatePaths};
