//! Sources of daily soil-moisture fields.

use chrono::NaiveDate;
use netcdf_io::GriddedDataset;
use tracing::debug;

use crate::config::StressConfig;
use crate::error::StressResult;

/// One day's field, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyField {
    pub shape: (usize, usize),
    pub values: Vec<f64>,
}

/// Supplies the field of a given day.
pub trait DailyFieldSource {
    /// `Ok(None)` means no data exists for `date`, which ends an update run.
    fn load(&mut self, date: NaiveDate) -> StressResult<Option<DailyField>>;
}

/// Reads `variable_name` at time index 0 from the file `data_template`
/// resolves to for each day.
#[derive(Debug, Clone)]
pub struct NetCdfDailySource {
    config: StressConfig,
}

impl NetCdfDailySource {
    pub fn new(config: StressConfig) -> Self {
        Self { config }
    }
}

impl DailyFieldSource for NetCdfDailySource {
    fn load(&mut self, date: NaiveDate) -> StressResult<Option<DailyField>> {
        let path = self.config.data_path(date);
        if !path.exists() {
            debug!(path = %path.display(), "No daily file");
            return Ok(None);
        }

        let dataset = GriddedDataset::open(&path)?;
        let variable = &self.config.variable_name;
        let dims = dataset.variable_dims(variable)?;
        let spatial = &dims[dims.len().saturating_sub(2)..];
        let lens: Vec<usize> = spatial
            .iter()
            .map(|d| dataset.dimension_len(d).unwrap_or(0))
            .collect();
        let shape = match lens.as_slice() {
            [nlat, nlon] => (*nlat, *nlon),
            [n] => (1, *n),
            _ => (0, 0),
        };

        let values = dataset.read_field(variable, 0)?;
        Ok(Some(DailyField { shape, values }))
    }
}
