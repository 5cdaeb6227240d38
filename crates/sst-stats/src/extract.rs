//! CSV extraction of one statistic for the dashboard.

use std::path::Path;

use chrono::Datelike;
use dashboard_common::{format_value, DATE_FORMAT};
use netcdf_io::SeriesTable;
use tracing::info;

use crate::error::{SstError, SstResult};

pub const DEFAULT_INPUT: &str = "globmeansst.nc";
pub const DEFAULT_VARIABLE: &str = "analysed_sst";
pub const DEFAULT_OUTPUT: &str = "globmeansst.csv";

/// Write `date,year,doy,<variable>` rows, one per time step. Returns the row count.
pub fn extract_csv(input: &Path, variable: &str, output: &Path) -> SstResult<usize> {
    let table = SeriesTable::read(input)?;
    let column = table
        .variable(variable)
        .ok_or_else(|| SstError::MissingVariable(variable.to_string()))?;

    let mut writer = csv::Writer::from_path(output)?;
    writer.write_record(["date", "year", "doy", variable])?;
    for (time, value) in table.times().iter().zip(&column.values) {
        writer.write_record([
            time.format(DATE_FORMAT).to_string(),
            time.year().to_string(),
            time.ordinal().to_string(),
            format_value(*value),
        ])?;
    }
    writer.flush()?;

    info!(input = %input.display(), output = %output.display(), rows = table.len(), "Extracted CSV");
    Ok(table.len())
}
