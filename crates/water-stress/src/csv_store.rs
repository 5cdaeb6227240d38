//! CSV files: per-country series and per-day snapshots.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use dashboard_common::{format_value, DATE_FORMAT};
use tracing::debug;

use crate::error::StressResult;
use crate::series::DailySeries;

/// Header of a per-country series file.
pub const SERIES_HEADER: [&str; 2] = ["date", "stress"];
/// Header of a per-day snapshot file.
pub const SNAPSHOT_HEADER: [&str; 2] = ["country", "stress"];

/// Read a `date,stress` file. The header row is skipped; dates must be
/// contiguous.
pub fn read_series(path: &Path) -> StressResult<DailySeries> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut series = DailySeries::new();
    for record in reader.deserialize() {
        let (date, value): (NaiveDate, f64) = record?;
        series.push(date, value)?;
    }
    Ok(series)
}

/// Write a `date,stress` file, replacing any existing one.
pub fn write_series(path: &Path, series: &DailySeries) -> StressResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(SERIES_HEADER)?;
    for (date, value) in series.points() {
        writer.write_record([date.format(DATE_FORMAT).to_string(), format_value(*value)])?;
    }
    writer.flush()?;
    Ok(())
}

/// Load every `*.csv` series in `dir`, keyed by file stem.
pub fn load_all_series(dir: &Path) -> StressResult<BTreeMap<String, DailySeries>> {
    let mut all = BTreeMap::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().map_or(true, |ext| ext != "csv") {
            continue;
        }
        let Some(code) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };
        let series = read_series(&path)?;
        debug!(code = %code, points = series.len(), "Loaded series");
        all.insert(code, series);
    }
    Ok(all)
}

/// `<csv_dir>/YYYY/MM/stressYYYYMMDD.csv`
pub fn snapshot_path(csv_dir: &Path, date: NaiveDate) -> PathBuf {
    csv_dir
        .join(format!("{:04}", date.year()))
        .join(format!("{:02}", date.month()))
        .join(format!("stress{}.csv", date.format("%Y%m%d")))
}

/// Write the `country,stress` snapshot of one day.
pub fn write_snapshot<'a, I>(csv_dir: &Path, date: NaiveDate, values: I) -> StressResult<PathBuf>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let path = snapshot_path(csv_dir, date);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(SNAPSHOT_HEADER)?;
    for (code, value) in values {
        writer.write_record([code.to_string(), format_value(value)])?;
    }
    writer.flush()?;
    Ok(path)
}
