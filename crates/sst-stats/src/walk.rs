//! Discovery of input files and update-mode skipping.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use netcdf_io::SeriesTable;
use walkdir::WalkDir;

use crate::error::SstResult;

/// Every `*.nc` file under `root` in name order, a directory's own files
/// before those of its subdirectories.
pub fn find_input_files(root: &Path) -> SstResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root).sort_by(|a, b| {
        (a.file_type().is_dir(), a.file_name()).cmp(&(b.file_type().is_dir(), b.file_name()))
    });
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with(".nc") {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Times a file name may encode: `YYYYMMDD` (midnight) from the first 8
/// characters and `YYYYMMDDHH` from the first 10.
pub fn filename_times(file_name: &str) -> Vec<NaiveDateTime> {
    let mut times = Vec::with_capacity(2);
    if let Some(day) = file_name
        .get(..8)
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y%m%d").ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        times.push(day);
    }
    if let Some(hour) = file_name.get(..10).and_then(|s| {
        let date = NaiveDate::parse_from_str(s.get(..8)?, "%Y%m%d").ok()?;
        let hour: u32 = s.get(8..)?.parse().ok()?;
        date.and_hms_opt(hour, 0, 0)
    }) {
        times.push(hour);
    }
    times
}

/// Whether a file's time is already present in `existing`.
pub fn already_processed(path: &Path, existing: &SeriesTable) -> bool {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return false;
    };
    filename_times(&name).iter().any(|t| existing.contains_time(t))
}
