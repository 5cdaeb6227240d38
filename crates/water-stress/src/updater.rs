//! The daily update loop.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use country_mask::{load_masks, CountryMask};
use dashboard_common::next_day;
use tracing::{info, warn};

use crate::config::StressConfig;
use crate::csv_store::{load_all_series, write_series, write_snapshot};
use crate::error::{StressError, StressResult};
use crate::loader::{DailyField, DailyFieldSource};
use crate::series::DailySeries;
use crate::status::{DashboardMetadata, RunStatus};

/// File layout of one deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePaths {
    pub masks_dir: PathBuf,
    pub status_path: PathBuf,
    pub timeseries_dir: PathBuf,
    pub csv_dir: PathBuf,
    pub metadata_path: PathBuf,
}

impl UpdatePaths {
    pub fn new(input_folder: &Path, deployment_folder: &Path) -> Self {
        let data = deployment_folder.join("data");
        Self {
            masks_dir: input_folder.join("masks"),
            status_path: input_folder.join("status.json"),
            timeseries_dir: data.join("timeseries"),
            csv_dir: data.join("csv"),
            metadata_path: data.join("metadata.json"),
        }
    }
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub country_names: BTreeMap<String, String>,
    /// First day that was not processed.
    pub next_start_date: NaiveDate,
    pub days_processed: usize,
}

impl UpdateOutcome {
    pub fn status(&self) -> RunStatus {
        RunStatus {
            next_start_date: self.next_start_date,
        }
    }

    pub fn metadata(&self) -> DashboardMetadata {
        DashboardMetadata::new(self.start_date, self.end_date, self.country_names.clone())
    }

    /// Write `status.json` and `metadata.json`.
    pub fn save(&self, paths: &UpdatePaths) -> StressResult<()> {
        self.status().save(&paths.status_path)?;
        self.metadata().save(&paths.metadata_path)?;
        Ok(())
    }
}

/// Start date of a run: command line, then `status.json`, then the config default.
pub fn resolve_start_date(
    cli: Option<NaiveDate>,
    status: Option<RunStatus>,
    config: &StressConfig,
) -> NaiveDate {
    cli.or(status.map(|s| s.next_start_date))
        .unwrap_or(config.default_start_date)
}

/// Mean of `values` over cells where the mask is set, ignoring NaN.
///
/// NaN when no such cell holds a value.
pub fn masked_mean(values: &[f64], mask: &CountryMask) -> f64 {
    let (sum, count) = values
        .iter()
        .zip(mask.cells())
        .filter(|(v, m)| **m != 0 && !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), (v, _)| (sum + v, count + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Aggregates daily fields into per-country series.
pub struct StressUpdater {
    paths: UpdatePaths,
    masks: BTreeMap<String, CountryMask>,
}

impl StressUpdater {
    pub fn new(paths: UpdatePaths, masks: BTreeMap<String, CountryMask>) -> Self {
        Self { paths, masks }
    }

    /// Load the masks found under `paths.masks_dir`.
    pub fn from_paths(paths: UpdatePaths) -> StressResult<Self> {
        let masks = load_masks(&paths.masks_dir)?;
        info!(count = masks.len(), dir = %paths.masks_dir.display(), "Loaded country masks");
        Ok(Self::new(paths, masks))
    }

    pub fn paths(&self) -> &UpdatePaths {
        &self.paths
    }

    pub fn country_names(&self) -> BTreeMap<String, String> {
        self.masks
            .iter()
            .map(|(code, mask)| (code.clone(), mask.name().to_string()))
            .collect()
    }

    /// Process days from `start` until `stop` (inclusive) or the first
    /// missing day, then rewrite every series file.
    ///
    /// A non-contiguous day aborts the run before any series file is
    /// rewritten; snapshot files of days already processed are kept.
    pub fn update<S: DailyFieldSource>(
        &self,
        start: NaiveDate,
        stop: Option<NaiveDate>,
        source: &mut S,
    ) -> StressResult<UpdateOutcome> {
        std::fs::create_dir_all(&self.paths.csv_dir)?;
        std::fs::create_dir_all(&self.paths.timeseries_dir)?;

        let mut series = load_all_series(&self.paths.timeseries_dir)?;
        let mut start_date = series.values().filter_map(DailySeries::first_date).min();
        let loaded_end = series.values().filter_map(DailySeries::last_date).max();
        for code in self.masks.keys() {
            series.entry(code.clone()).or_default();
        }

        let mut end_date = None;
        let mut days_processed = 0;
        let mut date = start;
        while stop.map_or(true, |stop| date <= stop) {
            let Some(field) = source.load(date)? else {
                break;
            };
            info!("Processing: {}", date);

            let means = self.country_means(&field)?;
            for (code, mean) in &means {
                if let Some(s) = series.get_mut(code) {
                    s.push(date, *mean)?;
                }
            }
            write_snapshot(
                &self.paths.csv_dir,
                date,
                means.iter().map(|(code, mean)| (code.as_str(), *mean)),
            )?;

            start_date.get_or_insert(date);
            end_date = Some(date);
            days_processed += 1;
            date = next_day(date);
        }

        for (code, s) in &series {
            write_series(&self.paths.timeseries_dir.join(format!("{}.csv", code)), s)?;
        }

        if days_processed == 0 {
            warn!(start = %start, "No daily data found");
        }

        Ok(UpdateOutcome {
            start_date,
            // No new day keeps the end of the loaded series
            end_date: end_date.or(loaded_end),
            country_names: self.country_names(),
            next_start_date: date,
            days_processed,
        })
    }

    fn country_means(&self, field: &DailyField) -> StressResult<Vec<(String, f64)>> {
        self.masks
            .iter()
            .map(|(code, mask)| {
                if mask.shape() != field.shape || mask.cells().len() != field.values.len() {
                    return Err(StressError::ShapeMismatch {
                        code: code.clone(),
                        expected: mask.shape(),
                        found: field.shape,
                    });
                }
                Ok((code.clone(), masked_mean(&field.values, mask)))
            })
            .collect()
    }
}
