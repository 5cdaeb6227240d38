//! Water stress updater.
//!
//! Extends the per-country daily water-stress series with every new day of
//! soil-moisture data, then records where the next run should resume.

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use dashboard_common::parse_iso_date;
use tracing::{info, warn};

use water_stress::{resolve_start_date, NetCdfDailySource, RunStatus, StressConfig, StressUpdater, UpdatePaths};

#[derive(Parser, Debug)]
#[command(name = "update-water-stress")]
#[command(about = "Append new days to the per-country water stress series")]
struct Args {
    /// Folder holding `masks/` and `status.json`
    #[arg(long, env = "STRESS_INPUT_FOLDER")]
    input_folder: PathBuf,

    /// Dashboard deployment folder; outputs go to its `data/` directory
    #[arg(long, env = "STRESS_DEPLOYMENT_FOLDER")]
    deployment_folder: PathBuf,

    /// First day to process (default: resume from status.json)
    #[arg(long, value_parser = parse_iso_date)]
    start_date: Option<NaiveDate>,

    /// Last day to process, inclusive (default: until data runs out)
    #[arg(long, value_parser = parse_iso_date)]
    stop_date: Option<NaiveDate>,

    /// YAML configuration file
    #[arg(short, long, env = "STRESS_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    dashboard_common::init_tracing(&args.log_level, args.json_logs)?;

    let config = StressConfig::load(args.config.as_deref())?;
    let paths = UpdatePaths::new(&args.input_folder, &args.deployment_folder);

    let status = RunStatus::load(&paths.status_path)?;
    if status.is_none() && args.start_date.is_none() {
        warn!(
            path = %paths.status_path.display(),
            default = %config.default_start_date,
            "No status file; starting from the configured default"
        );
    }
    let start = resolve_start_date(args.start_date, status, &config);
    info!(start = %start, stop = ?args.stop_date, template = %config.data_template, "Starting water stress update");

    let updater = StressUpdater::from_paths(paths)?;
    let mut source = NetCdfDailySource::new(config);
    let outcome = updater.update(start, args.stop_date, &mut source)?;
    outcome.save(updater.paths())?;

    info!(
        days = outcome.days_processed,
        next_start_date = %outcome.next_start_date,
        countries = outcome.country_names.len(),
        "Water stress update completed"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_dates_parsed() {
        let args = Args::try_parse_from([
            "update-water-stress",
            "--input-folder",
            "in",
            "--deployment-folder",
            "deploy",
            "--start-date",
            "2020-02-28",
        ])
        .unwrap();
        assert_eq!(args.start_date, NaiveDate::from_ymd_opt(2020, 2, 28));
        assert_eq!(args.stop_date, None);
    }

    #[test]
    fn test_bad_date_rejected() {
        let result = Args::try_parse_from([
            "update-water-stress",
            "--input-folder",
            "in",
            "--deployment-folder",
            "deploy",
            "--stop-date",
            "28/02/2020",
        ]);
        assert!(result.is_err());
    }
}
