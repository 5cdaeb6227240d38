//! Extract one SST statistic to CSV for the dashboard.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use sst_stats::extract::{DEFAULT_INPUT, DEFAULT_OUTPUT, DEFAULT_VARIABLE};

#[derive(Parser, Debug)]
#[command(name = "sst-extract")]
#[command(about = "Write one variable of a mean SST file as date,year,doy CSV")]
struct Args {
    /// Mean SST file written by calc-globsst
    #[arg(long, default_value = DEFAULT_INPUT)]
    input_path: PathBuf,

    /// Variable to extract
    #[arg(long, default_value = DEFAULT_VARIABLE)]
    variable_name: String,

    /// CSV file to write
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output_path: PathBuf,

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

    sst_stats::extract_csv(&args.input_path, &args.variable_name, &args.output_path)?;
    Ok(())
}
