//! Global and Arctic mean SST calculator.
//!
//! Walks a tree of L4 SST analyses and writes their area-weighted regional
//! means as one time-series NetCDF file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use sst_stats::SstJob;

#[derive(Parser, Debug)]
#[command(name = "calc-globsst")]
#[command(about = "Calculate global and Arctic mean SST from L4 files")]
struct Args {
    /// Root directory searched recursively for `*.nc` files
    path: PathBuf,

    /// Output NetCDF file
    #[arg(short, long, default_value = "globmeansst.nc")]
    output: PathBuf,

    /// Only process files whose time is not yet in the output
    #[arg(short, long)]
    update: bool,

    /// Directory holding the `ESACCI_LSM_<id>.nc` land-sea masks
    #[arg(long, env = "SST_LSM_DIR", default_value = ".")]
    lsm_dir: PathBuf,

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

    info!(root = %args.path.display(), output = %args.output.display(), update = args.update, "Starting SST means");

    let job = SstJob {
        root: args.path,
        output: args.output,
        update: args.update,
        lsm_dir: args.lsm_dir,
    };
    let processed = job.run()?;

    info!(files = processed, "SST means completed");
    Ok(())
}
