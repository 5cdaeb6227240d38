//! Country mask builder.
//!
//! Rasterises every country of a GeoJSON boundary file onto the grid of a
//! reference NetCDF file and writes one `<CODE>.nc` mask per country.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use country_mask::MaskJob;

#[derive(Parser, Debug)]
#[command(name = "create-masks")]
#[command(about = "Build per-country grid masks from a boundary file")]
struct Args {
    /// Any NetCDF file on the target grid, e.g. one daily soil-moisture file
    #[arg(long, env = "MASK_REFERENCE_FILE")]
    reference_file: PathBuf,

    /// GeoJSON FeatureCollection with `name` and `adm0_a3` properties
    #[arg(long, env = "MASK_BOUNDARIES", default_value = "africa-outline-with-countries_6.geojson")]
    boundaries: PathBuf,

    /// Directory receiving the mask files
    #[arg(long, env = "MASK_OUTPUT_DIR", default_value = "masks")]
    output_dir: PathBuf,

    /// Latitude coordinate variable of the reference file
    #[arg(long, default_value = "lat")]
    lat_name: String,

    /// Longitude coordinate variable of the reference file
    #[arg(long, default_value = "lon")]
    lon_name: String,

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

    info!(
        reference = %args.reference_file.display(),
        boundaries = %args.boundaries.display(),
        "Starting mask builder"
    );

    let job = MaskJob {
        reference_file: args.reference_file,
        boundaries: args.boundaries,
        output_dir: args.output_dir,
        lat_name: args.lat_name,
        lon_name: args.lon_name,
    };
    let written = job.run()?;

    info!(masks = written.len(), dir = %job.output_dir.display(), "Mask building completed");
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
    fn test_defaults() {
        let args = Args::try_parse_from(["create-masks", "--reference-file", "sm.nc"]).unwrap();
        assert_eq!(args.reference_file, PathBuf::from("sm.nc"));
        assert_eq!(args.output_dir, PathBuf::from("masks"));
        assert_eq!(args.lat_name, "lat");
        assert!(!args.json_logs);
    }
}
