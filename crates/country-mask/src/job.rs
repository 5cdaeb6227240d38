//! The mask-building job: boundaries plus a reference grid in, mask files out.

use std::path::{Path, PathBuf};

use netcdf_io::GriddedDataset;
use tracing::info;

use crate::boundary::load_boundaries;
use crate::error::MaskResult;
use crate::mask::build_mask;
use crate::store::write_mask;

/// Inputs of a mask-building run.
#[derive(Debug, Clone)]
pub struct MaskJob {
    /// Any file on the target grid, e.g. one daily soil-moisture file.
    pub reference_file: PathBuf,
    /// GeoJSON FeatureCollection of country boundaries.
    pub boundaries: PathBuf,
    pub output_dir: PathBuf,
    pub lat_name: String,
    pub lon_name: String,
}

impl MaskJob {
    /// Build and write one mask per country. Returns the written paths in
    /// country-code order.
    pub fn run(&self) -> MaskResult<Vec<PathBuf>> {
        let reference = GriddedDataset::open(&self.reference_file)?;
        let grid = reference.read_grid(&self.lat_name, &self.lon_name)?;
        let lat_attrs = reference.variable_attributes(&self.lat_name)?;
        let lon_attrs = reference.variable_attributes(&self.lon_name)?;
        info!(
            reference = %self.reference_file.display(),
            nlat = grid.nlat(),
            nlon = grid.nlon(),
            "Loaded reference grid"
        );

        let boundaries = load_boundaries(&self.boundaries)?;
        ensure_dir(&self.output_dir)?;

        let mut written = Vec::with_capacity(boundaries.len());
        for boundary in boundaries.values() {
            let mask = build_mask(boundary, &grid);
            written.push(write_mask(&self.output_dir, &mask, &lat_attrs, &lon_attrs)?);
        }

        info!(countries = written.len(), output_dir = %self.output_dir.display(), "Masks written");
        Ok(written)
    }
}

fn ensure_dir(dir: &Path) -> MaskResult<()> {
    std::fs::create_dir_all(dir)?;
    Ok(())
}
