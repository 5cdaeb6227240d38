//! Mask files on disk: one `<CODE>.nc` per country.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use netcdf_io::{write_mask_file, Attributes, GriddedDataset};
use tracing::{debug, info};

use crate::error::MaskResult;
use crate::mask::CountryMask;

/// Coordinate names used in mask files.
pub const LAT_NAME: &str = "lat";
pub const LON_NAME: &str = "lon";

/// Path of the mask file for `code` inside `dir`.
pub fn mask_path(dir: &Path, code: &str) -> PathBuf {
    dir.join(format!("{}.nc", code))
}

/// Write `mask` to `<dir>/<CODE>.nc`, copying the coordinate attributes.
pub fn write_mask(
    dir: &Path,
    mask: &CountryMask,
    lat_attrs: &Attributes,
    lon_attrs: &Attributes,
) -> MaskResult<PathBuf> {
    let path = mask_path(dir, mask.code());
    info!("writing: {}", path.display());
    write_mask_file(
        &path,
        mask.code(),
        mask.name(),
        mask.grid(),
        lat_attrs,
        lon_attrs,
        mask.cells(),
    )?;
    Ok(path)
}

/// Read one mask file. The code is the file stem; the name comes from the
/// `name` global attribute, falling back to the code.
pub fn read_mask(path: &Path) -> MaskResult<CountryMask> {
    let code = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let dataset = GriddedDataset::open(path)?;
    let name = dataset.global_attr_string("name").unwrap_or_else(|| code.clone());
    let grid = dataset.read_grid(LAT_NAME, LON_NAME)?;
    let cells = dataset
        .read_flags("mask", 0)?
        .into_iter()
        .map(|v| i8::from(v != 0))
        .collect();

    CountryMask::new(code, name, grid, cells)
}

/// Load every `*.nc` mask in `dir`, keyed by country code.
pub fn load_masks(dir: &Path) -> MaskResult<BTreeMap<String, CountryMask>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "nc"))
        .collect();
    paths.sort();

    let mut masks = BTreeMap::new();
    for path in paths {
        let mask = read_mask(&path)?;
        masks.insert(mask.code().to_string(), mask);
    }

    debug!(dir = %dir.display(), count = masks.len(), "Loaded masks");
    Ok(masks)
}
