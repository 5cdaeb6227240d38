//! Statistics of a single L4 file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use dashboard_common::LatLonGrid;
use netcdf_io::{Attributes, GriddedDataset, SeriesTable};
use tracing::{debug, info};

use crate::error::{SstError, SstResult};
use crate::masks::CellMasks;
use crate::products::{Product, KELVIN_OFFSET};
use crate::region::{Region, REGIONS};
use crate::weighted::weighted_mean;

/// Attributes copied from the source temperature variable.
const COPIED_ATTRS: [&str; 3] = ["long_name", "standard_name", "source"];

const COMMENT_ANALYSED: &str = "Masking in common with ESA CCI";
const COMMENT_ALL: &str = "Masking in common with ESA CCI, ignoring sea ice";
const COMMENT_SELF: &str = "Using self mask only";

pub const SEA_ICE_VARIABLE: &str = "sea_ice_fraction";
pub const SEA_ICE_OUTPUT: &str = "sea_ice_fraction_arctic";

/// Computes per-region mean SST for each time step of a file.
///
/// Land-sea masks are loaded on first use of each product id and cached.
pub struct SstProcessor {
    lsm_dir: PathBuf,
    lsm_cache: HashMap<String, Vec<i32>>,
}

impl SstProcessor {
    pub fn new(lsm_dir: impl Into<PathBuf>) -> Self {
        Self {
            lsm_dir: lsm_dir.into(),
            lsm_cache: HashMap::new(),
        }
    }

    /// Process every time step of one file into a table row.
    pub fn process_file(&mut self, path: &Path) -> SstResult<SeriesTable> {
        let dataset = GriddedDataset::open(path)?;
        let id = dataset
            .global_attr_string("id")
            .ok_or_else(|| SstError::MissingAttribute {
                path: path.to_path_buf(),
                name: "id".to_string(),
            })?;
        let product = Product::classify(&id);
        let grid = dataset.read_grid("lat", "lon")?;
        let times = dataset.read_times()?;
        debug!(path = %path.display(), id = %id, steps = times.len(), "Processing SST file");

        let sst_variable = product.sst_variable();
        let sst_attrs = output_attrs(&dataset.variable_attributes(sst_variable)?);
        let lsm = self.land_sea_mask(&product, &grid)?;
        let weights = grid.lat_weights();
        let regions: Vec<(Region, Vec<usize>)> = REGIONS.iter().map(|r| (*r, r.rows(&grid))).collect();

        let mut table = SeriesTable::new(dataset.global_attributes());
        for (region, _) in &regions {
            for (name, comment) in region_variables(region) {
                let attrs = match comment {
                    Some(comment) => {
                        let mut attrs = sst_attrs.clone();
                        attrs.insert("comment", comment);
                        attrs
                    }
                    None => Attributes::new(),
                };
                table.set_attrs(&name, attrs);
            }
        }

        for (step, time) in times.iter().enumerate() {
            let sst_k = dataset.read_field(sst_variable, step)?;
            grid.check_len(sst_k.len())?;
            let sea_ice = dataset.read_field(SEA_ICE_VARIABLE, step)?;
            let flags = if product.is_ostia() {
                None
            } else {
                Some(dataset.read_flags("mask", step)?)
            };
            let masks = CellMasks::derive(&product, &sst_k, &sea_ice, flags.as_deref(), lsm)?;

            let sst_c: Vec<f64> = sst_k.iter().map(|k| k - KELVIN_OFFSET).collect();
            let analysed = CellMasks::both(&masks.ice_free, &masks.common);
            let all_common = CellMasks::both(&masks.all, &masks.common);

            let mut row: Vec<(String, f64)> = Vec::new();
            for (region, rows) in &regions {
                let mean = |values: &[f64], include: &[bool]| {
                    weighted_mean(values, include, &weights, rows, grid.nlon())
                };
                row.push((format!("analysed_{}", region.name), mean(&sst_c, &analysed)));
                if region.is_arctic() {
                    row.push((SEA_ICE_OUTPUT.to_string(), mean(&sea_ice, &masks.common)));
                }
                row.push((format!("all_{}", region.name), mean(&sst_c, &all_common)));
                row.push((format!("self_{}", region.name), mean(&sst_c, &masks.all)));
            }
            table.push_row(*time, row.iter().map(|(name, value)| (name.as_str(), *value)));
        }

        Ok(table)
    }

    /// The product's land-sea mask flags, or `None` for OSTIA products.
    fn land_sea_mask(&mut self, product: &Product, grid: &LatLonGrid) -> SstResult<Option<&[i32]>> {
        let Some(filename) = product.lsm_filename() else {
            return Ok(None);
        };

        if !self.lsm_cache.contains_key(&product.id) {
            let path = self.lsm_dir.join(filename);
            let flags = GriddedDataset::open(&path)?.read_flags("mask", 0)?;
            info!(path = %path.display(), id = %product.id, "Loaded land-sea mask");
            self.lsm_cache.insert(product.id.clone(), flags);
        }

        let flags = self.lsm_cache.get(&product.id).map(Vec::as_slice);
        if let Some(flags) = flags {
            if flags.len() != grid.len() {
                return Err(SstError::ShapeMismatch {
                    what: format!("land-sea mask of {}", product.id),
                    expected: grid.len(),
                    found: flags.len(),
                });
            }
        }
        Ok(flags)
    }
}

/// Output variables of a region in file order, with the comment of each SST
/// statistic. The sea-ice mean carries no attributes.
fn region_variables(region: &Region) -> Vec<(String, Option<&'static str>)> {
    let mut vars = vec![(format!("analysed_{}", region.name), Some(COMMENT_ANALYSED))];
    if region.is_arctic() {
        vars.push((SEA_ICE_OUTPUT.to_string(), None));
    }
    vars.push((format!("all_{}", region.name), Some(COMMENT_ALL)));
    vars.push((format!("self_{}", region.name), Some(COMMENT_SELF)));
    vars
}

fn output_attrs(source: &Attributes) -> Attributes {
    let mut attrs = Attributes::new();
    for name in COPIED_ATTRS {
        if let Some(value) = source.get(name) {
            attrs.insert(name, value.clone());
        }
    }
    attrs.insert("units", "Celsius");
    attrs
}
