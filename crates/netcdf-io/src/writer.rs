//! Writing per-country mask files.

use std::path::Path;

use dashboard_common::LatLonGrid;
use tracing::debug;

use crate::attrs::Attributes;
use crate::error::{NetCdfError, NetCdfResult};

/// Write a country mask on `grid` to `path`.
///
/// Layout: global attributes `name` and `country_code`, coordinate variables
/// `lat`/`lon` carrying the given attributes, and `mask(lat, lon)` as int8.
pub fn write_mask_file<P: AsRef<Path>>(
    path: P,
    country_code: &str,
    country_name: &str,
    grid: &LatLonGrid,
    lat_attrs: &Attributes,
    lon_attrs: &Attributes,
    mask: &[i8],
) -> NetCdfResult<()> {
    let path = path.as_ref();
    if mask.len() != grid.len() {
        return Err(NetCdfError::InvalidFormat(format!(
            "mask for {} has {} cells, grid has {}",
            country_code,
            mask.len(),
            grid.len()
        )));
    }

    let mut file = netcdf::create(path)?;

    file.add_attribute("name", country_name)?;
    file.add_attribute("country_code", country_code)?;

    file.add_dimension("lat", grid.nlat())?;
    file.add_dimension("lon", grid.nlon())?;

    {
        let mut lat_var = file.add_variable::<f64>("lat", &["lat"])?;
        for (name, value) in lat_attrs.iter().filter(|(n, _)| *n != "_FillValue") {
            lat_var.put_attribute(name, value.clone())?;
        }
        lat_var.put_values(grid.lats(), ..)?;
    }

    {
        let mut lon_var = file.add_variable::<f64>("lon", &["lon"])?;
        for (name, value) in lon_attrs.iter().filter(|(n, _)| *n != "_FillValue") {
            lon_var.put_attribute(name, value.clone())?;
        }
        lon_var.put_values(grid.lons(), ..)?;
    }

    {
        let mut mask_var = file.add_variable::<i8>("mask", &["lat", "lon"])?;
        mask_var.put_values(mask, ..)?;
    }

    debug!(path = %path.display(), country_code, "Wrote mask file");
    Ok(())
}
