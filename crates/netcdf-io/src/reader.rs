//! Reading gridded NetCDF files with CF decoding.

use std::path::{Path, PathBuf};
use std::sync::Once;

use chrono::NaiveDateTime;
use dashboard_common::{CfTimeUnits, LatLonGrid};
use tracing::debug;

use crate::attrs::{attr_as_f64, attr_as_string, Attributes};
use crate::error::{NetCdfError, NetCdfResult};

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when probing for optional
/// attributes or trying a read type the variable does not store). This creates
/// confusing log spam like:
///
/// ```text
/// HDF5-DIAG: Error detected in HDF5 (1.10.8) thread 3:
///   #003: ../../../src/H5Adense.c line 397 in H5A__dense_open(): can't locate attribute in name index
/// ```
///
/// Called by [`GriddedDataset::open`]; safe to call more than once.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Read a variable slice into f64, whatever numeric type it is stored as.
///
/// Each candidate type is tried in turn; the first read that succeeds wins.
macro_rules! read_as_f64 {
    (@try $result:ident, $var:expr, $extents:expr, $($ty:ty),+) => {
        $(
            if $result.is_none() {
                let values: Result<Vec<$ty>, _> = $var.get_values($extents);
                if let Ok(values) = values {
                    $result = Some(values.into_iter().map(|v| v as f64).collect());
                }
            }
        )+
    };
    ($var:expr, $extents:expr) => {{
        let mut result: Option<Vec<f64>> = None;
        read_as_f64!(@try result, $var, $extents, f64, f32, i32, i16, i8, u8, u16, u32);
        result
    }};
}

/// An open NetCDF file holding gridded fields.
pub struct GriddedDataset {
    path: PathBuf,
    file: netcdf::File,
}

impl GriddedDataset {
    /// Open a NetCDF file for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> NetCdfResult<Self> {
        silence_hdf5_errors();

        let path = path.as_ref().to_path_buf();
        let file = netcdf::open(&path).map_err(|e| {
            NetCdfError::InvalidFormat(format!("Failed to open {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), "Opened NetCDF file");
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of every variable in the root group.
    pub fn variable_names(&self) -> Vec<String> {
        self.file.variables().map(|v| v.name()).collect()
    }

    pub fn dimension_len(&self, name: &str) -> Option<usize> {
        self.file.dimension(name).map(|d| d.len())
    }

    /// Dimension names of a variable, outermost first.
    pub fn variable_dims(&self, name: &str) -> NetCdfResult<Vec<String>> {
        let var = self.variable(name)?;
        Ok(var.dimensions().iter().map(|d| d.name()).collect())
    }

    /// All global attributes, in file order.
    pub fn global_attributes(&self) -> Attributes {
        self.file
            .attributes()
            .filter_map(|attr| {
                let name = attr.name().to_string();
                match attr.value() {
                    Ok(value) => Some((name, value)),
                    Err(e) => {
                        debug!(attribute = %name, error = %e, "Skipping unreadable global attribute");
                        None
                    }
                }
            })
            .collect()
    }

    /// A global text attribute such as `id` or `name`.
    pub fn global_attr_string(&self, name: &str) -> Option<String> {
        let attr = self.file.attribute(name)?;
        attr.value().ok().as_ref().and_then(attr_as_string)
    }

    /// All attributes of a variable, in file order.
    pub fn variable_attributes(&self, name: &str) -> NetCdfResult<Attributes> {
        let var = self.variable(name)?;
        let attrs = var
            .attributes()
            .filter_map(|attr| {
                let attr_name = attr.name().to_string();
                match attr.value() {
                    Ok(value) => Some((attr_name, value)),
                    Err(e) => {
                        debug!(variable = name, attribute = %attr_name, error = %e, "Skipping unreadable attribute");
                        None
                    }
                }
            })
            .collect();
        Ok(attrs)
    }

    /// Read the lat/lon axes into a grid.
    pub fn read_grid(&self, lat_name: &str, lon_name: &str) -> NetCdfResult<LatLonGrid> {
        let lats = self.read_coordinate(lat_name)?;
        let lons = self.read_coordinate(lon_name)?;
        Ok(LatLonGrid::new(lats, lons)?)
    }

    /// Read a 1-D coordinate variable, decoded.
    pub fn read_coordinate(&self, name: &str) -> NetCdfResult<Vec<f64>> {
        let var = self.variable(name)?;
        if var.dimensions().len() != 1 {
            return Err(NetCdfError::InvalidFormat(format!(
                "coordinate '{}' has {} dimensions, expected 1",
                name,
                var.dimensions().len()
            )));
        }
        let raw = read_as_f64!(var, ..).ok_or_else(|| read_failure(name))?;
        Ok(Packing::of(&var).decode(raw))
    }

    /// Read a decoded 2-D field.
    ///
    /// Fill values and NaNs become NaN; packed values are unpacked with
    /// `scale_factor` and `add_offset`. For `(time, lat, lon)` variables the
    /// slice at `time_index` is read.
    pub fn read_field(&self, name: &str, time_index: usize) -> NetCdfResult<Vec<f64>> {
        let var = self.variable(name)?;
        let raw = self.read_raw(&var, name, time_index)?;
        Ok(Packing::of(&var).decode(raw))
    }

    /// Read integer flag values of a 2-D field. Fill and NaN cells read as 0.
    pub fn read_flags(&self, name: &str, time_index: usize) -> NetCdfResult<Vec<i32>> {
        let var = self.variable(name)?;
        let raw = self.read_raw(&var, name, time_index)?;
        let fill = Packing::of(&var).fill_value;
        Ok(raw
            .into_iter()
            .map(|v| if v.is_nan() || Some(v) == fill { 0 } else { v as i32 })
            .collect())
    }

    /// Read the `time` coordinate decoded with its CF units.
    pub fn read_times(&self) -> NetCdfResult<Vec<NaiveDateTime>> {
        let var = self.variable("time")?;
        let units = var
            .attribute_value("units")
            .and_then(|v| v.ok())
            .as_ref()
            .and_then(attr_as_string)
            .ok_or_else(|| NetCdfError::MissingData("time:units attribute".to_string()))?;
        let units = CfTimeUnits::parse(&units)?;

        let raw = read_as_f64!(var, ..).ok_or_else(|| read_failure("time"))?;
        Ok(raw.into_iter().map(|v| units.decode(v)).collect())
    }

    fn variable(&self, name: &str) -> NetCdfResult<netcdf::Variable<'_>> {
        self.file.variable(name).ok_or_else(|| {
            NetCdfError::MissingData(format!("variable '{}' in {}", name, self.path.display()))
        })
    }

    fn read_raw(&self, var: &netcdf::Variable<'_>, name: &str, time_index: usize) -> NetCdfResult<Vec<f64>> {
        let raw = match var.dimensions().len() {
            1 | 2 => read_as_f64!(var, ..),
            3 => {
                let steps = var.dimensions()[0].len();
                if time_index >= steps {
                    return Err(NetCdfError::InvalidFormat(format!(
                        "time index {} out of range for '{}' ({} steps)",
                        time_index, name, steps
                    )));
                }
                read_as_f64!(var, (time_index, .., ..))
            }
            n => {
                return Err(NetCdfError::InvalidFormat(format!(
                    "variable '{}' has {} dimensions, expected 2 or 3",
                    name, n
                )))
            }
        };
        raw.ok_or_else(|| read_failure(name))
    }
}

fn read_failure(name: &str) -> NetCdfError {
    NetCdfError::InvalidFormat(format!("variable '{}' could not be read as a numeric type", name))
}

/// CF packing attributes of a variable.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Packing {
    fill_value: Option<f64>,
    scale_factor: f64,
    add_offset: f64,
}

impl Packing {
    fn of(var: &netcdf::Variable<'_>) -> Self {
        Self {
            fill_value: get_f64_attr(var, "_FillValue").or_else(|| get_f64_attr(var, "missing_value")),
            scale_factor: get_f64_attr(var, "scale_factor").unwrap_or(1.0),
            add_offset: get_f64_attr(var, "add_offset").unwrap_or(0.0),
        }
    }

    fn decode(&self, raw: Vec<f64>) -> Vec<f64> {
        raw.into_iter()
            .map(|v| {
                if v.is_nan() || Some(v) == self.fill_value {
                    f64::NAN
                } else {
                    v * self.scale_factor + self.add_offset
                }
            })
            .collect()
    }
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable<'_>, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

fn get_f64_attr(var: &netcdf::Variable<'_>, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    attr_as_f64(&attr_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packing_decode() {
        let packing = Packing {
            fill_value: Some(-32768.0),
            scale_factor: 0.01,
            add_offset: 273.15,
        };
        let decoded = packing.decode(vec![0.0, 100.0, -32768.0, f64::NAN]);
        assert!((decoded[0] - 273.15).abs() < 1e-9);
        assert!((decoded[1] - 274.15).abs() < 1e-9);
        assert!(decoded[2].is_nan());
        assert!(decoded[3].is_nan());
    }

    #[test]
    fn test_open_missing_file() {
        let result = GriddedDataset::open("/nonexistent/path/file.nc");
        assert!(matches!(result, Err(NetCdfError::InvalidFormat(_))));
    }
}
