//! Regular latitude/longitude grids.

use crate::error::{PrepError, PrepResult};
use crate::BoundingBox;
use serde::{Deserialize, Serialize};

/// A rectangular lat/lon mesh defined by two 1-D coordinate axes.
///
/// Cell `(row, col)` sits at `(lons[col], lats[row])`. Data laid out on the
/// grid is row-major: `row * nlon + col`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLonGrid {
    lats: Vec<f64>,
    lons: Vec<f64>,
}

impl LatLonGrid {
    /// Create a grid from its latitude and longitude axes.
    pub fn new(lats: Vec<f64>, lons: Vec<f64>) -> PrepResult<Self> {
        if lats.is_empty() || lons.is_empty() {
            return Err(PrepError::InvalidGrid(format!(
                "axes must be non-empty (lat={}, lon={})",
                lats.len(),
                lons.len()
            )));
        }
        Ok(Self { lats, lons })
    }

    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    pub fn nlat(&self) -> usize {
        self.lats.len()
    }

    pub fn nlon(&self) -> usize {
        self.lons.len()
    }

    /// `(nlat, nlon)`, the shape of any field on this grid.
    pub fn shape(&self) -> (usize, usize) {
        (self.nlat(), self.nlon())
    }

    /// Total number of grid cells.
    pub fn len(&self) -> usize {
        self.nlat() * self.nlon()
    }

    /// Always false for a constructed grid; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the 1D array index for a 2D grid position.
    pub fn flat_index(&self, row: usize, col: usize) -> usize {
        row * self.nlon() + col
    }

    /// Coordinate `(lon, lat)` of a cell.
    pub fn coord(&self, row: usize, col: usize) -> Option<(f64, f64)> {
        Some((*self.lons.get(col)?, *self.lats.get(row)?))
    }

    /// Check that a field of `len` values fits this grid.
    pub fn check_len(&self, len: usize) -> PrepResult<()> {
        if len != self.len() {
            return Err(PrepError::InvalidGrid(format!(
                "field has {} values, grid {}x{} needs {}",
                len,
                self.nlat(),
                self.nlon(),
                self.len()
            )));
        }
        Ok(())
    }

    /// Bounding box spanned by the cell centres.
    pub fn bbox(&self) -> BoundingBox {
        let (min_y, max_y) = min_max(&self.lats);
        let (min_x, max_x) = min_max(&self.lons);
        BoundingBox::new(min_x, min_y, max_x, max_y)
    }

    /// Area weight of each row, `cos(lat)` with latitude in degrees.
    pub fn lat_weights(&self) -> Vec<f64> {
        self.lats.iter().map(|lat| lat.to_radians().cos()).collect()
    }

    /// Rows whose latitude lies within `[min_lat, max_lat]`.
    ///
    /// Bounds are inclusive and `None` leaves that side open. Works for both
    /// ascending and descending latitude axes.
    pub fn rows_in_lat_range(&self, min_lat: Option<f64>, max_lat: Option<f64>) -> Vec<usize> {
        self.lats
            .iter()
            .enumerate()
            .filter(|(_, &lat)| {
                min_lat.map_or(true, |min| lat >= min) && max_lat.map_or(true, |max| lat <= max)
            })
            .map(|(row, _)| row)
            .collect()
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}
