//! Rasterising a boundary onto a lat/lon grid.

use dashboard_common::LatLonGrid;
use rayon::prelude::*;
use tracing::debug;

use crate::boundary::CountryBoundary;
use crate::error::MaskResult;

/// A 0/1 mask of one country on a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryMask {
    code: String,
    name: String,
    grid: LatLonGrid,
    cells: Vec<i8>,
}

impl CountryMask {
    /// Wrap existing cells. Fails when `cells` does not fit `grid`.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        grid: LatLonGrid,
        cells: Vec<i8>,
    ) -> MaskResult<Self> {
        grid.check_len(cells.len())?;
        Ok(Self {
            code: code.into(),
            name: name.into(),
            grid,
            cells,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grid(&self) -> &LatLonGrid {
        &self.grid
    }

    /// Row-major cells, `1` inside the country.
    pub fn cells(&self) -> &[i8] {
        &self.cells
    }

    /// `(nlat, nlon)` of the mask.
    pub fn shape(&self) -> (usize, usize) {
        self.grid.shape()
    }

    pub fn is_set(&self, index: usize) -> bool {
        self.cells.get(index).is_some_and(|c| *c != 0)
    }

    /// Number of cells inside the country.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|c| **c != 0).count()
    }
}

/// Build the mask of `boundary` on `grid`.
///
/// A cell is set iff the boundary strictly contains its centre `(lon, lat)`.
/// Rows are processed in parallel; rows outside the boundary's latitude
/// extent are skipped.
pub fn build_mask(boundary: &CountryBoundary, grid: &LatLonGrid) -> CountryMask {
    let nlon = grid.nlon();
    let mut cells = vec![0i8; grid.len()];

    if let Some(bbox) = boundary.bbox() {
        cells
            .par_chunks_mut(nlon)
            .zip(grid.lats().par_iter())
            .filter(|(_, lat)| **lat >= bbox.min_y && **lat <= bbox.max_y)
            .for_each(|(row, lat)| {
                for (cell, lon) in row.iter_mut().zip(grid.lons()) {
                    if boundary.contains(*lon, *lat) {
                        *cell = 1;
                    }
                }
            });
    }

    let mask = CountryMask {
        code: boundary.code().to_string(),
        name: boundary.name().to_string(),
        grid: grid.clone(),
        cells,
    };
    debug!(code = %mask.code, cells = mask.count(), "Built mask");
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::parse_boundaries;
    use test_utils::fixtures::boundaries;
    use test_utils::regular_axis;

    #[test]
    fn test_mask_of_square() {
        let map = parse_boundaries(boundaries::SQUARE_AND_HOLE).unwrap();
        // lats -1, 1, 3, ..., 11 ; lons -1, 1, 3, ..., 11
        let grid = LatLonGrid::new(regular_axis(-1.0, 2.0, 7), regular_axis(-1.0, 2.0, 7)).unwrap();
        let mask = build_mask(&map["SQR"], &grid);

        assert_eq!(mask.shape(), (7, 7));
        // Cells at 1, 3, 5, 7, 9 in both directions are inside: 5 x 5
        assert_eq!(mask.count(), 25);
        assert!(!mask.is_set(grid.flat_index(0, 3)));
        assert!(mask.is_set(grid.flat_index(1, 1)));
        assert!(mask.is_set(grid.flat_index(5, 5)));
        assert!(!mask.is_set(grid.flat_index(6, 5)));
    }

    #[test]
    fn test_mask_excludes_cells_on_boundary() {
        let map = parse_boundaries(boundaries::SQUARE_AND_HOLE).unwrap();
        // lats and lons 0, 5, 10: only (5, 5) is strictly inside
        let axis = regular_axis(0.0, 5.0, 3);
        let grid = LatLonGrid::new(axis.clone(), axis).unwrap();
        let mask = build_mask(&map["SQR"], &grid);
        assert_eq!(mask.cells(), &[0, 0, 0, 0, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        let grid = LatLonGrid::new(vec![0.0, 1.0], vec![0.0]).unwrap();
        assert!(CountryMask::new("X", "X", grid, vec![1, 0, 1]).is_err());
    }
}
