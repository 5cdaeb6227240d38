//! Latitude bands the statistics are computed over.

use dashboard_common::LatLonGrid;

/// A named latitude band with inclusive, optionally open bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub name: &'static str,
    pub min_lat: Option<f64>,
    pub max_lat: Option<f64>,
}

/// Near-global ocean between 60S and 60N, and the Arctic north of 60N.
pub const REGIONS: [Region; 2] = [
    Region {
        name: "sst",
        min_lat: Some(-60.0),
        max_lat: Some(60.0),
    },
    Region {
        name: "arctic",
        min_lat: Some(60.0),
        max_lat: None,
    },
];

impl Region {
    /// Grid rows inside the band.
    pub fn rows(&self, grid: &LatLonGrid) -> Vec<usize> {
        grid.rows_in_lat_range(self.min_lat, self.max_lat)
    }

    pub fn is_arctic(&self) -> bool {
        self.name == "arctic"
    }
}
