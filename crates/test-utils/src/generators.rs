//! Generators for synthetic grid axes.
//!
//! Values follow simple formulas so tests can compute expected results by
//! hand.

/// Evenly spaced axis from `start` with `n` values `step` apart.
///
/// ```
/// use test_utils::regular_axis;
///
/// assert_eq!(regular_axis(-1.0, 0.5, 5), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
/// ```
pub fn regular_axis(start: f64, step: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Cell-centre latitudes of a global grid at `resolution` degrees, south to north.
pub fn global_lat_centres(resolution: f64) -> Vec<f64> {
    let n = (180.0 / resolution).round() as usize;
    regular_axis(-90.0 + resolution / 2.0, resolution, n)
}

/// Cell-centre longitudes of a global grid at `resolution` degrees, from -180.
pub fn global_lon_centres(resolution: f64) -> Vec<f64> {
    let n = (360.0 / resolution).round() as usize;
    regular_axis(-180.0 + resolution / 2.0, resolution, n)
}
