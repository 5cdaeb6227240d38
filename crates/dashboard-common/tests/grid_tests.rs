//! Tests for grid geometry and area weighting on realistic axes.

use dashboard_common::{BoundingBox, LatLonGrid};
use test_utils::{assert_approx_eq, global_lat_centres, global_lon_centres};

// ============================================================================
// Global grids
// ============================================================================

#[test]
fn test_global_quarter_degree_shape() {
    let grid = LatLonGrid::new(global_lat_centres(0.25), global_lon_centres(0.25)).unwrap();
    assert_eq!(grid.shape(), (720, 1440));
    assert_eq!(grid.len(), 720 * 1440);
}

#[test]
fn test_global_bbox_spans_cell_centres() {
    let grid = LatLonGrid::new(global_lat_centres(1.0), global_lon_centres(1.0)).unwrap();
    let bbox = grid.bbox();
    assert_approx_eq!(bbox.min_x, -179.5, 1e-9);
    assert_approx_eq!(bbox.max_x, 179.5, 1e-9);
    assert_approx_eq!(bbox.min_y, -89.5, 1e-9);
    assert_approx_eq!(bbox.max_y, 89.5, 1e-9);
}

#[test]
fn test_bbox_ignores_nan_coordinates() {
    let grid = LatLonGrid::new(vec![f64::NAN, 1.0, 2.0], vec![5.0, f64::NAN]).unwrap();
    assert_eq!(grid.bbox(), BoundingBox::new(5.0, 1.0, 5.0, 2.0));
}

// ============================================================================
// Latitude bands
// ============================================================================

#[test]
fn test_sst_band_selection_is_inclusive() {
    let lats: Vec<f64> = (-90..=90).step_by(10).map(f64::from).collect();
    let grid = LatLonGrid::new(lats, vec![0.0]).unwrap();

    let band = grid.rows_in_lat_range(Some(-60.0), Some(60.0));
    let band_lats: Vec<f64> = band.iter().map(|&r| grid.lats()[r]).collect();
    assert_eq!(band_lats.first(), Some(&-60.0));
    assert_eq!(band_lats.last(), Some(&60.0));
    assert_eq!(band.len(), 13);

    let arctic = grid.rows_in_lat_range(Some(60.0), None);
    assert_eq!(arctic.len(), 4);
}

#[test]
fn test_band_outside_axis_is_empty() {
    let grid = LatLonGrid::new(vec![-10.0, 0.0, 10.0], vec![0.0]).unwrap();
    assert!(grid.rows_in_lat_range(Some(60.0), None).is_empty());
}

// ============================================================================
// Weights
// ============================================================================

#[test]
fn test_weights_symmetric_about_equator() {
    let grid = LatLonGrid::new(global_lat_centres(2.0), vec![0.0]).unwrap();
    let weights = grid.lat_weights();
    let n = weights.len();
    for i in 0..n / 2 {
        assert_approx_eq!(weights[i], weights[n - 1 - i], 1e-12);
    }
    assert!(weights.iter().all(|w| *w > 0.0));
}

#[test]
fn test_check_len() {
    let grid = LatLonGrid::new(vec![0.0, 1.0], vec![0.0, 1.0, 2.0]).unwrap();
    assert!(grid.check_len(6).is_ok());
    assert!(grid.check_len(5).is_err());
}
