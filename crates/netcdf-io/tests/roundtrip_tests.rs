//! File-level tests for reading and writing NetCDF through netcdf-io.

use chrono::{NaiveDate, NaiveDateTime};
use dashboard_common::LatLonGrid;
use netcdf_io::{write_mask_file, Attributes, GriddedDataset, SeriesTable};
use test_utils::{assert_approx_eq, temp_test_dir};

fn noon(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 6, day).unwrap().and_hms_opt(12, 0, 0).unwrap()
}

/// Write a small `(time, lat, lon)` file with a packed short field.
fn write_packed_fixture(path: &std::path::Path) {
    let mut file = netcdf::create(path).unwrap();
    file.add_attribute("id", "OSTIA-UKMO-L4-GLOB_ICDR-v3.0").unwrap();
    file.add_dimension("time", 1).unwrap();
    file.add_dimension("lat", 2).unwrap();
    file.add_dimension("lon", 3).unwrap();

    let mut time = file.add_variable::<i32>("time", &["time"]).unwrap();
    time.put_attribute("units", "seconds since 1981-01-01 00:00:00").unwrap();
    time.put_values(&[86400i32], ..).unwrap();

    let mut lat = file.add_variable::<f32>("lat", &["lat"]).unwrap();
    lat.put_attribute("units", "degrees_north").unwrap();
    lat.put_values(&[-45.0f32, 45.0], ..).unwrap();

    let mut lon = file.add_variable::<f32>("lon", &["lon"]).unwrap();
    lon.put_values(&[-90.0f32, 0.0, 90.0], ..).unwrap();

    let mut sst = file.add_variable::<i16>("analysed_sst", &["time", "lat", "lon"]).unwrap();
    sst.set_fill_value(-32768i16).unwrap();
    sst.put_attribute("scale_factor", 0.01f32).unwrap();
    sst.put_attribute("add_offset", 273.15f32).unwrap();
    sst.put_attribute("long_name", "analysed sea surface temperature").unwrap();
    sst.put_values(&[0i16, 100, -32768, 200, 300, 400], ..).unwrap();

    let mut mask = file.add_variable::<i8>("mask", &["time", "lat", "lon"]).unwrap();
    mask.put_values(&[1i8, 1, 2, 9, 13, 1], ..).unwrap();
}

#[test]
fn test_read_packed_field_and_time() {
    let dir = temp_test_dir("ncio_");
    let path = dir.path().join("packed.nc");
    write_packed_fixture(&path);

    let ds = GriddedDataset::open(&path).unwrap();
    assert_eq!(ds.global_attr_string("id").as_deref(), Some("OSTIA-UKMO-L4-GLOB_ICDR-v3.0"));

    let times = ds.read_times().unwrap();
    assert_eq!(times, vec![NaiveDate::from_ymd_opt(1981, 1, 2).unwrap().and_hms_opt(0, 0, 0).unwrap()]);

    let grid = ds.read_grid("lat", "lon").unwrap();
    assert_eq!(grid.shape(), (2, 3));

    let sst = ds.read_field("analysed_sst", 0).unwrap();
    assert_eq!(sst.len(), 6);
    assert_approx_eq!(sst[0], 273.15, 1e-4);
    assert_approx_eq!(sst[1], 274.15, 1e-4);
    assert!(sst[2].is_nan());
    assert_approx_eq!(sst[5], 277.15, 1e-4);

    let flags = ds.read_flags("mask", 0).unwrap();
    assert_eq!(flags, vec![1, 1, 2, 9, 13, 1]);

    assert!(ds.read_field("analysed_sst", 1).is_err());
    assert!(ds.read_field("sea_ice_fraction", 0).is_err());
}

#[test]
fn test_mask_file_roundtrip() {
    let dir = temp_test_dir("ncio_");
    let path = dir.path().join("KEN.nc");
    let grid = LatLonGrid::new(vec![-1.0, 0.0, 1.0], vec![36.0, 37.0]).unwrap();

    let mut lat_attrs = Attributes::new();
    lat_attrs.insert("units", "degrees_north");
    lat_attrs.insert("_FillValue", f64::NAN);
    let lon_attrs = Attributes::new();

    let cells = vec![0i8, 1, 1, 1, 0, 0];
    write_mask_file(&path, "KEN", "Kenya", &grid, &lat_attrs, &lon_attrs, &cells).unwrap();

    let ds = GriddedDataset::open(&path).unwrap();
    assert_eq!(ds.global_attr_string("country_code").as_deref(), Some("KEN"));
    assert_eq!(ds.global_attr_string("name").as_deref(), Some("Kenya"));
    assert_eq!(ds.read_grid("lat", "lon").unwrap(), grid);
    assert_eq!(ds.variable_dims("mask").unwrap(), vec!["lat", "lon"]);
    assert_eq!(ds.read_flags("mask", 0).unwrap(), vec![0, 1, 1, 1, 0, 0]);

    let attrs = ds.variable_attributes("lat").unwrap();
    assert_eq!(attrs.get_string("units").as_deref(), Some("degrees_north"));
}

#[test]
fn test_mask_file_rejects_wrong_size() {
    let dir = temp_test_dir("ncio_");
    let grid = LatLonGrid::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
    let result = write_mask_file(
        dir.path().join("BAD.nc"),
        "BAD",
        "Bad",
        &grid,
        &Attributes::new(),
        &Attributes::new(),
        &[1, 0, 1],
    );
    assert!(result.is_err());
}

#[test]
fn test_series_table_roundtrip() {
    let dir = temp_test_dir("ncio_");
    let path = dir.path().join("globmeansst.nc");

    let mut global = Attributes::new();
    global.insert("id", "OSTIA-UKMO-L4-GLOB_ICDR-v3.0");
    let mut table = SeriesTable::new(global);
    let mut var_attrs = Attributes::new();
    var_attrs.insert("units", "Celsius");
    var_attrs.insert("comment", "Using self mask only");
    table.set_attrs("self_sst", var_attrs);
    table.push_row(noon(1), [("self_sst", 20.5), ("self_arctic", -1.25)]);
    table.push_row(noon(2), [("self_sst", 20.75), ("self_arctic", f64::NAN)]);
    table.write(&path).unwrap();

    let back = SeriesTable::read(&path).unwrap();
    assert_eq!(back.times(), &[noon(1), noon(2)]);
    assert_eq!(back.global_attrs().get_string("id").as_deref(), Some("OSTIA-UKMO-L4-GLOB_ICDR-v3.0"));

    let sst = back.variable("self_sst").unwrap();
    assert_eq!(sst.values, vec![20.5, 20.75]);
    assert_eq!(sst.attrs.get_string("units").as_deref(), Some("Celsius"));
    assert!(!sst.attrs.contains("_FillValue"));

    let arctic = back.variable("self_arctic").unwrap();
    assert_eq!(arctic.values[0], -1.25);
    assert!(arctic.values[1].is_nan());
}

#[test]
fn test_series_table_overwrite_and_empty() {
    let dir = temp_test_dir("ncio_");
    let path = dir.path().join("out.nc");

    let mut table = SeriesTable::default();
    assert!(table.write(&path).is_err());
    assert!(!path.exists());

    table.push_row(noon(3), [("self_sst", 1.0)]);
    table.write(&path).unwrap();
    table.push_row(noon(4), [("self_sst", 2.0)]);
    table.write(&path).unwrap();

    assert_eq!(SeriesTable::read(&path).unwrap().len(), 2);
}
