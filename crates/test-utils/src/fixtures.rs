//! Common test fixtures for the dashboard jobs.

/// GeoJSON boundary documents.
pub mod boundaries {
    /// Two countries: a plain square and a square with a hole.
    ///
    /// `SQR` covers lon [0, 10] x lat [0, 10]. `HOL` covers lon [20, 30] x
    /// lat [0, 10] minus the hole lon [23, 27] x lat [3, 7].
    pub const SQUARE_AND_HOLE: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": { "name": "Squareland", "adm0_a3": "SQR" },
      "geometry": {
        "type": "Polygon",
        "coordinates": [[[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]]]
      }
    },
    {
      "type": "Feature",
      "properties": { "name": "Holeland", "adm0_a3": "HOL" },
      "geometry": {
        "type": "Polygon",
        "coordinates": [
          [[20, 0], [30, 0], [30, 10], [20, 10], [20, 0]],
          [[23, 3], [27, 3], [27, 7], [23, 7], [23, 3]]
        ]
      }
    }
  ]
}"#;

    /// One country made of two islands.
    pub const ISLANDS: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": { "name": "Islandia", "adm0_a3": "ISL" },
      "geometry": {
        "type": "MultiPolygon",
        "coordinates": [
          [[[-10, -10], [-5, -10], [-5, -5], [-10, -5], [-10, -10]]],
          [[[5, 5], [10, 5], [10, 10], [5, 10]]]
        ]
      }
    }
  ]
}"#;
}

/// Product identifiers of the SST analyses.
pub mod products {
    pub const OSTIA_CCI: &str = "OSTIA-ESACCI-L4-GLOB-v3.0";
    pub const OSTIA_ICDR: &str = "OSTIA-UKMO-L4-GLOB_ICDR-v3.0";
    pub const DMI_ARCTIC: &str = "DMI-L4UHskin-ARC_IST-DMI_OI";
    pub const CMC_02: &str = "CMC0.2deg-CMC-L4-GLOB-v2.0";
    pub const CMC_01: &str = "CMC0.1deg-CMC-L4-GLOB-v3.0";
    pub const OTHER: &str = "AVHRR_OI-NCEI-L4-GLOB-v2.1";
}
