//! GeoJSON boundary file types.
//!
//! Only the parts of a FeatureCollection the mask job reads are modelled:
//! the `name` and `adm0_a3` properties and the geometry. Coordinates stay as
//! raw JSON until the geometry type is known.

use serde::Deserialize;

/// A GeoJSON FeatureCollection of country boundaries.
#[derive(Debug, Clone, Deserialize)]
pub struct BoundaryCollection {
    pub features: Vec<BoundaryFeature>,
}

/// One country feature.
#[derive(Debug, Clone, Deserialize)]
pub struct BoundaryFeature {
    pub properties: CountryProperties,
    pub geometry: Option<RawGeometry>,
}

/// Feature properties. Everything besides name and code is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CountryProperties {
    pub name: String,
    pub adm0_a3: String,
}

/// Geometry with its type tag and untyped coordinates.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGeometry {
    #[serde(rename = "type")]
    pub type_: String,

    #[serde(default)]
    pub coordinates: serde_json::Value,
}

/// A position as written in GeoJSON: `[lon, lat]` with an optional altitude.
pub type Position = Vec<f64>;

/// Polygon coordinates: exterior ring first, then holes.
pub type PolygonCoords = Vec<Vec<Position>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feature_collection() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"name": "Kenya", "adm0_a3": "KEN", "pop_est": 47615739},
                "geometry": {"type": "Point", "coordinates": [37.0, 0.5]}
            }]
        }"#;
        let collection: BoundaryCollection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.features.len(), 1);
        let feature = &collection.features[0];
        assert_eq!(feature.properties.adm0_a3, "KEN");
        assert_eq!(feature.geometry.as_ref().unwrap().type_, "Point");
    }

    #[test]
    fn test_missing_code_is_an_error() {
        let json = r#"{"features": [{"properties": {"name": "Nowhere"}, "geometry": null}]}"#;
        assert!(serde_json::from_str::<BoundaryCollection>(json).is_err());
    }
}
