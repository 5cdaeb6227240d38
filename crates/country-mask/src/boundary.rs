//! Country boundaries and point containment.

use std::collections::BTreeMap;
use std::path::Path;

use dashboard_common::BoundingBox;
use geo::{Contains, Coord, LineString, MultiPolygon, Point, Polygon};
use tracing::{debug, warn};

use crate::error::{MaskError, MaskResult};
use crate::geojson::{BoundaryCollection, BoundaryFeature, PolygonCoords, Position};

/// A closed ring needs at least three distinct positions plus the closing one.
const MIN_RING_POSITIONS: usize = 4;

/// A country outline with its code and display name.
#[derive(Debug, Clone)]
pub struct CountryBoundary {
    code: String,
    name: String,
    shape: MultiPolygon<f64>,
    bbox: Option<BoundingBox>,
}

impl CountryBoundary {
    pub fn new(code: impl Into<String>, name: impl Into<String>, shape: MultiPolygon<f64>) -> Self {
        let bbox = BoundingBox::from_points(
            shape
                .iter()
                .flat_map(|polygon| polygon.exterior().coords())
                .map(|c| (c.x, c.y)),
        );
        Self {
            code: code.into(),
            name: name.into(),
            shape,
            bbox,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &MultiPolygon<f64> {
        &self.shape
    }

    /// Extent of the outline, `None` when every ring was degenerate.
    pub fn bbox(&self) -> Option<BoundingBox> {
        self.bbox
    }

    /// Whether `(lon, lat)` lies strictly inside the country.
    ///
    /// Points on an edge and points inside a hole are outside. Parts are
    /// tested one by one, so a point on an edge shared by two parts of the
    /// same country is outside as well.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        match &self.bbox {
            Some(bbox) if bbox.contains_point(lon, lat) => self.shape.contains(&Point::new(lon, lat)),
            _ => false,
        }
    }
}

/// Load every country of a GeoJSON boundary file, keyed by `adm0_a3`.
pub fn load_boundaries<P: AsRef<Path>>(path: P) -> MaskResult<BTreeMap<String, CountryBoundary>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let boundaries = parse_boundaries(&json)?;
    debug!(path = %path.display(), countries = boundaries.len(), "Loaded boundaries");
    Ok(boundaries)
}

/// Parse a GeoJSON FeatureCollection into boundaries keyed by `adm0_a3`.
///
/// A later feature with an already seen code replaces the earlier one.
pub fn parse_boundaries(json: &str) -> MaskResult<BTreeMap<String, CountryBoundary>> {
    let collection: BoundaryCollection = serde_json::from_str(json)?;

    let mut boundaries = BTreeMap::new();
    for feature in collection.features {
        let boundary = boundary_from_feature(feature)?;
        if boundary.bbox.is_none() {
            warn!(code = %boundary.code, "Boundary has no usable rings; its mask will be empty");
        }
        if let Some(previous) = boundaries.insert(boundary.code.clone(), boundary) {
            warn!(code = %previous.code, name = %previous.name, "Duplicate country code; keeping the later feature");
        }
    }
    Ok(boundaries)
}

fn boundary_from_feature(feature: BoundaryFeature) -> MaskResult<CountryBoundary> {
    let code = feature.properties.adm0_a3;
    let name = feature.properties.name;

    let geometry = feature.geometry.ok_or_else(|| MaskError::UnsupportedGeometry {
        feature: code.clone(),
        kind: "null".to_string(),
    })?;

    let invalid = |e: serde_json::Error| MaskError::InvalidGeometry {
        feature: code.clone(),
        reason: e.to_string(),
    };

    let polygons: Vec<PolygonCoords> = match geometry.type_.as_str() {
        "Polygon" => vec![serde_json::from_value(geometry.coordinates).map_err(invalid)?],
        "MultiPolygon" => serde_json::from_value(geometry.coordinates).map_err(invalid)?,
        other => {
            return Err(MaskError::UnsupportedGeometry {
                feature: code.clone(),
                kind: other.to_string(),
            })
        }
    };

    let mut shape = Vec::with_capacity(polygons.len());
    for rings in &polygons {
        if let Some(polygon) = to_polygon(&code, rings)? {
            shape.push(polygon);
        }
    }

    Ok(CountryBoundary::new(code, name, MultiPolygon::new(shape)))
}

/// Build a polygon, closing rings and dropping degenerate ones.
///
/// Returns `None` when the exterior ring itself is degenerate.
fn to_polygon(code: &str, rings: &[Vec<Position>]) -> MaskResult<Option<Polygon<f64>>> {
    let mut closed = Vec::with_capacity(rings.len());
    for ring in rings {
        closed.push(to_ring(code, ring)?);
    }

    let mut closed = closed.into_iter();
    let exterior = match closed.next().flatten() {
        Some(exterior) => exterior,
        None => return Ok(None),
    };
    let interiors: Vec<LineString<f64>> = closed.flatten().collect();

    Ok(Some(Polygon::new(exterior, interiors)))
}

fn to_ring(code: &str, positions: &[Position]) -> MaskResult<Option<LineString<f64>>> {
    let mut coords = Vec::with_capacity(positions.len() + 1);
    for position in positions {
        match position.as_slice() {
            [x, y, ..] => coords.push(Coord { x: *x, y: *y }),
            _ => {
                return Err(MaskError::InvalidGeometry {
                    feature: code.to_string(),
                    reason: format!("position with {} values", position.len()),
                })
            }
        }
    }

    if let (Some(first), Some(last)) = (coords.first().copied(), coords.last().copied()) {
        if first != last {
            coords.push(first);
        }
    }
    if coords.len() < MIN_RING_POSITIONS {
        return Ok(None);
    }
    Ok(Some(LineString::new(coords)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::fixtures::boundaries;

    #[test]
    fn test_square_containment_excludes_edges() {
        let map = parse_boundaries(boundaries::SQUARE_AND_HOLE).unwrap();
        let square = &map["SQR"];
        assert!(square.contains(5.0, 5.0));
        assert!(square.contains(0.01, 9.99));
        assert!(!square.contains(0.0, 5.0));
        assert!(!square.contains(10.0, 10.0));
        assert!(!square.contains(-1.0, 5.0));
    }

    #[test]
    fn test_hole_is_outside() {
        let map = parse_boundaries(boundaries::SQUARE_AND_HOLE).unwrap();
        let holed = &map["HOL"];
        assert_eq!(holed.name(), "Holeland");
        assert!(holed.contains(21.0, 1.0));
        assert!(!holed.contains(25.0, 5.0));
        assert!(holed.contains(28.0, 5.0));
    }

    #[test]
    fn test_multipolygon_and_unclosed_ring() {
        let map = parse_boundaries(boundaries::ISLANDS).unwrap();
        let islands = &map["ISL"];
        assert_eq!(islands.shape().0.len(), 2);
        assert!(islands.contains(-7.0, -7.0));
        assert!(islands.contains(7.0, 7.0));
        assert!(!islands.contains(0.0, 0.0));
        assert_eq!(islands.bbox(), Some(BoundingBox::new(-10.0, -10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_edge_shared_by_two_parts_is_outside() {
        let json = r#"{"features": [{
            "properties": {"name": "Twinland", "adm0_a3": "TWN"},
            "geometry": {"type": "MultiPolygon", "coordinates": [
                [[[0, 0], [2, 0], [2, 2], [0, 2], [0, 0]]],
                [[[2, 0], [4, 0], [4, 2], [2, 2], [2, 0]]]
            ]}
        }]}"#;
        let map = parse_boundaries(json).unwrap();
        let twins = &map["TWN"];
        assert!(twins.contains(1.0, 1.0));
        assert!(twins.contains(3.0, 1.0));
        assert!(!twins.contains(2.0, 1.0));
    }

    #[test]
    fn test_unsupported_geometry_names_feature() {
        let json = r#"{"features": [{
            "properties": {"name": "Pointland", "adm0_a3": "PNT"},
            "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}
        }]}"#;
        let err = parse_boundaries(json).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("PNT"));
        assert!(message.contains("Point"));
    }

    #[test]
    fn test_degenerate_rings_dropped() {
        let json = r#"{"features": [{
            "properties": {"name": "Sliver", "adm0_a3": "SLV"},
            "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 1], [0, 0]]]}
        }]}"#;
        let map = parse_boundaries(json).unwrap();
        let sliver = &map["SLV"];
        assert!(sliver.bbox().is_none());
        assert!(!sliver.contains(0.5, 0.5));
    }

    #[test]
    fn test_duplicate_code_keeps_later_feature() {
        let json = r#"{"features": [
            {"properties": {"name": "First", "adm0_a3": "DUP"},
             "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1]]]}},
            {"properties": {"name": "Second", "adm0_a3": "DUP"},
             "geometry": {"type": "Polygon", "coordinates": [[[5, 5], [6, 5], [6, 6], [5, 6]]]}}
        ]}"#;
        let map = parse_boundaries(json).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["DUP"].name(), "Second");
        assert!(map["DUP"].contains(5.5, 5.5));
        assert!(!map["DUP"].contains(0.5, 0.5));
    }
}
