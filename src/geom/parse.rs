use crate::error::DigipinError;
use geo_types::{Geometry, Polygon};
use geojson::GeoJson;
use std::str::FromStr;
use wkt::{ToWkt, Wkt};

/// Parses a geometry string, auto-detecting WKT or GeoJSON format.
///
/// GeoJSON is detected by a leading `{`, everything else is tried as WKT.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, DigipinError> {
    let trimmed = s.trim();
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

/// Parses a GeoJSON string into a `geo_types::Geometry`.
pub fn parse_geojson(s: &str) -> Result<Geometry<f64>, DigipinError> {
    let geojson: GeoJson = s
        .parse()
        .map_err(|e: geojson::Error| DigipinError::GeometryParseError(e.to_string()))?;

    match geojson {
        GeoJson::Geometry(geom) => {
            Geometry::try_from(geom).map_err(|e| DigipinError::GeometryParseError(e.to_string()))
        }
        GeoJson::Feature(feat) => feat
            .geometry
            .ok_or_else(|| DigipinError::GeometryParseError("Feature has no geometry".to_string()))
            .and_then(|g| {
                Geometry::try_from(g).map_err(|e| DigipinError::GeometryParseError(e.to_string()))
            }),
        GeoJson::FeatureCollection(_) => Err(DigipinError::GeometryParseError(
            "FeatureCollection not supported, use individual geometries".to_string(),
        )),
    }
}

/// Parses a WKT string into a `geo_types::Geometry`.
pub fn parse_wkt(s: &str) -> Result<Geometry<f64>, DigipinError> {
    let wkt: Wkt<f64> =
        Wkt::from_str(s).map_err(|e| DigipinError::GeometryParseError(e.to_string()))?;

    wkt.try_into()
        .map_err(|_| DigipinError::GeometryParseError("Failed to convert WKT to geometry".to_string()))
}

/// Renders a polygon as WKT, e.g. `POLYGON((77.2 28.6,...))`.
pub fn polygon_to_wkt(polygon: &Polygon<f64>) -> String {
    polygon.wkt_string()
}

/// Renders a polygon as a GeoJSON geometry object.
pub fn polygon_to_geojson(polygon: &Polygon<f64>) -> String {
    geojson::Geometry::from(polygon).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{Rect, coord};

    #[test]
    fn test_parse_geojson_point() -> Result<(), DigipinError> {
        let json = r#"{"type":"Point","coordinates":[77.213033,28.622788]}"#;
        let geom = parse_geometry(json)?;
        match geom {
            Geometry::Point(pt) => {
                assert!((pt.x() - 77.213033).abs() < 1e-9);
                assert!((pt.y() - 28.622788).abs() < 1e-9);
            }
            _ => panic!("Expected Point"),
        }
        Ok(())
    }

    #[test]
    fn test_parse_geojson_feature() -> Result<(), DigipinError> {
        let json = r#"{"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[77.5946,12.9716]}}"#;
        assert!(matches!(parse_geometry(json)?, Geometry::Point(_)));

        let empty = r#"{"type":"Feature","properties":{},"geometry":null}"#;
        assert!(matches!(
            parse_geometry(empty),
            Err(DigipinError::GeometryParseError(_))
        ));
        Ok(())
    }

    #[test]
    fn test_parse_wkt_point() -> Result<(), DigipinError> {
        let geom = parse_geometry("  POINT(77.5946 12.9716) ")?;
        match geom {
            Geometry::Point(pt) => {
                assert!((pt.x() - 77.5946).abs() < 1e-9);
                assert!((pt.y() - 12.9716).abs() < 1e-9);
            }
            _ => panic!("Expected Point"),
        }
        Ok(())
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_geometry("not a geometry").is_err());
        assert!(parse_geometry("{not json").is_err());
    }

    #[test]
    fn test_polygon_writers() {
        let polygon = Rect::new(coord! { x: 77.0, y: 28.0 }, coord! { x: 78.0, y: 29.0 }).to_polygon();

        let wkt = polygon_to_wkt(&polygon);
        assert!(wkt.starts_with("POLYGON"));
        assert!(parse_wkt(&wkt).is_ok());

        let json = polygon_to_geojson(&polygon);
        assert!(json.contains("\"Polygon\""));
        assert!(matches!(parse_geojson(&json), Ok(Geometry::Polygon(_))));
    }
}
