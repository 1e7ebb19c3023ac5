use crate::coord::{Coordinate, LatLon, haversine_distance};
use crate::error::DigipinError;
use crate::index::{decode_bounds, format_digipin, generate_digipin};
use crate::io::arrow::DigipinCellsToArrow;
use crate::io::parquet::DigipinCellsToGeoParquet;
use arrow_array::RecordBatch;
use geo::{Centroid, Intersects};
use geo_types::{Geometry, Point, Polygon, Rect, coord};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single level-10 cell of the DIGIPIN grid.
///
/// # Example
///
/// ```
/// use digipin_rs::DigipinCell;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// let cell = DigipinCell::from_coordinate(&(28.622788, 77.213033))?;
/// assert_eq!(cell.code, "39J-49L-L8T4");
/// assert!(cell.contains(&(28.622788, 77.213033)));
///
/// let polygon = cell.to_polygon();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigipinCell {
    /// Formatted code, `XXX-XXX-XXXX`
    pub code: String,
    /// Cell centre, x = longitude, y = latitude
    pub center: Point<f64>,
    /// Cell extent, x = longitude, y = latitude
    pub bounds: Rect<f64>,
}

impl DigipinCell {
    /// Create the cell containing a coordinate.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::{Coordinate, DigipinCell};
    /// use geo_types::Point;
    ///
    /// # fn main() -> Result<(), digipin_rs::DigipinError> {
    /// // From a (lat, lon) tuple
    /// let a = DigipinCell::from_coordinate(&(12.9716, 77.5946))?;
    /// // From a Coordinate
    /// let b = DigipinCell::from_coordinate(&Coordinate::new(12.9716, 77.5946))?;
    /// // From a lon/lat Point
    /// let c = DigipinCell::from_coordinate(&Point::new(77.5946, 12.9716))?;
    /// assert_eq!(a, b);
    /// assert_eq!(b, c);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_coordinate(coord: &impl LatLon) -> Result<Self, DigipinError> {
        let code = generate_digipin(coord.lat(), coord.lon())?;
        Self::from_code(&code)
    }

    /// Create a cell from a code, with or without separators.
    ///
    /// The stored code is always re-formatted to `XXX-XXX-XXXX`.
    pub fn from_code(code: &str) -> Result<Self, DigipinError> {
        let bbox = decode_bounds(code)?;
        let (latitude, longitude) = bbox.center();

        Ok(Self {
            code: format_digipin(code)?,
            center: Point::new(longitude, latitude),
            bounds: bbox.to_rect(),
        })
    }

    /// Create cells from an arbitrary `geo_types::Geometry` in WGS84 lon/lat.
    ///
    /// Points produce their own cell, polygons the cell of their centroid.
    /// Multi-geometries and collections produce one cell per member.
    pub fn from_geometry(geom: Geometry<f64>) -> Result<Vec<Self>, DigipinError> {
        match geom {
            Geometry::Point(pt) => Ok(vec![Self::from_coordinate(&pt)?]),
            Geometry::MultiPoint(mp) => mp.0.iter().map(Self::from_coordinate).collect(),
            Geometry::Polygon(poly) => match poly.centroid() {
                Some(centroid) => Ok(vec![Self::from_coordinate(&centroid)?]),
                None => Ok(vec![]),
            },
            Geometry::MultiPolygon(mp) => {
                let mut cells = Vec::with_capacity(mp.0.len());
                for poly in mp.0 {
                    if let Some(centroid) = poly.centroid() {
                        cells.push(Self::from_coordinate(&centroid)?);
                    }
                }
                Ok(cells)
            }
            Geometry::GeometryCollection(gc) => {
                let mut all_cells = Vec::new();
                for g in gc.0 {
                    all_cells.extend(Self::from_geometry(g)?);
                }
                Ok(all_cells)
            }
            _ => Err(DigipinError::GeometryParseError(
                "Unsupported geometry type".to_string(),
            )),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.center.y()
    }

    pub fn longitude(&self) -> f64 {
        self.center.x()
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude(), self.longitude())
    }

    /// East-west extent in degrees.
    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    /// North-south extent in degrees.
    pub fn height(&self) -> f64 {
        self.bounds.height()
    }

    /// Returns `true` if the coordinate lies in the cell, edges included.
    pub fn contains(&self, coord: &impl LatLon) -> bool {
        self.bounds.intersects(&coord! { x: coord.lon(), y: coord.lat() })
    }

    /// Great-circle distance in kilometres between the two cell centres.
    pub fn distance_to(&self, other: &DigipinCell) -> f64 {
        haversine_distance(&self.center, &other.center)
    }

    /// Converts this cell to a closed rectangular polygon.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.bounds.to_polygon()
    }

    /// Converts this cell to an Arrow RecordBatch with all attributes.
    pub fn to_record_batch(&self) -> Result<RecordBatch, DigipinError> {
        std::slice::from_ref(self).to_record_batch()
    }

    /// Writes this cell to a GeoParquet file.
    pub fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), DigipinError> {
        std::slice::from_ref(self).to_geoparquet(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::CODE_LENGTH;

    #[test]
    fn test_from_coordinate_tuple() -> Result<(), DigipinError> {
        let cell = DigipinCell::from_coordinate(&(12.9716, 77.5946))?;

        assert_eq!(cell.code, "4P3-JK8-52C9");
        assert!((cell.latitude() - 12.9716).abs() < 0.005);
        assert!((cell.longitude() - 77.5946).abs() < 0.005);
        Ok(())
    }

    #[test]
    fn test_from_coordinate_point_is_lon_lat() -> Result<(), DigipinError> {
        let from_tuple = DigipinCell::from_coordinate(&(12.9716, 77.5946))?;
        let from_point = DigipinCell::from_coordinate(&Point::new(77.5946, 12.9716))?;
        assert_eq!(from_tuple, from_point);
        Ok(())
    }

    #[test]
    fn test_from_code_without_separators() -> Result<(), DigipinError> {
        let cell = DigipinCell::from_code("39J49LL8T4")?;
        assert_eq!(cell.code, "39J-49L-L8T4");
        Ok(())
    }

    #[test]
    fn test_out_of_bounds() {
        let result = DigipinCell::from_coordinate(&(40.0, 78.0));
        assert!(matches!(result, Err(DigipinError::OutOfBounds)));
    }

    #[test]
    fn test_cell_size() -> Result<(), DigipinError> {
        let cell = DigipinCell::from_code("39J-49L-L8T4")?;
        let expected = 36.0 / 4f64.powi(CODE_LENGTH as i32);

        assert!((cell.width() - expected).abs() < 1e-12);
        assert!((cell.height() - expected).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_contains_own_point_and_edges() -> Result<(), DigipinError> {
        let cell = DigipinCell::from_coordinate(&(28.622788, 77.213033))?;

        assert!(cell.contains(&(28.622788, 77.213033)));
        assert!(cell.contains(&cell.coordinate()));
        let min = cell.bounds.min();
        assert!(cell.contains(&(min.y, min.x)));
        assert!(!cell.contains(&(12.9716, 77.5946)));
        Ok(())
    }

    #[test]
    fn test_to_polygon() -> Result<(), DigipinError> {
        let cell = DigipinCell::from_code("4P3-JK8-52C9")?;
        let polygon = cell.to_polygon();

        assert_eq!(polygon.exterior().coords().count(), 5);
        assert_eq!(polygon.exterior().0[0], polygon.exterior().0[4]);
        Ok(())
    }

    #[test]
    fn test_distance_to() -> Result<(), DigipinError> {
        let bengaluru = DigipinCell::from_code("4P3-JK8-52C9")?;
        let dak_bhawan = DigipinCell::from_code("39J-49L-L8T4")?;

        assert!((bengaluru.distance_to(&dak_bhawan) - 1740.78).abs() < 0.1);
        assert_eq!(bengaluru.distance_to(&bengaluru), 0.0);
        Ok(())
    }

    #[test]
    fn test_from_geometry_point() -> Result<(), DigipinError> {
        let cells = DigipinCell::from_geometry(Geometry::Point(Point::new(77.213033, 28.622788)))?;

        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].code, "39J-49L-L8T4");
        Ok(())
    }

    #[test]
    fn test_from_geometry_polygon_uses_centroid() -> Result<(), DigipinError> {
        use geo_types::polygon;

        let poly = polygon![
            (x: 77.0, y: 28.0),
            (x: 78.0, y: 28.0),
            (x: 78.0, y: 29.0),
            (x: 77.0, y: 29.0),
            (x: 77.0, y: 28.0),
        ];
        let cells = DigipinCell::from_geometry(Geometry::Polygon(poly))?;

        assert_eq!(cells.len(), 1);
        assert!(cells[0].contains(&(28.5, 77.5)));
        Ok(())
    }

    #[test]
    fn test_from_geometry_multipoint_and_collection() -> Result<(), DigipinError> {
        use geo_types::{GeometryCollection, MultiPoint};

        let mp = MultiPoint::new(vec![Point::new(77.5946, 12.9716), Point::new(77.209, 28.6139)]);
        assert_eq!(DigipinCell::from_geometry(Geometry::MultiPoint(mp))?.len(), 2);

        let gc = GeometryCollection::new_from(vec![
            Geometry::Point(Point::new(77.5946, 12.9716)),
            Geometry::Point(Point::new(77.209, 28.6139)),
        ]);
        assert_eq!(
            DigipinCell::from_geometry(Geometry::GeometryCollection(gc))?.len(),
            2
        );
        Ok(())
    }

    #[test]
    fn test_serializes_to_json() -> Result<(), DigipinError> {
        let cell = DigipinCell::from_code("39J-49L-L8T4")?;
        let value =
            serde_json::to_value(&cell).map_err(|e| DigipinError::IoError(e.to_string()))?;

        assert_eq!(value["code"], "39J-49L-L8T4");
        let x = value["center"]["x"].as_f64().unwrap_or_default();
        let y = value["center"]["y"].as_f64().unwrap_or_default();
        assert!((x - cell.longitude()).abs() < 1e-9);
        assert!((y - cell.latitude()).abs() < 1e-9);

        let back: DigipinCell =
            serde_json::from_value(value).map_err(|e| DigipinError::IoError(e.to_string()))?;
        assert_eq!(back.code, cell.code);
        assert!((back.width() - cell.width()).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_from_geometry_unsupported() {
        use geo_types::LineString;

        let line = LineString::from(vec![(77.0, 28.0), (78.0, 29.0)]);
        let result = DigipinCell::from_geometry(Geometry::LineString(line));
        assert!(matches!(result, Err(DigipinError::GeometryParseError(_))));
    }
}
