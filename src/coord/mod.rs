mod distance;

pub use distance::{distance_between_digipins, haversine_distance};

use geo_types::Point;
use serde::{Deserialize, Serialize};

/// A WGS84 position in decimal degrees.
///
/// No range checks happen here; bounds are enforced when a coordinate is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Converts to a `geo_types::Point` with x = longitude and y = latitude.
    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(lat: {}, lon: {})", self.latitude, self.longitude)
    }
}

/// Trait for types that can provide a latitude and longitude.
///
/// Implemented for [`Coordinate`], `(f64, f64)` tuples read as
/// `(latitude, longitude)`, and `geo_types::Point<f64>` read as
/// x = longitude, y = latitude.
pub trait LatLon {
    /// Returns the latitude in decimal degrees.
    fn lat(&self) -> f64;
    /// Returns the longitude in decimal degrees.
    fn lon(&self) -> f64;
}

impl LatLon for Coordinate {
    fn lat(&self) -> f64 {
        self.latitude
    }
    fn lon(&self) -> f64 {
        self.longitude
    }
}

impl LatLon for (f64, f64) {
    fn lat(&self) -> f64 {
        self.0
    }
    fn lon(&self) -> f64 {
        self.1
    }
}

impl LatLon for Point<f64> {
    fn lat(&self) -> f64 {
        self.y()
    }
    fn lon(&self) -> f64 {
        self.x()
    }
}

impl From<Point<f64>> for Coordinate {
    fn from(point: Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}
