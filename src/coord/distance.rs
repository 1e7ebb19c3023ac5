use crate::coord::LatLon;
use crate::error::DigipinError;
use crate::index::{EARTH_RADIUS_KM, decode_digipin};

/// Great-circle distance in kilometres on a sphere of radius [`EARTH_RADIUS_KM`].
///
/// ```
/// use digipin_rs::haversine_distance;
///
/// let bengaluru = (12.9716, 77.5946);
/// let new_delhi = (28.6139, 77.2090);
/// let km = haversine_distance(&bengaluru, &new_delhi);
/// assert!((km - 1740.0).abs() < 2.0);
/// ```
pub fn haversine_distance(from: &impl LatLon, to: &impl LatLon) -> f64 {
    let lat1 = from.lat().to_radians();
    let lat2 = to.lat().to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (to.lon() - from.lon()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Decodes both codes and returns the distance between the cell centres in kilometres.
///
/// # Errors
///
/// - [`DigipinError::InvalidCode`] - Either code fails to decode
pub fn distance_between_digipins(from: &str, to: &str) -> Result<f64, DigipinError> {
    let a = decode_digipin(from)?;
    let b = decode_digipin(to)?;
    Ok(haversine_distance(&a, &b))
}
