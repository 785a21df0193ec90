//! Geographic utilities: great-circle distance and meter/degree conversion.
//!
//! The mining core itself never measures distance (node identity is exact),
//! but the similarity scorer, the synthetic generator and the CLI all need
//! real-world metrics.

use crate::PathNode;

/// Mean earth radius in meters (spherical model).
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters per degree of latitude (approximately constant).
const METERS_PER_DEG_LAT: f64 = 111_320.0;

/// Great-circle distance between two coordinates in meters (haversine).
pub fn haversine_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Total length of a path polyline in meters.
pub fn polyline_length(polyline: &[PathNode]) -> f64 {
    polyline
        .windows(2)
        .map(|w| haversine_distance(w[0].latitude, w[0].longitude, w[1].latitude, w[1].longitude))
        .sum()
}

/// Convert a distance in meters to degrees of longitude at a latitude.
///
/// Falls back to the latitude scale near the poles where a degree of
/// longitude degenerates.
pub fn meters_to_degrees(meters: f64, latitude: f64) -> f64 {
    let meters_per_deg = METERS_PER_DEG_LAT * latitude.to_radians().cos();
    if meters_per_deg.abs() < 1e-10 {
        return meters / METERS_PER_DEG_LAT;
    }
    meters / meters_per_deg
}

/// Convert a distance in meters to degrees of latitude.
pub fn meters_to_degrees_lat(meters: f64) -> f64 {
    meters / METERS_PER_DEG_LAT
}
