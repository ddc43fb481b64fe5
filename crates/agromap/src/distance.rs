//! Great-circle distance on a sphere of radius `EARTH_MEAN_RADIUS_KM`.
//!
//! Spherical model (up to ~0.5 % off the ellipsoid); used for proximity
//! filtering.

use crate::consts::EARTH_MEAN_RADIUS_KM;
use crate::coord::Coordinate;

/// Haversine distance in kilometers. Total over finite inputs.
pub fn haversine(a: &Coordinate, b: &Coordinate) -> f64 {
    haversine_with_radius(a, b, EARTH_MEAN_RADIUS_KM)
}

/// Haversine distance in the unit of `radius`.
pub fn haversine_with_radius(a: &Coordinate, b: &Coordinate, radius: f64) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();
    let s_lat = (dlat / 2.0).sin();
    let s_lng = (dlng / 2.0).sin();
    let h = s_lat * s_lat + a.lat.to_radians().cos() * b.lat.to_radians().cos() * s_lng * s_lng;
    // Rounding can push h a hair past 1 for antipodes.
    let h = h.clamp(0.0, 1.0);
    2.0 * radius * h.sqrt().atan2((1.0 - h).sqrt())
}
