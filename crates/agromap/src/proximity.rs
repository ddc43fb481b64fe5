//! Radius search over caller-owned sites (nurseries, depots, ...).
//!
//! The core keeps no reference data: callers pass any slice of `Located`
//! items and get back borrowed matches with their haversine distance.

use crate::coord::{round_to, Coordinate};
use crate::distance::haversine;
use crate::error::GeoError;

/// Anything with a position on the map.
pub trait Located {
    fn location(&self) -> Coordinate;
}

impl Located for Coordinate {
    fn location(&self) -> Coordinate {
        *self
    }
}

/// A site within the search radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nearby<'a, T> {
    pub site: &'a T,
    /// Kilometers, 2 decimals.
    pub distance_km: f64,
}

/// Sites within `radius_km` of `origin`, nearest first by the 2-decimal
/// distance. Ties keep input order.
pub fn nearby<'a, T: Located>(
    origin: &Coordinate,
    sites: &'a [T],
    radius_km: f64,
) -> Result<Vec<Nearby<'a, T>>, GeoError> {
    if !radius_km.is_finite() || radius_km < 0.0 {
        return Err(GeoError::invalid(format!(
            "radius must be a non-negative number of km, got {radius_km}"
        )));
    }
    origin.validate()?;
    let mut hits: Vec<Nearby<'a, T>> = sites
        .iter()
        .filter_map(|site| {
            let d = haversine(origin, &site.location());
            (d <= radius_km).then(|| Nearby {
                site,
                distance_km: round_to(d, 2),
            })
        })
        .collect();
    // Ordered by the reported (rounded) distance; equal values keep input order.
    hits.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    Ok(hits)
}
