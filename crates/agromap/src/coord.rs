//! Geographic value types: `Coordinate`, `Ring`, `BoundingBox`, `GridPoint`.
//!
//! Conventions
//! - Coordinates are `(lat, lng)` in degrees, matching the wire format
//!   `[[lat, lng], ...]`. Planar algorithms use `x = lng`, `y = lat`; the
//!   conversion happens in `Ring::planar`.
//! - A `Ring` may or may not repeat its first vertex at the end. Callers that
//!   need the open form use `Ring::open_vertices`.

use nalgebra::Vector2;

use crate::consts::GRID_DECIMALS;
use crate::error::GeoError;

/// A point on the Earth's surface in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Validated constructor: finite, `lat ∈ [-90, 90]`, `lng ∈ [-180, 180]`.
    pub fn new(lat: f64, lng: f64) -> Result<Self, GeoError> {
        let c = Self { lat, lng };
        c.validate()?;
        Ok(c)
    }

    pub fn validate(&self) -> Result<(), GeoError> {
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(GeoError::invalid(format!(
                "coordinate ({}, {}) is not finite",
                self.lat, self.lng
            )));
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(GeoError::invalid(format!("latitude {} out of range", self.lat)));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(GeoError::invalid(format!("longitude {} out of range", self.lng)));
        }
        Ok(())
    }

    /// Planar view `(x, y) = (lng, lat)`.
    #[inline]
    pub fn planar(&self) -> Vector2<f64> {
        Vector2::new(self.lng, self.lat)
    }
}

impl From<[f64; 2]> for Coordinate {
    /// Unvalidated `[lat, lng]` conversion; `Ring::new` validates.
    fn from(v: [f64; 2]) -> Self {
        Self { lat: v[0], lng: v[1] }
    }
}

/// Polygon boundary: at least three distinct, valid coordinates.
///
/// Invariants:
/// - `len() >= 3` and at least three distinct vertices.
/// - Every vertex passes `Coordinate::validate`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Ring {
    vertices: Vec<Coordinate>,
}

impl Ring {
    pub fn new(vertices: Vec<Coordinate>) -> Result<Self, GeoError> {
        if vertices.len() < 3 {
            return Err(GeoError::invalid(format!(
                "ring needs at least 3 points, got {}",
                vertices.len()
            )));
        }
        for v in &vertices {
            v.validate()?;
        }
        let distinct = distinct_count(&vertices);
        if distinct < 3 {
            return Err(GeoError::invalid(format!(
                "ring needs at least 3 distinct points, got {distinct}"
            )));
        }
        Ok(Self { vertices })
    }

    /// Build from `[lat, lng]` pairs.
    pub fn from_lat_lng(pairs: &[[f64; 2]]) -> Result<Self, GeoError> {
        Self::new(pairs.iter().copied().map(Coordinate::from).collect())
    }

    #[inline]
    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices without an explicit closing duplicate.
    pub fn open_vertices(&self) -> &[Coordinate] {
        let n = self.vertices.len();
        if n > 3 && self.vertices[0] == self.vertices[n - 1] {
            &self.vertices[..n - 1]
        } else {
            &self.vertices
        }
    }

    /// Same boundary, opposite winding.
    pub fn reversed(&self) -> Ring {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Ring { vertices }
    }

    /// Open ring in the planar `(lng, lat)` frame.
    pub fn planar(&self) -> Vec<Vector2<f64>> {
        self.open_vertices().iter().map(Coordinate::planar).collect()
    }

    pub fn bbox(&self) -> BoundingBox {
        // Non-empty by construction.
        BoundingBox::from_points(self.vertices.iter().map(Coordinate::planar))
            .unwrap_or(BoundingBox::EMPTY_AT_ORIGIN)
    }
}

fn distinct_count(vertices: &[Coordinate]) -> usize {
    // `+ 0.0` folds -0.0 into 0.0 so both compare equal by bits.
    let mut keys: Vec<(u64, u64)> = vertices
        .iter()
        .map(|c| ((c.lat + 0.0).to_bits(), (c.lng + 0.0).to_bits()))
        .collect();
    keys.sort_unstable();
    keys.dedup();
    keys.len()
}

/// Axis-aligned bounds in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    const EMPTY_AT_ORIGIN: BoundingBox = BoundingBox {
        min_lat: 0.0,
        min_lng: 0.0,
        max_lat: 0.0,
        max_lng: 0.0,
    };

    /// Bounds of planar `(lng, lat)` points; `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vector2<f64>>,
    {
        let mut it = points.into_iter();
        let first = it.next()?;
        let mut b = BoundingBox {
            min_lat: first.y,
            min_lng: first.x,
            max_lat: first.y,
            max_lng: first.x,
        };
        for p in it {
            b.min_lat = b.min_lat.min(p.y);
            b.max_lat = b.max_lat.max(p.y);
            b.min_lng = b.min_lng.min(p.x);
            b.max_lng = b.max_lng.max(p.x);
        }
        Some(b)
    }

    #[inline]
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    #[inline]
    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    /// Collapsed to a point or a line.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.lat_span() <= 0.0 || self.lng_span() <= 0.0
    }
}

/// A planting position emitted by the layout generator, rounded to
/// `GRID_DECIMALS` places.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GridPoint {
    pub fn rounded(lat: f64, lng: f64) -> Self {
        Self {
            lat: round_to(lat, GRID_DECIMALS),
            lng: round_to(lng, GRID_DECIMALS),
        }
    }

    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// Round half away from zero to `decimals` places.
#[inline]
pub fn round_to(x: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (x * scale).round() / scale
}
