//! Planar polygon and tolerances.
//!
//! - `GeomCfg`: the one tolerance repair needs (vertex snap size).
//! - `Polygon`: repaired, valid region as a set of open rings; outer shells
//!   counter-clockwise, holes clockwise, interior on the left of every edge.

use nalgebra::Vector2;

use super::containment::{locate_in_rings, Containment};
use crate::coord::BoundingBox;

/// Planar tolerances, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    /// Vertices closer than this (per axis, on a snapping grid) merge during
    /// repair. 1e-9° is about 0.1 mm.
    pub snap: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self { snap: 1e-9 }
    }
}

/// Valid planar region bounded by one or more rings.
///
/// Invariants:
/// - Every ring has ≥ 3 vertices and non-zero area.
/// - The ring winding numbers sum to 1 inside the region and 0 outside.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub rings: Vec<Vec<Vector2<f64>>>,
}

impl Polygon {
    /// Classify `p` against the region.
    #[inline]
    pub fn locate(&self, p: Vector2<f64>) -> Containment {
        locate_in_rings(p, &self.rings)
    }

    /// Strict interior membership; boundary points are not contained.
    #[inline]
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        self.locate(p) == Containment::Inside
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.rings.iter().flatten().copied())
    }

    /// Shoelace area in square degrees (shells minus holes).
    pub fn area(&self) -> f64 {
        self.rings.iter().map(|r| signed_area(r)).sum()
    }
}

/// Shoelace signed area; positive for counter-clockwise.
pub fn signed_area(ring: &[Vector2<f64>]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let mut s = 0.0;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        s += a.x * b.y - a.y * b.x;
    }
    0.5 * s
}
