//! Point-in-polygon classification and segment predicates.
//!
//! Winding-number test (Sunday's crossing rule) on the `(lng, lat)` plane.
//! Non-convex and multi-ring regions are handled by summing winding numbers
//! over all rings. On-segment detection uses the exact orientation sign, so a
//! grid candidate that lands exactly on an edge is `Boundary`.

use nalgebra::Vector2;

use crate::coord::{Coordinate, Ring};

/// Where a point lies relative to a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Containment {
    Inside,
    Boundary,
    Outside,
}

/// Orientation of `p` relative to the directed line `a → b`:
/// positive left, negative right, zero collinear.
#[inline]
pub fn orient(a: Vector2<f64>, b: Vector2<f64>, p: Vector2<f64>) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// `p` collinear with `a → b` lies within the segment's box.
#[inline]
fn within_box(a: Vector2<f64>, b: Vector2<f64>, p: Vector2<f64>) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

#[inline]
pub fn on_segment(a: Vector2<f64>, b: Vector2<f64>, p: Vector2<f64>) -> bool {
    orient(a, b, p) == 0.0 && within_box(a, b, p)
}

/// Winding number of a closed open-form ring around `p`, or `None` if `p` is
/// on the ring.
pub fn winding_number(p: Vector2<f64>, ring: &[Vector2<f64>]) -> Option<i32> {
    let n = ring.len();
    let mut w = 0;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        let side = orient(a, b, p);
        if side == 0.0 && within_box(a, b, p) {
            return None;
        }
        if a.y <= p.y {
            if b.y > p.y && side > 0.0 {
                w += 1;
            }
        } else if b.y <= p.y && side < 0.0 {
            w -= 1;
        }
    }
    Some(w)
}

/// Classify `p` against the region bounded by `rings` (nonzero rule).
pub fn locate_in_rings(p: Vector2<f64>, rings: &[Vec<Vector2<f64>>]) -> Containment {
    let mut total = 0;
    for ring in rings {
        match winding_number(p, ring) {
            Some(w) => total += w,
            None => return Containment::Boundary,
        }
    }
    if total != 0 {
        Containment::Inside
    } else {
        Containment::Outside
    }
}

/// Classify a coordinate against a ring as given (no repair).
pub fn point_in_ring(point: &Coordinate, ring: &Ring) -> Containment {
    let planar = ring.planar();
    match winding_number(point.planar(), &planar) {
        None => Containment::Boundary,
        Some(0) => Containment::Outside,
        Some(_) => Containment::Inside,
    }
}

/// Points shared by segments `a–b` and `c–d`: none, one crossing/touch point,
/// or the endpoints of a collinear overlap.
pub fn segment_intersections(
    a: Vector2<f64>,
    b: Vector2<f64>,
    c: Vector2<f64>,
    d: Vector2<f64>,
) -> Vec<Vector2<f64>> {
    let r = b - a;
    let s = d - c;
    let denom = r.x * s.y - r.y * s.x;
    let qp = c - a;
    if denom != 0.0 {
        let t = (qp.x * s.y - qp.y * s.x) / denom;
        let u = (qp.x * r.y - qp.y * r.x) / denom;
        if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
            return Vec::new();
        }
        // Prefer exact endpoints over recomputed ones.
        let p = if t == 0.0 {
            a
        } else if t == 1.0 {
            b
        } else if u == 0.0 {
            c
        } else if u == 1.0 {
            d
        } else {
            a + r * t
        };
        return vec![p];
    }
    if orient(a, b, c) != 0.0 || orient(c, d, a) != 0.0 {
        // Parallel, or one segment degenerate and off the other's line.
        return Vec::new();
    }
    let mut out: Vec<Vector2<f64>> = Vec::with_capacity(2);
    for (p, (s0, s1)) in [(a, (c, d)), (b, (c, d)), (c, (a, b)), (d, (a, b))] {
        if within_box(s0, s1, p) && !out.contains(&p) {
            out.push(p);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn crossing_segments_meet_once() {
        let pts = segment_intersections(
            vector![0.0, 0.0],
            vector![2.0, 2.0],
            vector![0.0, 2.0],
            vector![2.0, 0.0],
        );
        assert_eq!(pts, vec![vector![1.0, 1.0]]);
    }

    #[test]
    fn touching_at_endpoint_returns_exact_endpoint() {
        let pts = segment_intersections(
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 1.0],
        );
        assert_eq!(pts, vec![vector![1.0, 0.0]]);
    }

    #[test]
    fn collinear_overlap_returns_overlap_ends() {
        let mut pts = segment_intersections(
            vector![0.0, 0.0],
            vector![3.0, 0.0],
            vector![2.0, 0.0],
            vector![5.0, 0.0],
        );
        pts.sort_by(|p, q| p.x.total_cmp(&q.x));
        assert_eq!(pts, vec![vector![2.0, 0.0], vector![3.0, 0.0]]);
        // Parallel but offset.
        assert!(segment_intersections(
            vector![0.0, 0.0],
            vector![3.0, 0.0],
            vector![0.0, 1.0],
            vector![3.0, 1.0]
        )
        .is_empty());
    }

    #[test]
    fn winding_handles_concave_notch() {
        // U shape opening north.
        let u = vec![
            vector![0.0, 0.0],
            vector![3.0, 0.0],
            vector![3.0, 3.0],
            vector![2.0, 3.0],
            vector![2.0, 1.0],
            vector![1.0, 1.0],
            vector![1.0, 3.0],
            vector![0.0, 3.0],
        ];
        assert_eq!(winding_number(vector![0.5, 2.0], &u), Some(1));
        assert_eq!(winding_number(vector![1.5, 2.0], &u), Some(0));
        assert_eq!(winding_number(vector![1.5, 0.5], &u), Some(1));
        assert_eq!(winding_number(vector![1.5, 1.0], &u), None);
        let mut cw = u.clone();
        cw.reverse();
        assert_eq!(winding_number(vector![0.5, 2.0], &cw), Some(-1));
    }

    #[test]
    fn boundary_and_vertex_hits() {
        let sq = vec![
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 1.0],
            vector![0.0, 1.0],
        ];
        let rings = vec![sq];
        assert_eq!(locate_in_rings(vector![0.0, 0.5], &rings), Containment::Boundary);
        assert_eq!(locate_in_rings(vector![1.0, 1.0], &rings), Containment::Boundary);
        assert_eq!(locate_in_rings(vector![0.5, 0.5], &rings), Containment::Inside);
        assert_eq!(locate_in_rings(vector![1.5, 0.5], &rings), Containment::Outside);
        // Ray through a vertex must not double count.
        assert_eq!(locate_in_rings(vector![-1.0, 1.0], &rings), Containment::Outside);
    }

    #[test]
    fn point_in_ring_uses_lat_lng_order() {
        let ring = Ring::from_lat_lng(&[[0.0, 0.0], [0.0, 2.0], [1.0, 2.0], [1.0, 0.0]]).unwrap();
        let inside = Coordinate { lat: 0.5, lng: 1.5 };
        let outside = Coordinate { lat: 1.5, lng: 0.5 };
        assert_eq!(point_in_ring(&inside, &ring), Containment::Inside);
        assert_eq!(point_in_ring(&outside, &ring), Containment::Outside);
    }
}
