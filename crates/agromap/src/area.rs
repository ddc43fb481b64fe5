//! Polygon area on the WGS84 ellipsoid.
//!
//! Method
//! - Vertices are mapped to the authalic sphere (same total surface area as the
//!   ellipsoid; latitude replaced by the authalic latitude ξ, longitude kept).
//!   The mapping is equal-area, so areas measured on that sphere are ellipsoid
//!   areas.
//! - Each edge contributes the signed area of the spherical trapezoid between
//!   the edge and the equator,
//!   `E = 2·atan2(tan(Δλ/2)·(tan(ξ₁/2) + tan(ξ₂/2)), 1 + tan(ξ₁/2)·tan(ξ₂/2))`.
//!   Summed over a closed ring this is the line integral of `R_q²·sin ξ dλ`.
//! - Δλ is reduced to `(-π, π]` per edge and the total to `(-2π, 2π]`, so the
//!   result is the smaller of the two regions the ring bounds.
//!
//! Limitations
//! - Edges follow great circles on the authalic sphere, not exact ellipsoid
//!   geodesics. For plantation-sized rings the difference is far below the
//!   6-decimal input precision.
//! - Rings crossing the antimeridian or enclosing a pole are not guaranteed.

use std::f64::consts::PI;

use crate::consts::{WGS84_A, WGS84_F};
use crate::coord::{Coordinate, Ring};
use crate::error::GeoError;

/// Oblate ellipsoid of revolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis (m).
    pub a: f64,
    /// Flattening.
    pub f: f64,
}

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid {
        a: WGS84_A,
        f: WGS84_F,
    };

    /// First eccentricity squared.
    #[inline]
    pub fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// `q(φ)` from Snyder (3-12); `q(π/2)` gives the authalic scale.
    fn q(&self, sin_phi: f64) -> f64 {
        let e2 = self.e2();
        if e2 == 0.0 {
            return 2.0 * sin_phi;
        }
        let e = e2.sqrt();
        (1.0 - e2) * (sin_phi / (1.0 - e2 * sin_phi * sin_phi) + (e * sin_phi).atanh() / e)
    }

    /// Radius of the sphere with the ellipsoid's surface area.
    pub fn authalic_radius(&self) -> f64 {
        self.a * (self.q(1.0) / 2.0).sqrt()
    }

    /// Authalic latitude ξ (radians) for geodetic latitude φ (radians).
    pub fn authalic_latitude(&self, phi: f64) -> f64 {
        let ratio = self.q(phi.sin()) / self.q(1.0);
        ratio.clamp(-1.0, 1.0).asin()
    }

    /// Total surface area (m²).
    pub fn surface_area(&self) -> f64 {
        let r = self.authalic_radius();
        4.0 * PI * r * r
    }
}

/// Absolute area of `ring` on WGS84, in square meters.
pub fn geodesic_area(ring: &Ring) -> f64 {
    signed_geodesic_area(ring).abs()
}

/// Validate `points` as a ring, then measure it.
pub fn compute_area(points: &[Coordinate]) -> Result<f64, GeoError> {
    let ring = Ring::new(points.to_vec())?;
    Ok(geodesic_area(&ring))
}

/// Signed area: positive for counter-clockwise rings (seen from above with
/// east to the right), negative for clockwise.
pub fn signed_geodesic_area(ring: &Ring) -> f64 {
    signed_area_on(&Ellipsoid::WGS84, ring.open_vertices())
}

pub fn signed_area_on(ellipsoid: &Ellipsoid, vertices: &[Coordinate]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let half_tans: Vec<f64> = vertices
        .iter()
        .map(|c| (ellipsoid.authalic_latitude(c.lat.to_radians()) / 2.0).tan())
        .collect();
    let mut excess = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        let dlam = wrap_pi((vertices[j].lng - vertices[i].lng).to_radians());
        excess += trapezoid_excess(half_tans[i], half_tans[j], dlam);
    }
    // Trapezoids are measured toward the equator going east; a CCW ring sums
    // to minus its enclosed excess.
    let mut enclosed = -excess;
    if enclosed > 2.0 * PI {
        enclosed -= 4.0 * PI;
    } else if enclosed <= -2.0 * PI {
        enclosed += 4.0 * PI;
    }
    let r = ellipsoid.authalic_radius();
    enclosed * r * r
}

#[inline]
fn trapezoid_excess(t1: f64, t2: f64, dlam: f64) -> f64 {
    2.0 * ((dlam / 2.0).tan() * (t1 + t2)).atan2(1.0 + t1 * t2)
}

/// Reduce an angle to `(-π, π]`. Values already in range pass through
/// untouched; small edge Δλ must not pick up rounding from a modulo.
#[inline]
fn wrap_pi(x: f64) -> f64 {
    if x > -PI && x <= PI {
        x
    } else if x > PI && x <= 3.0 * PI {
        x - 2.0 * PI
    } else if x <= -PI && x > -3.0 * PI {
        x + 2.0 * PI
    } else {
        let y = x.rem_euclid(2.0 * PI);
        if y > PI {
            y - 2.0 * PI
        } else {
            y
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{draw_plot, PlotCfg, ReplayToken};
    use proptest::prelude::*;

    fn ring(pairs: &[[f64; 2]]) -> Ring {
        Ring::from_lat_lng(pairs).unwrap()
    }

    /// Meridian and parallel radii of curvature at geodetic latitude `lat` (deg).
    fn radii(lat: f64) -> (f64, f64) {
        let e = Ellipsoid::WGS84;
        let s = lat.to_radians().sin();
        let w = (1.0 - e.e2() * s * s).sqrt();
        let m = e.a * (1.0 - e.e2()) / (w * w * w);
        let n = e.a / w;
        (m, n * lat.to_radians().cos())
    }

    #[test]
    fn authalic_radius_matches_published_value() {
        let r = Ellipsoid::WGS84.authalic_radius();
        assert!((r - 6_371_007.181).abs() < 0.01, "r = {r}");
    }

    #[test]
    fn authalic_latitude_fixes_equator_and_poles() {
        let e = Ellipsoid::WGS84;
        assert_eq!(e.authalic_latitude(0.0), 0.0);
        assert!((e.authalic_latitude(PI / 2.0) - PI / 2.0).abs() < 1e-12);
        // ξ < φ strictly between.
        let phi = 45f64.to_radians();
        assert!(e.authalic_latitude(phi) < phi);
    }

    #[test]
    fn hundred_meter_square_near_equator() {
        let sq = ring(&[[0.0, 0.0], [0.0, 0.0009], [0.0009, 0.0009], [0.0009, 0.0]]);
        let a = geodesic_area(&sq);
        assert!((a - 10_000.0).abs() < 500.0, "area = {a}");
        // Tighter check against the local radii of curvature.
        let (m, p) = radii(0.00045);
        let expected = (0.0009f64.to_radians() * m) * (0.0009f64.to_radians() * p);
        assert!((a - expected).abs() / expected < 1e-4, "{a} vs {expected}");
    }

    #[test]
    fn rectangle_at_mid_latitude_matches_side_lengths() {
        let (lat0, d) = (45.0, 0.01);
        let r = ring(&[[lat0, 10.0], [lat0, 10.0 + d], [lat0 + d, 10.0 + d], [lat0 + d, 10.0]]);
        let (m, p) = radii(lat0 + d / 2.0);
        let expected = (d.to_radians() * m) * (d.to_radians() * p);
        let a = geodesic_area(&r);
        assert!((a - expected).abs() / expected < 0.005, "{a} vs {expected}");
    }

    #[test]
    fn sign_follows_winding_and_magnitude_does_not() {
        let ccw = ring(&[[0.0, 0.0], [0.0, 0.01], [0.01, 0.01], [0.01, 0.0]]);
        let cw = ccw.reversed();
        assert!(signed_geodesic_area(&ccw) > 0.0);
        assert!(signed_geodesic_area(&cw) < 0.0);
        let (a, b) = (geodesic_area(&ccw), geodesic_area(&cw));
        assert!((a - b).abs() <= 1e-9 * a);
    }

    #[test]
    fn collinear_rings_have_zero_area() {
        let meridian = ring(&[[0.0, 5.0], [1.0, 5.0], [2.0, 5.0]]);
        assert!(geodesic_area(&meridian).abs() < 1e-6);
        let equator = ring(&[[0.0, 0.0], [0.0, 1.0], [0.0, 3.0]]);
        assert!(geodesic_area(&equator).abs() < 1e-6);
    }

    #[test]
    fn octant_is_an_eighth_of_the_ellipsoid() {
        let r = ring(&[[0.0, 0.0], [0.0, 90.0], [90.0, 0.0]]);
        let expected = Ellipsoid::WGS84.surface_area() / 8.0;
        let a = geodesic_area(&r);
        assert!((a - expected).abs() / expected < 1e-9, "{a} vs {expected}");
    }

    #[test]
    fn compute_area_rejects_degenerate_input() {
        let pts = [
            Coordinate { lat: 0.0, lng: 0.0 },
            Coordinate { lat: 1.0, lng: 1.0 },
            Coordinate { lat: 0.0, lng: 0.0 },
        ];
        assert!(matches!(compute_area(&pts), Err(GeoError::InvalidInput(_))));
        assert!(matches!(compute_area(&pts[..2]), Err(GeoError::InvalidInput(_))));
    }

    #[test]
    fn wrap_pi_range() {
        assert!((wrap_pi(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-15);
        assert_eq!(wrap_pi(PI), PI);
        assert!((wrap_pi(-PI) - PI).abs() < 1e-15);
        assert!((wrap_pi(9.0 * PI / 2.0) - PI / 2.0).abs() < 1e-12);
        // In-range values are returned bit for bit.
        let small = -0.00002f64.to_radians();
        assert_eq!(wrap_pi(small), small);
        assert_eq!(wrap_pi(-small), -small);
    }

    #[test]
    fn two_meter_square_at_sixty_north() {
        let d = 0.00002;
        let sq = ring(&[[60.0, 10.0], [60.0, 10.0 + d], [60.0 + d, 10.0 + d], [60.0 + d, 10.0]]);
        let (m, p) = radii(60.0 + d / 2.0);
        let expected = (d.to_radians() * m) * (d.to_radians() * p);
        let fwd = geodesic_area(&sq);
        let rev = geodesic_area(&sq.reversed());
        assert!((fwd - expected).abs() / expected < 1e-4, "{fwd} vs {expected}");
        assert!((rev - expected).abs() / expected < 1e-4, "{rev} vs {expected}");
        assert!((fwd - rev).abs() / expected < 1e-6, "{fwd} vs {rev}");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_area_ignores_winding(
            seed in any::<u64>(),
            lat in -70.0f64..70.0,
            lng in -170.0f64..170.0,
            radius_m in 1.0f64..500.0,
        ) {
            let cfg = PlotCfg {
                center: Coordinate { lat, lng },
                radius_m,
                ..PlotCfg::default()
            };
            let plot = draw_plot(cfg, ReplayToken { seed, index: 0 }).unwrap();
            let fwd = geodesic_area(&plot);
            let rev = geodesic_area(&plot.reversed());
            prop_assert!(fwd > 0.0);
            prop_assert!((fwd - rev).abs() <= 1e-3 + 1e-9 * fwd, "{} vs {}", fwd, rev);
        }
    }
}
