//! Random field boundaries (radial jitter + replay tokens).
//!
//! Purpose
//! - Deterministic plot rings for property tests and benchmarks: star-shaped
//!   simple rings around a center, and "tangled" rings whose vertex order is
//!   shuffled so edges cross.
//!
//! Model
//! - `n` equally spaced bearings with bounded angular and radial jitter, radius
//!   in meters, converted to degrees with the flat `111320 m/°` factor
//!   (longitude scaled by `cos(lat)` at the center).
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.
//!
//! Code cross-refs: `Ring`, `generate_layout`

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::consts::METERS_PER_DEGREE;
use crate::coord::{Coordinate, Ring};
use crate::error::GeoError;

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Plot sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct PlotCfg {
    pub center: Coordinate,
    pub vertex_count: VertexCount,
    /// Base radius in meters.
    pub radius_m: f64,
    /// Angular jitter as a fraction of the base spacing 2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radii are `radius_m * (1 + u)` with `u ∈ [-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
}

impl Default for PlotCfg {
    fn default() -> Self {
        Self {
            center: Coordinate {
                lat: 12.9716,
                lng: 77.5946,
            },
            vertex_count: VertexCount::Uniform { min: 5, max: 16 },
            radius_m: 150.0,
            angle_jitter_frac: 0.3,
            radial_jitter: 0.35,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Star-shaped simple ring, counter-clockwise in the `(lng, lat)` plane.
pub fn draw_plot(cfg: PlotCfg, tok: ReplayToken) -> Result<Ring, GeoError> {
    let mut rng = tok.to_std_rng();
    let vertices = radial_vertices(&cfg, &mut rng);
    Ring::new(vertices)
}

/// Same vertex cloud as `draw_plot`, visited in shuffled order.
pub fn draw_tangled(cfg: PlotCfg, tok: ReplayToken) -> Result<Ring, GeoError> {
    let mut rng = tok.to_std_rng();
    let mut vertices = radial_vertices(&cfg, &mut rng);
    vertices.shuffle(&mut rng);
    Ring::new(vertices)
}

fn radial_vertices<R: Rng>(cfg: &PlotCfg, rng: &mut R) -> Vec<Coordinate> {
    let n = cfg.vertex_count.sample(rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.95);
    let r0 = cfg.radius_m.max(1e-3);
    let delta = 2.0 * PI / n as f64;
    let phase = rng.gen::<f64>() * 2.0 * PI;
    let lng_scale = METERS_PER_DEGREE * cfg.center.lat.to_radians().cos();
    (0..n)
        .map(|k| {
            let th = phase + k as f64 * delta + (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let r = r0 * (1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * rj);
            Coordinate {
                lat: cfg.center.lat + r * th.sin() / METERS_PER_DEGREE,
                lng: cfg.center.lng + r * th.cos() / lng_scale,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planar::{is_simple, signed_area};

    #[test]
    fn reproducible_draw() {
        let tok = ReplayToken { seed: 42, index: 7 };
        let a = draw_plot(PlotCfg::default(), tok).unwrap();
        let b = draw_plot(PlotCfg::default(), tok).unwrap();
        assert_eq!(a, b);
        let c = draw_plot(PlotCfg::default(), ReplayToken { seed: 42, index: 8 }).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn plots_are_simple_and_ccw() {
        for index in 0..32 {
            let ring = draw_plot(PlotCfg::default(), ReplayToken { seed: 3, index }).unwrap();
            let planar = ring.planar();
            assert!(is_simple(&planar, 1e-12), "index {index}");
            assert!(signed_area(&planar) > 0.0, "index {index}");
        }
    }

    #[test]
    fn tangled_keeps_vertex_count() {
        let cfg = PlotCfg {
            vertex_count: VertexCount::Fixed(9),
            ..PlotCfg::default()
        };
        let ring = draw_tangled(cfg, ReplayToken { seed: 5, index: 0 }).unwrap();
        assert_eq!(ring.len(), 9);
    }
}
