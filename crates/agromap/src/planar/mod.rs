//! Planar geometry on the `(lng, lat)` plane.
//!
//! Purpose
//! - Classify grid candidates against a field boundary and turn whatever ring a
//!   user drew (self-intersecting, doubled back, repeated vertices) into a valid
//!   `Polygon` first.
//!
//! Conventions
//! - Points are `nalgebra::Vector2` with `x = lng`, `y = lat`, in degrees.
//! - Rings are open (no closing duplicate). Interior is on the left of every
//!   edge after repair.
//! - Containment is strict: points on the boundary are not contained.
//!
//! Code cross-refs: `Polygon`, `repair`, `locate_in_rings`, `GeomCfg`

pub mod containment;
mod repair;
mod types;

pub use containment::{locate_in_rings, point_in_ring, segment_intersections, Containment};
pub use repair::{is_simple, repair, RepairError};
pub use types::{signed_area, GeomCfg, Polygon};

#[cfg(test)]
mod tests;
