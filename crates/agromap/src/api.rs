//! Curated surface for the CLI and the Python bindings.
//!
//! Not a stable API. Re-exports only; breaking changes follow the core.

// Measurements
pub use crate::area::{compute_area, geodesic_area, signed_geodesic_area};
pub use crate::distance::haversine;
// Layout
pub use crate::layout::{generate_layout, generate_layout_with, LayoutCfg, LayoutResult};
pub use crate::planar::{point_in_ring, Containment, GeomCfg};
// Conversions and planning helpers
pub use crate::estimate::{estimate_plants, PlantEstimate};
pub use crate::proximity::{nearby, Located, Nearby};
pub use crate::units::AreaBreakdown;
pub use crate::water::{water_requirement, WaterRequirement};
// Value types
pub use crate::coord::{Coordinate, GridPoint, Ring};
pub use crate::error::GeoError;
