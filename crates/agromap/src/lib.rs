//! Plantation geometry core.
//!
//! Three stateless computations behind a field-planning service:
//! - `area`: ellipsoidal (WGS84) area of a field boundary.
//! - `distance`: haversine great-circle distance.
//! - `layout`: a planting grid clipped to a repaired field boundary.
//!
//! Plus the small conversions around them (`units`, `estimate`, `water`) and a
//! radius search over caller-owned sites (`proximity`).
//!
//! API Policy
//! - Internal to the workspace (CLI and Python bindings). Prefer `api` or
//!   `prelude` re-exports over deep paths.

pub mod api;
pub mod area;
pub mod consts;
pub mod coord;
pub mod distance;
pub mod error;
pub mod estimate;
pub mod layout;
pub mod planar;
pub mod proximity;
pub mod sample;
pub mod units;
pub mod water;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use coord::{BoundingBox, Coordinate, GridPoint, Ring};
pub use error::GeoError;
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::area::{compute_area, geodesic_area, signed_geodesic_area, Ellipsoid};
    pub use crate::coord::{BoundingBox, Coordinate, GridPoint, Ring};
    pub use crate::distance::haversine;
    pub use crate::error::GeoError;
    pub use crate::layout::{generate_layout, generate_layout_with, LayoutCfg, LayoutResult};
    pub use crate::planar::{Containment, GeomCfg, Polygon};
    pub use crate::sample::{draw_plot, draw_tangled, PlotCfg, ReplayToken, VertexCount};
    pub use nalgebra::Vector2 as Vec2;
}
