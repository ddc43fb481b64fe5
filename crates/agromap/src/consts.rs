//! Fixed constants shared by the geometry core.
//!
//! Policy
//! - Earth models and unit factors are fixed, not configurable.

/// WGS84 semi-major axis in meters.
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// Mean Earth radius used by the haversine path, in kilometers.
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0;

/// Meters per degree of latitude (and of longitude at the equator) used by the
/// grid scan (flat approximation, not the ellipsoid value).
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Decimal places kept on emitted grid points (~0.11 m at the equator).
pub const GRID_DECIMALS: i32 = 6;

/// Default upper bound on candidate evaluations in one grid scan.
pub const DEFAULT_MAX_CANDIDATES: u64 = 10_000_000;

pub const SQFT_PER_M2: f64 = 10.7639;
pub const M2_PER_SQFT: f64 = 0.092903;
pub const M2_PER_HECTARE: f64 = 10_000.0;
pub const M2_PER_ACRE: f64 = 4046.86;
