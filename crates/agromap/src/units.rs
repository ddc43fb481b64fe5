//! Area unit breakdown for display.

use crate::consts::{M2_PER_ACRE, M2_PER_HECTARE, SQFT_PER_M2};
use crate::coord::round_to;

/// One area in the units farmers quote.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaBreakdown {
    pub square_meters: f64,
    /// Square feet, 2 decimals.
    pub sqft: f64,
    /// Hectares, 3 decimals.
    pub hectares: f64,
    /// Acres, 2 decimals.
    pub acres: f64,
}

impl AreaBreakdown {
    pub fn from_square_meters(m2: f64) -> Self {
        Self {
            square_meters: m2,
            sqft: round_to(m2 * SQFT_PER_M2, 2),
            hectares: round_to(m2 / M2_PER_HECTARE, 3),
            acres: round_to(m2 / M2_PER_ACRE, 2),
        }
    }
}
