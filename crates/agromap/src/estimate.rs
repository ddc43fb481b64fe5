//! Plant count estimate from an area and row/column spacing.
//!
//! `recommended = floor(area_m² / (row · col))`, with a ±10 % band
//! (`min` rounds down, `max` rounds up). The band is computed in integers so
//! that e.g. 100 plants give exactly 90..=110.

use crate::consts::M2_PER_SQFT;
use crate::error::GeoError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlantEstimate {
    pub recommended: u64,
    pub min: u64,
    pub max: u64,
}

pub fn estimate_plants(
    area_sqft: f64,
    row_spacing_m: f64,
    col_spacing_m: f64,
) -> Result<PlantEstimate, GeoError> {
    for (name, v) in [
        ("area_sqft", area_sqft),
        ("row_spacing_m", row_spacing_m),
        ("col_spacing_m", col_spacing_m),
    ] {
        if !v.is_finite() || v <= 0.0 {
            return Err(GeoError::invalid(format!("{name} must be positive, got {v}")));
        }
    }
    let area_m2 = area_sqft * M2_PER_SQFT;
    let per_plant = row_spacing_m * col_spacing_m;
    let recommended = (area_m2 / per_plant).floor();
    if !recommended.is_finite() || recommended >= u64::MAX as f64 / 11.0 {
        return Err(GeoError::invalid(format!(
            "estimate overflows: {area_sqft} sqft at {row_spacing_m} x {col_spacing_m} m"
        )));
    }
    let recommended = recommended as u64;
    Ok(PlantEstimate {
        recommended,
        min: recommended * 9 / 10,
        max: (recommended * 11).div_ceil(10),
    })
}
