//! Irrigation volume for a planted field.

use crate::coord::round_to;
use crate::error::GeoError;

/// Days per billing month.
pub const DAYS_PER_MONTH: f64 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaterRequirement {
    /// Liters per day, 2 decimals.
    pub per_day_l: f64,
    /// Liters per 30-day month, 2 decimals.
    pub per_month_l: f64,
}

pub fn water_requirement(
    liters_per_plant_day: f64,
    plants: u64,
) -> Result<WaterRequirement, GeoError> {
    if plants == 0 {
        return Err(GeoError::invalid("plant count must be positive"));
    }
    if !liters_per_plant_day.is_finite() || liters_per_plant_day < 0.0 {
        return Err(GeoError::invalid(format!(
            "liters per plant per day must be non-negative, got {liters_per_plant_day}"
        )));
    }
    let daily = liters_per_plant_day * plants as f64;
    Ok(WaterRequirement {
        per_day_l: round_to(daily, 2),
        per_month_l: round_to(daily * DAYS_PER_MONTH, 2),
    })
}
