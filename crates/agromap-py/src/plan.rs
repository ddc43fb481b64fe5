//! Planning helpers: unit breakdown, plant estimate, water need.

use crate::common::map_geo_err;
use agromap::api::AreaBreakdown;
use pyo3::prelude::*;
use std::collections::HashMap;

/// `{"sqft", "hectares", "acres"}` for an area in m².
#[pyfunction]
pub fn area_breakdown(square_meters: f64) -> HashMap<&'static str, f64> {
    let b = AreaBreakdown::from_square_meters(square_meters);
    HashMap::from([
        ("sqft", b.sqft),
        ("hectares", b.hectares),
        ("acres", b.acres),
    ])
}

/// `(recommended, min, max)` plant counts.
#[pyfunction]
pub fn estimate_plants(
    area_sqft: f64,
    row_spacing_m: f64,
    col_spacing_m: f64,
) -> PyResult<(u64, u64, u64)> {
    let e = agromap::estimate::estimate_plants(area_sqft, row_spacing_m, col_spacing_m)
        .map_err(map_geo_err)?;
    Ok((e.recommended, e.min, e.max))
}

/// `(per_day_l, per_month_l)`.
#[pyfunction]
pub fn water_requirement(liters_per_plant_day: f64, plants: u64) -> PyResult<(f64, f64)> {
    let w = agromap::water::water_requirement(liters_per_plant_day, plants)
        .map_err(map_geo_err)?;
    Ok((w.per_day_l, w.per_month_l))
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(area_breakdown, m)?)?;
    m.add_function(wrap_pyfunction!(estimate_plants, m)?)?;
    m.add_function(wrap_pyfunction!(water_requirement, m)?)?;
    Ok(())
}
