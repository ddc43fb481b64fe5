//! Measurement and layout bindings.

use crate::common::{coordinate_from_py, map_geo_err, ring_from_py};
use agromap::api::{generate_layout_with, LayoutCfg};
use pyo3::prelude::*;

/// Geodesic area (m²) of `[(lat, lng), ...]` on WGS84.
#[pyfunction]
pub fn compute_area(points: Vec<(f64, f64)>) -> PyResult<f64> {
    let ring = ring_from_py(points)?;
    Ok(agromap::area::geodesic_area(&ring))
}

/// Great-circle distance in km.
#[pyfunction]
pub fn haversine(a: (f64, f64), b: (f64, f64)) -> PyResult<f64> {
    let (a, b) = (coordinate_from_py(a)?, coordinate_from_py(b)?);
    Ok(agromap::distance::haversine(&a, &b))
}

/// Planting grid: `(count, [(lat, lng), ...])`.
#[pyfunction]
#[pyo3(signature = (points, spacing_m, max_candidates = None, parallel = false))]
pub fn generate_layout(
    py: Python<'_>,
    points: Vec<(f64, f64)>,
    spacing_m: f64,
    max_candidates: Option<u64>,
    parallel: bool,
) -> PyResult<(usize, Vec<(f64, f64)>)> {
    let ring = ring_from_py(points)?;
    let mut cfg = LayoutCfg {
        parallel,
        ..LayoutCfg::default()
    };
    if let Some(limit) = max_candidates {
        cfg.max_candidates = limit;
    }
    let result = py
        .allow_threads(|| generate_layout_with(&ring, spacing_m, &cfg))
        .map_err(map_geo_err)?;
    let pts = result.points.iter().map(|p| (p.lat, p.lng)).collect();
    Ok((result.count, pts))
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(compute_area, m)?)?;
    m.add_function(wrap_pyfunction!(haversine, m)?)?;
    m.add_function(wrap_pyfunction!(generate_layout, m)?)?;
    Ok(())
}
