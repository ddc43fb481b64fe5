use agromap::{Coordinate, GeoError, Ring};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// `[(lat, lng), ...]` from Python into a validated ring.
pub fn ring_from_py(points: Vec<(f64, f64)>) -> PyResult<Ring> {
    let coords = points
        .into_iter()
        .map(|(lat, lng)| Coordinate { lat, lng })
        .collect();
    Ring::new(coords).map_err(map_geo_err)
}

pub fn coordinate_from_py(p: (f64, f64)) -> PyResult<Coordinate> {
    Coordinate::new(p.0, p.1).map_err(map_geo_err)
}

pub fn map_geo_err(err: GeoError) -> PyErr {
    PyValueError::new_err(err.to_string())
}
