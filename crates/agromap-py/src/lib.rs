//! PyO3 bindings for the `agromap` geometry core.
//!
//! Notes
//! - Keep bindings thin: plain tuples and lists in, tuples and dicts out.
//!   Validation errors surface as `ValueError`.
//! - The Python service layer calls these instead of its own geometry code.

mod common;
mod geom;
mod plan;

use pyo3::prelude::*;

#[pymodule]
fn agromap_native(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add("__version__", agromap::VERSION)?;
    geom::register(m)?;
    plan::register(m)?;
    Ok(())
}
