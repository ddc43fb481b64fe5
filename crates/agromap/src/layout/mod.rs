//! Planting grid clipped to a field boundary.
//!
//! Purpose
//! - Lay a regular grid of planting positions over a user-drawn field and keep
//!   the positions strictly inside it.
//!
//! Model
//! 1. Repair the ring into a valid `Polygon` (`planar::repair`). Repair
//!    failure yields an empty layout, never an error.
//! 2. Plan: rows start at the polygon's southern bound and step
//!    `spacing / 111320` degrees north while `lat ≤ max_lat`. Each row steps
//!    east from the western bound by `spacing / (111320·cos(lat))` while
//!    `lng ≤ max_lng`. The planned candidate total is checked against
//!    `LayoutCfg::max_candidates` before any containment work.
//! 3. Scan: each candidate is rounded to 6 decimals and kept if the rounded
//!    position is strictly inside the polygon.
//!
//! Output order is row-major (south to north, west to east) with or without
//! `LayoutCfg::parallel`.
//!
//! Code cross-refs: `Polygon::contains`, `GridPoint::rounded`, `GeomCfg`

use nalgebra::Vector2;
use rayon::prelude::*;

use crate::consts::{DEFAULT_MAX_CANDIDATES, METERS_PER_DEGREE};
use crate::coord::{BoundingBox, GridPoint, Ring};
use crate::error::GeoError;
use crate::planar::{repair, GeomCfg, Polygon};

/// Layout knobs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutCfg {
    /// Upper bound on candidate evaluations for one call.
    pub max_candidates: u64,
    /// Scan rows on the rayon pool.
    pub parallel: bool,
    pub geom: GeomCfg,
}

impl Default for LayoutCfg {
    fn default() -> Self {
        Self {
            max_candidates: DEFAULT_MAX_CANDIDATES,
            parallel: false,
            geom: GeomCfg::default(),
        }
    }
}

/// Grid positions inside the field; `count == points.len()`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutResult {
    pub count: usize,
    pub points: Vec<GridPoint>,
}

impl LayoutResult {
    fn from_points(points: Vec<GridPoint>) -> Self {
        Self {
            count: points.len(),
            points,
        }
    }
}

/// One planned grid row.
#[derive(Clone, Copy, Debug)]
struct Row {
    lat: f64,
    lng_step: f64,
}

/// Rows and candidate total for one scan.
#[derive(Debug)]
struct GridPlan {
    min_lng: f64,
    max_lng: f64,
    rows: Vec<Row>,
    candidates: u64,
}

/// Layout with default `LayoutCfg`.
pub fn generate_layout(ring: &Ring, spacing_m: f64) -> Result<LayoutResult, GeoError> {
    generate_layout_with(ring, spacing_m, &LayoutCfg::default())
}

pub fn generate_layout_with(
    ring: &Ring,
    spacing_m: f64,
    cfg: &LayoutCfg,
) -> Result<LayoutResult, GeoError> {
    if !spacing_m.is_finite() || spacing_m <= 0.0 {
        return Err(GeoError::invalid(format!(
            "spacing must be a positive number of meters, got {spacing_m}"
        )));
    }
    let poly = match repair(&ring.planar(), cfg.geom) {
        Ok(poly) => poly,
        Err(e) => {
            tracing::warn!(error = %e, vertices = ring.len(), "ring repair failed; empty layout");
            return Ok(LayoutResult::default());
        }
    };
    tracing::debug!(rings = poly.rings.len(), "repaired field boundary");
    let bounds = match poly.bounds() {
        Some(b) if !b.is_degenerate() => b,
        _ => {
            tracing::debug!("degenerate bounding box; empty layout");
            return Ok(LayoutResult::default());
        }
    };
    let plan = plan_grid(&bounds, spacing_m, cfg.max_candidates)?;
    tracing::debug!(
        rows = plan.rows.len(),
        candidates = plan.candidates,
        parallel = cfg.parallel,
        "grid planned"
    );
    let points: Vec<GridPoint> = if cfg.parallel {
        plan.rows
            .par_iter()
            .map(|row| scan_row(&poly, &plan, row))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect()
    } else {
        plan.rows
            .iter()
            .flat_map(|row| scan_row(&poly, &plan, row))
            .collect()
    };
    Ok(LayoutResult::from_points(points))
}

fn plan_grid(bounds: &BoundingBox, spacing_m: f64, limit: u64) -> Result<GridPlan, GeoError> {
    let lat_step = spacing_m / METERS_PER_DEGREE;
    let row_estimate = steps_within(bounds.lat_span(), lat_step);
    if row_estimate > limit {
        return Err(GeoError::IterationLimitExceeded {
            candidates: row_estimate,
            limit,
        });
    }
    advances(bounds.min_lat, bounds.max_lat, lat_step)?;

    let mut rows = Vec::new();
    let mut candidates: u64 = 0;
    let mut lat = bounds.min_lat;
    while lat <= bounds.max_lat {
        let lng_step = spacing_m / (METERS_PER_DEGREE * lat.to_radians().cos());
        if lng_step.is_finite() {
            advances(bounds.min_lng, bounds.max_lng, lng_step)?;
        }
        candidates = candidates.saturating_add(steps_within(bounds.lng_span(), lng_step));
        if candidates > limit {
            return Err(GeoError::IterationLimitExceeded { candidates, limit });
        }
        rows.push(Row { lat, lng_step });
        lat += lat_step;
    }
    Ok(GridPlan {
        min_lng: bounds.min_lng,
        max_lng: bounds.max_lng,
        rows,
        candidates,
    })
}

/// Positions `0, step, 2·step, …` not exceeding `span`.
fn steps_within(span: f64, step: f64) -> u64 {
    let n = (span / step).floor();
    if n.is_finite() {
        // `as` saturates for out-of-range floats.
        (n as u64).saturating_add(1)
    } else {
        1
    }
}

/// Accumulating `step` must still move the cursor anywhere in `[lo, hi]`.
fn advances(lo: f64, hi: f64, step: f64) -> Result<(), GeoError> {
    let far = lo.abs().max(hi.abs());
    if far + step > far {
        Ok(())
    } else {
        Err(GeoError::invalid(format!(
            "spacing too small to advance the grid at {far}°"
        )))
    }
}

fn scan_row(poly: &Polygon, plan: &GridPlan, row: &Row) -> Vec<GridPoint> {
    let mut out = Vec::new();
    let mut lng = plan.min_lng;
    while lng <= plan.max_lng {
        let p = GridPoint::rounded(row.lat, lng);
        if poly.contains(Vector2::new(p.lng, p.lat)) {
            out.push(p);
        }
        lng += row.lng_step;
    }
    out
}
