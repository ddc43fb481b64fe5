//! Field boundary and site readers, layout writers.
//!
//! Formats
//! - Rings: JSON `[[lat, lng], ...]`, JSON `{"coordinates": [[lat, lng], ...]}`,
//!   or CSV with `lat` and `lng` columns.
//! - Sites: CSV with `name`, `lat`, `lng` columns.
//! - Layouts: CSV or Parquet (`lat`, `lng` columns), or JSON
//!   (`{"count", "points"}`), chosen by the output extension.

use agromap::api::{Coordinate, LayoutResult, Located, Ring};
use anyhow::{bail, Context, Result};
use polars::prelude::*;
use serde::Deserialize;
use std::fs::{self, File};
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum RingDoc {
    Pairs(Vec<[f64; 2]>),
    Wrapped { coordinates: Vec<[f64; 2]> },
}

/// Read a ring from JSON or CSV (by extension; anything not `.csv` is JSON).
pub fn read_ring(path: &Path) -> Result<Ring> {
    let pairs = if has_ext(path, "csv") {
        let df = read_csv(path)?;
        let lat = f64_column(&df, "lat")?;
        let lng = f64_column(&df, "lng")?;
        lat.into_iter().zip(lng).map(|(a, b)| [a, b]).collect()
    } else {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        match serde_json::from_slice::<RingDoc>(&bytes)
            .with_context(|| format!("parsing ring JSON {}", path.display()))?
        {
            RingDoc::Pairs(p) => p,
            RingDoc::Wrapped { coordinates } => coordinates,
        }
    };
    Ring::from_lat_lng(&pairs).with_context(|| format!("invalid ring in {}", path.display()))
}

/// A named site from a sites CSV.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Site {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl Located for Site {
    fn location(&self) -> Coordinate {
        Coordinate {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

pub fn read_sites(path: &Path) -> Result<Vec<Site>> {
    let df = read_csv(path)?;
    let names = df
        .column("name")
        .and_then(|s| s.cast(&DataType::String))
        .with_context(|| format!("column `name` in {}", path.display()))?;
    let names = names.str()?;
    let lat = f64_column(&df, "lat")?;
    let lng = f64_column(&df, "lng")?;
    Ok(names
        .into_iter()
        .zip(lat.into_iter().zip(lng))
        .map(|(name, (lat, lng))| Site {
            name: name.unwrap_or_default().to_string(),
            lat,
            lng,
        })
        .collect())
}

/// Write a layout; returns the number of rows written.
pub fn write_layout(path: &Path, layout: &LayoutResult) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    if has_ext(path, "json") {
        fs::write(path, serde_json::to_vec_pretty(layout)?)
            .with_context(|| format!("writing {}", path.display()))?;
        return Ok(layout.count);
    }
    let lats: Vec<f64> = layout.points.iter().map(|p| p.lat).collect();
    let lngs: Vec<f64> = layout.points.iter().map(|p| p.lng).collect();
    let mut df = df!("lat" => lats, "lng" => lngs)?;
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    if has_ext(path, "parquet") {
        ParquetWriter::new(&mut file)
            .finish(&mut df)
            .with_context(|| format!("writing {}", path.display()))?;
    } else {
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(layout.count)
}

fn has_ext(path: &Path, ext: &str) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

fn read_csv(path: &Path) -> Result<DataFrame> {
    LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .finish()
        .and_then(|lf| lf.collect())
        .with_context(|| format!("reading CSV {}", path.display()))
}

/// Numeric column as `f64`; nulls are rejected.
fn f64_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = df
        .column(name)
        .and_then(|s| s.cast(&DataType::Float64))
        .with_context(|| format!("column `{name}`"))?;
    let values = series.f64()?;
    let mut out = Vec::with_capacity(values.len());
    for (row, v) in values.into_iter().enumerate() {
        match v {
            Some(v) => out.push(v),
            None => bail!("column `{name}` has a missing value at row {row}"),
        }
    }
    Ok(out)
}
