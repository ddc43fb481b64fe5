mod io;
mod provenance;

use agromap::api::{
    compute_area, estimate_plants, generate_layout_with, geodesic_area, haversine, nearby,
    water_requirement, AreaBreakdown, Coordinate, GeomCfg, LayoutCfg,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Field geometry: area, distance, planting layouts")]
struct Cmd {
    /// Optional run tag; propagated to provenance records and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Geodesic area of a field boundary, with unit breakdown
    Area {
        /// Ring file (.json or .csv)
        #[arg(long)]
        input: PathBuf,
    },
    /// Great-circle distance in km between two `lat,lng` points
    Distance {
        #[arg(long, value_parser = parse_point)]
        from: Coordinate,
        #[arg(long, value_parser = parse_point)]
        to: Coordinate,
    },
    /// Planting grid inside a field boundary; writes .csv or .json plus provenance
    Layout {
        #[arg(long)]
        input: PathBuf,
        /// Grid spacing in meters
        #[arg(long)]
        spacing: f64,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = agromap::consts::DEFAULT_MAX_CANDIDATES)]
        max_candidates: u64,
        /// Scan grid rows in parallel
        #[arg(long)]
        parallel: bool,
        /// Vertex snap size for repair, degrees
        #[arg(long, default_value_t = GeomCfg::default().snap)]
        snap: f64,
    },
    /// Plant count estimate for an area in square feet
    Estimate {
        #[arg(long)]
        area_sqft: f64,
        #[arg(long)]
        row_spacing: f64,
        #[arg(long)]
        col_spacing: f64,
    },
    /// Daily and monthly water need
    Water {
        /// Liters per plant per day
        #[arg(long)]
        lpd: f64,
        #[arg(long)]
        plants: u64,
    },
    /// Sites (CSV with name,lat,lng) within a radius, nearest first
    Nearby {
        #[arg(long, value_parser = parse_point)]
        origin: Coordinate,
        #[arg(long)]
        sites: PathBuf,
        #[arg(long, default_value_t = 50.0)]
        radius_km: f64,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Area { input } => area(input),
        Action::Distance { from, to } => distance(from, to),
        Action::Layout {
            input,
            spacing,
            out,
            max_candidates,
            parallel,
            snap,
        } => {
            let cfg = LayoutCfg {
                max_candidates,
                parallel,
                geom: GeomCfg { snap },
            };
            layout(input, spacing, out, cfg, cmd.tag)
        }
        Action::Estimate {
            area_sqft,
            row_spacing,
            col_spacing,
        } => estimate(area_sqft, row_spacing, col_spacing),
        Action::Water { lpd, plants } => water(lpd, plants),
        Action::Nearby {
            origin,
            sites,
            radius_km,
        } => near(origin, sites, radius_km),
        Action::Report => report(cmd.tag),
    }
}

fn parse_point(s: &str) -> Result<Coordinate, String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `lat,lng`, got `{s}`"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("latitude: {e}"))?;
    let lng: f64 = lng.trim().parse().map_err(|e| format!("longitude: {e}"))?;
    Coordinate::new(lat, lng).map_err(|e| e.to_string())
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn area(input: PathBuf) -> Result<()> {
    tracing::info!(input = %input.display(), "area");
    let ring = io::read_ring(&input)?;
    let m2 = compute_area(ring.vertices())?;
    print_json(&serde_json::to_value(AreaBreakdown::from_square_meters(m2))?)
}

fn distance(from: Coordinate, to: Coordinate) -> Result<()> {
    tracing::info!(?from, ?to, "distance");
    print_json(&json!({ "distance_km": haversine(&from, &to) }))
}

fn layout(
    input: PathBuf,
    spacing: f64,
    out: PathBuf,
    cfg: LayoutCfg,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(
        input = %input.display(),
        out = %out.display(),
        spacing,
        max_candidates = cfg.max_candidates,
        parallel = cfg.parallel,
        tag = ?tag,
        "layout"
    );
    let ring = io::read_ring(&input)?;
    let result = generate_layout_with(&ring, spacing, &cfg)
        .with_context(|| format!("laying out {}", input.display()))?;
    let written = io::write_layout(&out, &result)?;
    let area_m2 = geodesic_area(&ring);
    let payload = provenance::Payload::new(json!({
        "input": input.to_string_lossy(),
        "spacing_m": spacing,
        "max_candidates": cfg.max_candidates,
        "parallel": cfg.parallel,
        "snap_deg": cfg.geom.snap,
        "area_m2": area_m2,
        "count": written,
    }))
    .tagged(tag);
    let sidecar = provenance::write_sidecar(&out, payload)?;
    tracing::info!(count = written, sidecar = %sidecar.display(), "layout written");
    print_json(&json!({
        "count": written,
        "area_m2": area_m2,
        "out": out.to_string_lossy(),
    }))
}

fn estimate(area_sqft: f64, row_spacing: f64, col_spacing: f64) -> Result<()> {
    tracing::info!(area_sqft, row_spacing, col_spacing, "estimate");
    let e = estimate_plants(area_sqft, row_spacing, col_spacing)?;
    print_json(&serde_json::to_value(e)?)
}

fn water(lpd: f64, plants: u64) -> Result<()> {
    tracing::info!(lpd, plants, "water");
    let w = water_requirement(lpd, plants)?;
    print_json(&serde_json::to_value(w)?)
}

fn near(origin: Coordinate, sites: PathBuf, radius_km: f64) -> Result<()> {
    tracing::info!(?origin, sites = %sites.display(), radius_km, "nearby");
    let all = io::read_sites(&sites)?;
    let hits = nearby(&origin, &all, radius_km)?;
    let rows: Vec<_> = hits
        .iter()
        .map(|h| {
            json!({
                "name": h.site.name,
                "lat": h.site.lat,
                "lng": h.site.lng,
                "distance_km": h.distance_km,
            })
        })
        .collect();
    print_json(&json!(rows))
}

fn report(tag: Option<String>) -> Result<()> {
    print_json(&provenance::summary(tag))
}
