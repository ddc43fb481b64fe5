//! Print area, unit breakdown, and grid size for a few random plots.
//!
//! Usage:
//!   cargo run -p agromap --example plot_layout -- 10
//!
//! The optional argument is the grid spacing in meters (default 10).

use agromap::api::{generate_layout, geodesic_area, AreaBreakdown};
use agromap::sample::{draw_plot, draw_tangled, PlotCfg, ReplayToken};

fn main() {
    let spacing = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(10.0);
    for index in 0..5 {
        let tok = ReplayToken { seed: 2025, index };
        for (kind, ring) in [
            ("plot", draw_plot(PlotCfg::default(), tok)),
            ("tangled", draw_tangled(PlotCfg::default(), tok)),
        ] {
            let ring = match ring {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("{kind} {index}: {e}");
                    continue;
                }
            };
            let area = AreaBreakdown::from_square_meters(geodesic_area(&ring));
            match generate_layout(&ring, spacing) {
                Ok(layout) => println!(
                    "{kind} {index}: n={} area={:.1} m² ({} ac) plants={}",
                    ring.len(),
                    area.square_meters,
                    area.acres,
                    layout.count
                ),
                Err(e) => eprintln!("{kind} {index}: {e}"),
            }
        }
    }
}
