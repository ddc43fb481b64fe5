//! Criterion benchmarks for area and distance.
//! Focus sizes: ring vertex counts n in {4, 16, 64, 256}.
//! Results: by default under target/criterion.

use agromap::area::geodesic_area;
use agromap::distance::haversine;
use agromap::sample::{draw_plot, PlotCfg, ReplayToken, VertexCount};
use agromap::Coordinate;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn bench_area(c: &mut Criterion) {
    let mut group = c.benchmark_group("area");
    for &n in &[4usize, 16, 64, 256] {
        let cfg = PlotCfg {
            vertex_count: VertexCount::Fixed(n),
            radius_m: 500.0,
            ..PlotCfg::default()
        };
        group.bench_with_input(BenchmarkId::new("geodesic_area", n), &cfg, |b, &cfg| {
            b.iter_batched(
                || draw_plot(cfg, ReplayToken { seed: 42, index: n as u64 }).unwrap(),
                |ring| {
                    let _a = geodesic_area(&ring);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_haversine(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let pts: Vec<Coordinate> = (0..1024)
        .map(|_| Coordinate {
            lat: rng.gen_range(-90.0..=90.0),
            lng: rng.gen_range(-180.0..=180.0),
        })
        .collect();
    c.bench_function("haversine_1024_pairs", |b| {
        b.iter(|| {
            let mut s = 0.0;
            for w in pts.windows(2) {
                s += haversine(&w[0], &w[1]);
            }
            black_box(s)
        })
    });
}

criterion_group!(benches, bench_area, bench_haversine);
criterion_main!(benches);
