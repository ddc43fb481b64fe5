use super::*;
use nalgebra::{vector, Vector2};

fn unit_square() -> Vec<Vector2<f64>> {
    vec![
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![1.0, 1.0],
        vector![0.0, 1.0],
    ]
}

#[test]
fn simple_ring_passes_through_oriented_ccw() {
    let mut cw = unit_square();
    cw.reverse();
    let poly = repair(&cw, GeomCfg::default()).unwrap();
    assert_eq!(poly.rings.len(), 1);
    assert_eq!(poly.rings[0].len(), 4);
    assert!((poly.area() - 1.0).abs() < 1e-12);
    assert!(poly.contains(vector![0.5, 0.5]));
    assert!(!poly.contains(vector![0.0, 0.5]));
    assert!(!poly.contains(vector![1.5, 0.5]));
}

#[test]
fn closing_and_repeated_vertices_are_dropped() {
    let mut ring = unit_square();
    ring.insert(2, vector![1.0, 0.0]);
    ring.push(vector![0.0, 0.0]);
    let poly = repair(&ring, GeomCfg::default()).unwrap();
    assert_eq!(poly.rings, vec![unit_square()]);
}

#[test]
fn bowtie_splits_into_two_lobes() {
    let bowtie = vec![
        vector![0.0, 0.0],
        vector![1.0, 1.0],
        vector![1.0, 0.0],
        vector![0.0, 1.0],
    ];
    assert!(!is_simple(&bowtie, 1e-9));
    let poly = repair(&bowtie, GeomCfg::default()).unwrap();
    assert_eq!(poly.rings.len(), 2);
    for ring in &poly.rings {
        assert_eq!(ring.len(), 3);
        assert!(signed_area(ring) > 0.0);
    }
    assert!((poly.area() - 0.5).abs() < 1e-12);
    // One point in each lobe, plus the regions the bowtie never covers.
    assert!(poly.contains(vector![0.2, 0.5]));
    assert!(poly.contains(vector![0.8, 0.5]));
    assert!(!poly.contains(vector![0.5, 0.2]));
    assert!(!poly.contains(vector![0.5, 0.8]));
    // The crossing point is on the boundary.
    assert_eq!(poly.locate(vector![0.5, 0.5]), Containment::Boundary);
}

#[test]
fn spike_is_removed() {
    // Square with an out-and-back excursion along the bottom edge's line.
    let ring = vec![
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![2.0, 0.0],
        vector![1.0, 0.0],
        vector![1.0, 1.0],
        vector![0.0, 1.0],
    ];
    assert!(!is_simple(&ring, 1e-9));
    let poly = repair(&ring, GeomCfg::default()).unwrap();
    assert_eq!(poly.rings.len(), 1);
    assert!((poly.area() - 1.0).abs() < 1e-12);
    assert!(!poly.contains(vector![1.5, 0.0]));
    let b = poly.bounds().unwrap();
    assert_eq!((b.min_lng, b.max_lng), (0.0, 1.0));
}

#[test]
fn doubly_wound_ring_keeps_its_interior() {
    let sq = unit_square();
    let twice: Vec<_> = sq.iter().chain(sq.iter()).copied().collect();
    let poly = repair(&twice, GeomCfg::default()).unwrap();
    assert_eq!(poly.rings.len(), 1);
    assert!((poly.area() - 1.0).abs() < 1e-12);
    assert!(poly.contains(vector![0.5, 0.5]));
}

#[test]
fn figure_eight_with_shared_vertex() {
    // Two squares meeting at (1, 1), drawn as one ring through the pinch twice.
    let ring = vec![
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![1.0, 1.0],
        vector![2.0, 1.0],
        vector![2.0, 2.0],
        vector![1.0, 2.0],
        vector![1.0, 1.0],
        vector![0.0, 1.0],
    ];
    let poly = repair(&ring, GeomCfg::default()).unwrap();
    assert_eq!(poly.rings.len(), 2);
    assert!((poly.area() - 2.0).abs() < 1e-12);
    assert!(poly.contains(vector![0.5, 0.5]));
    assert!(poly.contains(vector![1.5, 1.5]));
    assert!(!poly.contains(vector![1.5, 0.5]));
}

#[test]
fn degenerate_rings_fail() {
    let line = vec![vector![0.0, 0.0], vector![1.0, 1.0], vector![2.0, 2.0]];
    assert_eq!(repair(&line, GeomCfg::default()), Err(RepairError::ZeroArea));
    let two = vec![vector![0.0, 0.0], vector![1.0, 1.0], vector![0.0, 0.0]];
    assert_eq!(repair(&two, GeomCfg::default()), Err(RepairError::TooFewVertices));
    // Out and back along a line collapses to nothing.
    let back = vec![
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![2.0, 0.0],
        vector![1.0, 0.0],
    ];
    assert!(repair(&back, GeomCfg::default()).is_err());
}

#[test]
fn snap_merges_nearby_vertices() {
    let mut ring = unit_square();
    ring.insert(1, vector![1e-12, 0.0]);
    let poly = repair(&ring, GeomCfg::default()).unwrap();
    assert_eq!(poly.rings[0].len(), 4);
}
