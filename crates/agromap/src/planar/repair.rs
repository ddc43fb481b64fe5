//! Self-intersection repair (planar-graph resolution).
//!
//! Purpose
//! - Turn an arbitrary ring into a valid `Polygon` covering the same ground a
//!   zero-width buffer would: every point the input ring winds around (nonzero
//!   rule) is kept, everything else is dropped.
//!
//! Model
//! 1. Clean: drop consecutive duplicate vertices and the closing duplicate.
//! 2. Simple rings are returned as-is (re-oriented counter-clockwise).
//! 3. Otherwise split every edge at all its intersections, snap vertices onto
//!    a `GeomCfg::snap` grid, and build the planar arrangement (half-edges,
//!    angular order at each vertex, faces with their interior on the left).
//! 4. Every half-edge carries the net number of input edges running along it.
//!    Starting from the unbounded face (winding 0), crossing a half-edge from
//!    its right to its left adds that count, which gives every face its
//!    winding number.
//! 5. Keep faces with nonzero winding; their outline is traced into rings.
//!
//! Tie-breaks
//! - Vertices landing in the same snap cell merge into the first one interned
//!   (input vertices come first, in ring order, then split points).
//! - Where kept regions touch at a single vertex, the outline leaves the
//!   vertex along the first boundary half-edge clockwise from the arrival
//!   direction, so touching lobes become separate rings.
//! - Overlapping collinear edges merge into one graph edge; back-and-forth
//!   spikes cancel (net count 0) and vanish from the result.

use std::collections::{HashMap, VecDeque};

use nalgebra::Vector2;

use super::containment::segment_intersections;
use super::types::{signed_area, GeomCfg, Polygon};

/// Why repair could not produce a polygon.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepairError {
    #[error("ring has fewer than 3 distinct vertices after cleaning")]
    TooFewVertices,
    #[error("ring encloses no area")]
    ZeroArea,
    #[error("planar arrangement is inconsistent: {0}")]
    Inconsistent(&'static str),
}

/// Resolve `ring` (open, planar `(lng, lat)`) into a valid polygon.
pub fn repair(ring: &[Vector2<f64>], cfg: GeomCfg) -> Result<Polygon, RepairError> {
    let cleaned = clean(ring, cfg.snap);
    if cleaned.len() < 3 {
        return Err(RepairError::TooFewVertices);
    }
    if is_simple(&cleaned, cfg.snap) {
        let area = signed_area(&cleaned);
        if area == 0.0 {
            return Err(RepairError::ZeroArea);
        }
        let mut shell = cleaned;
        if area < 0.0 {
            shell.reverse();
        }
        return Ok(Polygon { rings: vec![shell] });
    }
    let graph = Arrangement::build(&cleaned, cfg.snap)?;
    let rings = graph.kept_outline()?;
    if rings.is_empty() {
        return Err(RepairError::ZeroArea);
    }
    Ok(Polygon { rings })
}

/// True if no two edges share a point other than a common endpoint of
/// neighbouring edges.
pub fn is_simple(ring: &[Vector2<f64>], snap: f64) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    for i in 0..n {
        let (a, b) = (ring[i], ring[(i + 1) % n]);
        for j in (i + 1)..n {
            let (c, d) = (ring[j], ring[(j + 1) % n]);
            let hits = segment_intersections(a, b, c, d);
            let shared = if j == i + 1 {
                Some(b)
            } else if i == 0 && j == n - 1 {
                Some(a)
            } else {
                None
            };
            let extra = hits
                .iter()
                .any(|p| shared.map_or(true, |s| snap_key(*p, snap) != snap_key(s, snap)));
            if extra {
                return false;
            }
        }
    }
    true
}

/// Drop repeated consecutive vertices (including the closing duplicate).
fn clean(ring: &[Vector2<f64>], snap: f64) -> Vec<Vector2<f64>> {
    let mut out: Vec<Vector2<f64>> = Vec::with_capacity(ring.len());
    for p in ring {
        if out.last().map_or(true, |q| snap_key(*q, snap) != snap_key(*p, snap)) {
            out.push(*p);
        }
    }
    while out.len() > 1 {
        let (first, last) = (out[0], out[out.len() - 1]);
        if snap_key(first, snap) == snap_key(last, snap) {
            out.pop();
        } else {
            break;
        }
    }
    out
}

#[inline]
fn snap_key(p: Vector2<f64>, snap: f64) -> (i64, i64) {
    ((p.x / snap).round() as i64, (p.y / snap).round() as i64)
}

/// Vertex store that merges points falling in the same snap cell.
struct VertexPool {
    snap: f64,
    index: HashMap<(i64, i64), usize>,
    points: Vec<Vector2<f64>>,
}

impl VertexPool {
    fn new(snap: f64) -> Self {
        Self {
            snap,
            index: HashMap::new(),
            points: Vec::new(),
        }
    }

    fn intern(&mut self, p: Vector2<f64>) -> usize {
        let key = snap_key(p, self.snap);
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = self.points.len();
        self.points.push(p);
        self.index.insert(key, id);
        id
    }
}

/// Half-edge arrangement of one ring. Half-edge `2k` runs `lo → hi` of
/// undirected edge `k`, `2k + 1` runs back; `h ^ 1` is the twin.
struct Arrangement {
    points: Vec<Vector2<f64>>,
    /// Origin vertex per half-edge.
    origin: Vec<usize>,
    /// Net input-edge count along each half-edge (`count[h ^ 1] == -count[h]`).
    count: Vec<i32>,
    /// Outgoing half-edges per vertex, counter-clockwise by angle.
    around: Vec<Vec<usize>>,
    /// Position of each half-edge in its origin's `around` list.
    slot: Vec<usize>,
}

impl Arrangement {
    fn build(ring: &[Vector2<f64>], snap: f64) -> Result<Self, RepairError> {
        let n = ring.len();
        let mut pool = VertexPool::new(snap);
        for p in ring {
            pool.intern(*p);
        }

        let mut splits: Vec<Vec<Vector2<f64>>> = vec![Vec::new(); n];
        for i in 0..n {
            let (a, b) = (ring[i], ring[(i + 1) % n]);
            for j in (i + 1)..n {
                let (c, d) = (ring[j], ring[(j + 1) % n]);
                for p in segment_intersections(a, b, c, d) {
                    splits[i].push(p);
                    splits[j].push(p);
                }
            }
        }

        // Undirected edge (lo, hi) -> net count in the lo → hi direction.
        let mut edges: HashMap<(usize, usize), i32> = HashMap::new();
        let mut order: Vec<(usize, usize)> = Vec::new();
        for (i, pts) in splits.iter_mut().enumerate() {
            let (a, b) = (ring[i], ring[(i + 1) % n]);
            let dir = b - a;
            pts.sort_by(|p, q| (p - a).dot(&dir).total_cmp(&(q - a).dot(&dir)));
            let mut chain: Vec<usize> = Vec::with_capacity(pts.len() + 2);
            chain.push(pool.intern(a));
            for p in pts.iter() {
                chain.push(pool.intern(*p));
            }
            chain.push(pool.intern(b));
            chain.dedup();
            for w in chain.windows(2) {
                let (u, v) = (w[0], w[1]);
                let (key, delta) = if u < v { ((u, v), 1) } else { ((v, u), -1) };
                let entry = edges.entry(key).or_insert_with(|| {
                    order.push(key);
                    0
                });
                *entry += delta;
            }
        }

        let points = pool.points;
        let mut origin = Vec::with_capacity(order.len() * 2);
        let mut count = Vec::with_capacity(order.len() * 2);
        let mut around: Vec<Vec<usize>> = vec![Vec::new(); points.len()];
        for (k, key) in order.iter().enumerate() {
            let c = edges[key];
            origin.push(key.0);
            origin.push(key.1);
            count.push(c);
            count.push(-c);
            around[key.0].push(2 * k);
            around[key.1].push(2 * k + 1);
        }
        let mut slot = vec![0usize; origin.len()];
        for (v, list) in around.iter_mut().enumerate() {
            let base = points[v];
            list.sort_by(|&h, &g| {
                let dh = points[origin[h ^ 1]] - base;
                let dg = points[origin[g ^ 1]] - base;
                dh.y.atan2(dh.x).total_cmp(&dg.y.atan2(dg.x))
            });
            for (pos, &h) in list.iter().enumerate() {
                slot[h] = pos;
            }
        }
        if origin.is_empty() {
            return Err(RepairError::TooFewVertices);
        }
        Ok(Self {
            points,
            origin,
            count,
            around,
            slot,
        })
    }

    #[inline]
    fn dest(&self, h: usize) -> usize {
        self.origin[h ^ 1]
    }

    /// Outgoing half-edge at `dest(h)` immediately clockwise of the twin.
    #[inline]
    fn next(&self, h: usize) -> usize {
        self.rotate_cw(h ^ 1, 1)
    }

    #[inline]
    fn rotate_cw(&self, h: usize, steps: usize) -> usize {
        let list = &self.around[self.origin[h]];
        let deg = list.len();
        list[(self.slot[h] + deg - steps % deg) % deg]
    }

    /// Face id per half-edge (face on the left) plus each face's signed area.
    fn faces(&self) -> Result<(Vec<usize>, Vec<f64>), RepairError> {
        let m = self.origin.len();
        let mut face = vec![usize::MAX; m];
        let mut areas = Vec::new();
        for start in 0..m {
            if face[start] != usize::MAX {
                continue;
            }
            let id = areas.len();
            let mut s = 0.0;
            let mut h = start;
            let mut steps = 0;
            loop {
                face[h] = id;
                let (a, b) = (self.points[self.origin[h]], self.points[self.dest(h)]);
                s += a.x * b.y - a.y * b.x;
                h = self.next(h);
                steps += 1;
                if h == start {
                    break;
                }
                if steps > m || face[h] != usize::MAX {
                    return Err(RepairError::Inconsistent("face cycle does not close"));
                }
            }
            areas.push(0.5 * s);
        }
        Ok((face, areas))
    }

    /// Winding number per face, from the unbounded face outward.
    fn windings(&self, face: &[usize], areas: &[f64]) -> Result<Vec<i32>, RepairError> {
        let outer = areas
            .iter()
            .enumerate()
            .min_by(|x, y| x.1.total_cmp(y.1))
            .map(|(i, _)| i)
            .ok_or(RepairError::Inconsistent("no faces"))?;
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); areas.len()];
        for (h, &f) in face.iter().enumerate() {
            members[f].push(h);
        }
        let mut wind: Vec<Option<i32>> = vec![None; areas.len()];
        wind[outer] = Some(0);
        let mut queue = VecDeque::from([outer]);
        while let Some(f) = queue.pop_front() {
            let wf = wind[f].unwrap_or(0);
            for &h in &members[f] {
                // f is left of h; the twin's face is right of h.
                let g = face[h ^ 1];
                let wg = wf - self.count[h];
                match wind[g] {
                    None => {
                        wind[g] = Some(wg);
                        queue.push_back(g);
                    }
                    Some(prev) if prev != wg => {
                        return Err(RepairError::Inconsistent("winding numbers disagree"));
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(wind.into_iter().map(|w| w.unwrap_or(0)).collect())
    }

    /// Outline of the nonzero-winding region, interior on the left.
    fn kept_outline(&self) -> Result<Vec<Vec<Vector2<f64>>>, RepairError> {
        let (face, areas) = self.faces()?;
        let wind = self.windings(&face, &areas)?;
        let kept = |h: usize| wind[face[h]] != 0;
        let boundary: Vec<bool> = (0..self.origin.len())
            .map(|h| kept(h) && !kept(h ^ 1))
            .collect();

        let mut used = vec![false; boundary.len()];
        let mut rings = Vec::new();
        for start in 0..boundary.len() {
            if !boundary[start] || used[start] {
                continue;
            }
            let mut ring = Vec::new();
            let mut h = start;
            loop {
                used[h] = true;
                ring.push(self.points[self.origin[h]]);
                h = self.next_boundary(h, &boundary)?;
                if h == start {
                    break;
                }
                if used[h] {
                    return Err(RepairError::Inconsistent("outline revisits an edge"));
                }
            }
            if ring.len() >= 3 && signed_area(&ring) != 0.0 {
                rings.push(ring);
            }
        }
        Ok(rings)
    }

    /// First boundary half-edge clockwise from the twin of `h` at `dest(h)`.
    fn next_boundary(&self, h: usize, boundary: &[bool]) -> Result<usize, RepairError> {
        let twin = h ^ 1;
        let deg = self.around[self.origin[twin]].len();
        for step in 1..=deg {
            let g = self.rotate_cw(twin, step);
            if boundary[g] {
                return Ok(g);
            }
        }
        Err(RepairError::Inconsistent("outline dead-ends"))
    }
}
