use std::collections::HashMap;

use crate::math::Point2;

use super::VertexKeyMode;

/// Hashable identity of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(super) enum VertexKey {
    /// Raw coordinate bits; `-0.0` is folded into `0.0`.
    Exact(u64, u64),
    /// Coordinates rounded to a multiple of the snapping tolerance.
    Snapped(i64, i64),
}

/// `2^63`: grid indices must stay strictly below this magnitude to fit `i64`.
const GRID_LIMIT: f64 = 9_223_372_036_854_775_808.0;

impl VertexKey {
    /// Builds the key for `p`.
    ///
    /// A point whose snapped grid index would not fit in `i64` is keyed
    /// exactly, so it can only join points with identical coordinates.
    pub(super) fn new(p: &Point2, mode: VertexKeyMode) -> Self {
        if let VertexKeyMode::Snapped { tolerance } = mode {
            if tolerance.is_finite() && tolerance > 0.0 {
                if let (Some(x), Some(y)) = (grid_index(p.x, tolerance), grid_index(p.y, tolerance))
                {
                    return Self::Snapped(x, y);
                }
            }
        }
        Self::Exact(exact_bits(p.x), exact_bits(p.y))
    }
}

#[allow(clippy::cast_possible_truncation)]
fn grid_index(v: f64, tolerance: f64) -> Option<i64> {
    let q = (v / tolerance).round();
    (q.is_finite() && q.abs() < GRID_LIMIT).then(|| q as i64)
}

#[allow(clippy::float_cmp)]
fn exact_bits(v: f64) -> u64 {
    if v == 0.0 {
        0.0_f64.to_bits()
    } else {
        v.to_bits()
    }
}

/// Undirected edge identity: the sorted pair of endpoint keys.
pub(super) fn edge_id(a: VertexKey, b: VertexKey) -> (VertexKey, VertexKey) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Vertex adjacency map preserving insertion order.
#[derive(Debug, Default)]
pub(super) struct AdjacencyGraph {
    order: Vec<VertexKey>,
    positions: HashMap<VertexKey, Point2>,
    neighbors: HashMap<VertexKey, Vec<VertexKey>>,
}

impl AdjacencyGraph {
    /// Records both directions of the undirected edge between `a` and `b`.
    pub(super) fn add_edge(&mut self, a: (VertexKey, Point2), b: (VertexKey, Point2)) {
        self.touch(a);
        self.touch(b);
        self.neighbors.entry(a.0).or_default().push(b.0);
        self.neighbors.entry(b.0).or_default().push(a.0);
    }

    fn touch(&mut self, (key, point): (VertexKey, Point2)) {
        if !self.positions.contains_key(&key) {
            self.positions.insert(key, point);
            self.order.push(key);
        }
    }

    /// Number of adjacency entries recorded for `key`.
    pub(super) fn degree(&self, key: VertexKey) -> usize {
        self.neighbors.get(&key).map_or(0, Vec::len)
    }

    /// Adjacent keys in insertion order.
    pub(super) fn neighbors(&self, key: VertexKey) -> &[VertexKey] {
        self.neighbors.get(&key).map(Vec::as_slice).unwrap_or_default()
    }

    /// First coordinate seen for `key`.
    pub(super) fn position(&self, key: VertexKey) -> Option<Point2> {
        self.positions.get(&key).copied()
    }

    /// First vertex, in insertion order, with exactly one adjacency.
    pub(super) fn first_endpoint(&self) -> Option<VertexKey> {
        self.order.iter().copied().find(|&k| self.degree(k) == 1)
    }

    pub(super) fn vertex_count(&self) -> usize {
        self.order.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(x: f64, y: f64) -> (VertexKey, Point2) {
        let p = Point2::new(x, y);
        (VertexKey::new(&p, VertexKeyMode::Exact), p)
    }

    #[test]
    fn negative_zero_matches_zero() {
        assert_eq!(key(0.0, 1.0).0, key(-0.0, 1.0).0);
    }

    #[test]
    fn exact_keys_distinguish_tiny_offsets() {
        assert_ne!(key(0.1 + 0.2, 0.0).0, key(0.3, 0.0).0);
    }

    #[test]
    fn snapped_keys_merge_tiny_offsets() {
        let mode = VertexKeyMode::Snapped { tolerance: 1e-6 };
        let a = VertexKey::new(&Point2::new(0.1 + 0.2, 0.0), mode);
        let b = VertexKey::new(&Point2::new(0.3, 0.0), mode);
        assert_eq!(a, b);
    }

    #[test]
    fn non_positive_tolerance_falls_back_to_exact() {
        let p = Point2::new(1.0, 2.0);
        let k = VertexKey::new(&p, VertexKeyMode::Snapped { tolerance: 0.0 });
        assert!(matches!(k, VertexKey::Exact(..)));
    }

    #[test]
    fn overflowing_grid_falls_back_to_exact() {
        let mode = VertexKeyMode::Snapped { tolerance: 1e-18 };
        let a = VertexKey::new(&Point2::new(10.0, 10.0), mode);
        let b = VertexKey::new(&Point2::new(20.0, 10.0), mode);
        assert!(matches!(a, VertexKey::Exact(..)));
        assert_ne!(a, b);
    }

    #[test]
    fn small_coordinates_still_snap_with_tiny_tolerance() {
        let mode = VertexKeyMode::Snapped { tolerance: 1e-18 };
        let k = VertexKey::new(&Point2::new(1e-3, -2e-3), mode);
        assert!(matches!(k, VertexKey::Snapped(..)));
    }

    #[test]
    fn edge_id_is_order_independent() {
        let a = key(0.0, 0.0).0;
        let b = key(1.0, 0.0).0;
        assert_eq!(edge_id(a, b), edge_id(b, a));
    }

    #[test]
    fn degrees_and_endpoint() {
        let mut g = AdjacencyGraph::default();
        g.add_edge(key(0.0, 0.0), key(1.0, 0.0));
        g.add_edge(key(1.0, 0.0), key(1.0, 1.0));
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.degree(key(1.0, 0.0).0), 2);
        assert_eq!(g.first_endpoint(), Some(key(0.0, 0.0).0));
        assert_eq!(g.neighbors(key(1.0, 0.0).0), &[key(0.0, 0.0).0, key(1.0, 1.0).0]);
    }
}
