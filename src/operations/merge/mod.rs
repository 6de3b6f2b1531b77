mod adjacency;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{MergeError, Result};
use crate::math::Point2;

use adjacency::{edge_id, AdjacencyGraph, VertexKey};

/// Entity type discriminator of straight line entities.
pub const LINE_ENTITY: &str = "LINE";

/// A flat line entity as stored in a drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineEntity {
    /// Entity type, `"LINE"` for line entities.
    pub dxftype: String,
    /// Layer the entity is placed on.
    pub layer: String,
    pub start: Point2,
    pub end: Point2,
}

impl LineEntity {
    /// Creates a `LINE` entity on `layer`.
    #[must_use]
    pub fn line(layer: impl Into<String>, start: Point2, end: Point2) -> Self {
        Self {
            dxftype: LINE_ENTITY.to_owned(),
            layer: layer.into(),
            start,
            end,
        }
    }

    /// Returns `true` for line entities.
    #[must_use]
    pub fn is_line(&self) -> bool {
        self.dxftype == LINE_ENTITY
    }
}

/// How endpoints are matched when building the adjacency map.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum VertexKeyMode {
    /// Coordinates must be bit-for-bit equal (`-0.0` equals `0.0`).
    ///
    /// Points that are geometrically identical but computed along different
    /// arithmetic paths may fail to connect.
    #[default]
    Exact,
    /// Coordinates are rounded to the nearest multiple of `tolerance`.
    ///
    /// Points straddling a rounding boundary may still fail to connect.
    /// A non-positive tolerance behaves like [`VertexKeyMode::Exact`], as do
    /// points whose grid index would overflow `i64`.
    Snapped { tolerance: f64 },
}

/// Parameters controlling layer merging.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeParams {
    pub vertex_key: VertexKeyMode,
}

/// Ordered vertex chain reconstructed from the lines of one layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedPolyline {
    pub layer: String,
    pub vertices: Vec<Point2>,
}

impl MergedPolyline {
    /// Number of straight pieces in the chain.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// Returns `true` if the walk ended where it started.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.vertices.len() > 2 && self.vertices.first() == self.vertices.last()
    }
}

/// Walks the line entities of one layer into a single polyline.
///
/// The walk starts at the first vertex with exactly one neighbour, or at the
/// first endpoint of the first matching line when every vertex is shared by
/// two or more lines. At each vertex it follows the first unvisited edge in
/// insertion order until none is left.
///
/// Branching topologies (vertex degree > 2) are not resolved: the result
/// depends on input order and may leave edges unvisited.
#[derive(Debug)]
pub struct MergeLayer<'a> {
    entities: &'a [LineEntity],
    layer: &'a str,
    params: MergeParams,
}

impl<'a> MergeLayer<'a> {
    /// Creates a new merge operation for `layer`.
    #[must_use]
    pub fn new(entities: &'a [LineEntity], layer: &'a str, params: MergeParams) -> Self {
        Self {
            entities,
            layer,
            params,
        }
    }

    /// Executes the merge.
    ///
    /// # Errors
    ///
    /// Returns `MergeError::EmptyLayerSelection` if no line entity is placed
    /// on the target layer.
    pub fn execute(&self) -> Result<MergedPolyline> {
        let mode = self.params.vertex_key;
        let mut graph = AdjacencyGraph::default();
        let mut edges = HashSet::new();
        let mut seed = None;

        for entity in self
            .entities
            .iter()
            .filter(|e| e.is_line() && e.layer == self.layer)
        {
            let a = VertexKey::new(&entity.start, mode);
            let b = VertexKey::new(&entity.end, mode);
            graph.add_edge((a, entity.start), (b, entity.end));
            edges.insert(edge_id(a, b));
            seed.get_or_insert(a);
        }

        let Some(fallback) = seed else {
            return Err(MergeError::EmptyLayerSelection {
                layer: self.layer.to_owned(),
            }
            .into());
        };
        let start = graph.first_endpoint().unwrap_or(fallback);

        let mut visited = HashSet::new();
        let mut vertices: Vec<Point2> = graph.position(start).into_iter().collect();
        let mut current = start;
        while let Some(next) = graph
            .neighbors(current)
            .iter()
            .copied()
            .find(|&n| !visited.contains(&edge_id(current, n)))
        {
            visited.insert(edge_id(current, next));
            vertices.extend(graph.position(next));
            current = next;
        }

        debug!(
            layer = self.layer,
            vertices = graph.vertex_count(),
            edges = edges.len(),
            walked = visited.len(),
            "merged layer"
        );
        if visited.len() < edges.len() {
            warn!(
                layer = self.layer,
                unvisited = edges.len() - visited.len(),
                "polyline walk left edges unvisited"
            );
        }

        Ok(MergedPolyline {
            layer: self.layer.to_owned(),
            vertices,
        })
    }
}

/// Merges the line entities on `layer` into one polyline.
///
/// # Errors
///
/// See [`MergeLayer::execute`].
pub fn merge_layer(
    entities: &[LineEntity],
    layer: &str,
    params: &MergeParams,
) -> Result<MergedPolyline> {
    MergeLayer::new(entities, layer, *params).execute()
}
