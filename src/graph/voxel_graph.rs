use std::collections::VecDeque;
use std::ops::Range;
use crate::error::{Result, SkeleratorError};
use crate::math::Point;
use super::export::NodeEdgeDocument;

/// Index of a vertex inside a [`VoxelGraph`]
pub type VertexId = usize;

/// Undirected edge; `source`/`target` only record insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub id: usize,
    pub source: VertexId,
    pub target: VertexId,
}

impl Edge {
    /// The endpoint that is not `v`
    pub fn other(&self, v: VertexId) -> VertexId {
        if self.source == v { self.target } else { self.source }
    }
}

/// Undirected graph whose vertices carry a grid position.
///
/// Vertices and edges are append-only; ids are dense and stable.
#[derive(Debug, Clone, Default)]
pub struct VoxelGraph {
    positions: Vec<Point>,
    edges: Vec<Edge>,
    incidence: Vec<Vec<usize>>,
}

impl VoxelGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vertices(positions: Vec<Point>) -> Self {
        let incidence = vec![Vec::new(); positions.len()];
        Self { positions, edges: Vec::new(), incidence }
    }

    pub fn add_vertex(&mut self, position: Point) -> VertexId {
        self.positions.push(position);
        self.incidence.push(Vec::new());
        self.positions.len() - 1
    }

    /// Connect two existing vertices and return the new edge id
    pub fn add_edge(&mut self, source: VertexId, target: VertexId) -> usize {
        debug_assert!(source < self.positions.len() && target < self.positions.len());
        let id = self.edges.len();
        self.edges.push(Edge { id, source, target });
        self.incidence[source].push(id);
        if target != source {
            self.incidence[target].push(id);
        }
        id
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn vertices(&self) -> Range<VertexId> {
        0..self.positions.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn position(&self, v: VertexId) -> Point {
        self.positions[v]
    }

    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    pub fn degree(&self, v: VertexId) -> usize {
        self.incidence[v].len()
    }

    /// Edges touching `v`, ordered by neighbour id then edge id so that
    /// branch order is stable for a fixed seed
    pub fn incident_edges(&self, v: VertexId) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self.incidence[v].iter().map(|&e| self.edges[e]).collect();
        edges.sort_by_key(|e| (e.other(v), e.id));
        edges
    }

    pub fn neighbors(&self, v: VertexId) -> Vec<VertexId> {
        let mut nbs: Vec<VertexId> = self.incidence[v]
            .iter()
            .map(|&e| self.edges[e].other(v))
            .collect();
        nbs.sort_unstable();
        nbs.dedup();
        nbs
    }

    pub fn edge_between(&self, u: VertexId, v: VertexId) -> Result<Edge> {
        if u >= self.positions.len() {
            return Err(SkeleratorError::EdgeNotFound { from: u, to: v });
        }
        self.incidence[u]
            .iter()
            .map(|&e| self.edges[e])
            .find(|e| e.other(u) == v)
            .ok_or(SkeleratorError::EdgeNotFound { from: u, to: v })
    }

    /// All degree-1 vertices. A tree always has at least two.
    pub fn root_nodes(&self) -> Result<Vec<VertexId>> {
        let roots: Vec<VertexId> = self.vertices().filter(|&v| self.degree(v) == 1).collect();
        if roots.len() < 2 {
            return Err(SkeleratorError::DegenerateTree { roots: roots.len() });
        }
        Ok(roots)
    }

    /// Number of vertices reachable from vertex 0
    fn reachable_from_first(&self) -> usize {
        if self.positions.is_empty() {
            return 0;
        }
        let mut seen = vec![false; self.positions.len()];
        let mut queue = VecDeque::from([0]);
        seen[0] = true;
        let mut count = 1;
        while let Some(u) = queue.pop_front() {
            for v in self.neighbors(u) {
                if !seen[v] {
                    seen[v] = true;
                    count += 1;
                    queue.push_back(v);
                }
            }
        }
        count
    }

    pub fn is_connected(&self) -> bool {
        self.reachable_from_first() == self.positions.len()
    }

    /// Connected with exactly `n - 1` edges
    pub fn is_tree(&self) -> bool {
        !self.positions.is_empty()
            && self.edges.len() + 1 == self.positions.len()
            && self.is_connected()
    }
}

/// Shared read-only surface of trees, skeletons and neurons.
///
/// Implementors only expose the graph they own; everything else is
/// provided on top of it.
pub trait PositionedGraph {
    fn graph(&self) -> &VoxelGraph;

    fn vertex_count(&self) -> usize {
        self.graph().vertex_count()
    }

    fn edge_count(&self) -> usize {
        self.graph().edge_count()
    }

    fn vertices(&self) -> Range<VertexId> {
        self.graph().vertices()
    }

    fn edges(&self) -> &[Edge] {
        self.graph().edges()
    }

    fn position(&self, v: VertexId) -> Point {
        self.graph().position(v)
    }

    fn neighbors(&self, v: VertexId) -> Vec<VertexId> {
        self.graph().neighbors(v)
    }

    fn incident_edges(&self, v: VertexId) -> Vec<Edge> {
        self.graph().incident_edges(v)
    }

    fn edge_between(&self, u: VertexId, v: VertexId) -> Result<Edge> {
        self.graph().edge_between(u, v)
    }

    fn root_nodes(&self) -> Result<Vec<VertexId>> {
        self.graph().root_nodes()
    }

    /// Node/edge annotation for external skeleton viewers
    fn to_document(&self) -> NodeEdgeDocument {
        NodeEdgeDocument::from_graph(self.graph())
    }
}
