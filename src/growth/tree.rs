use std::collections::BTreeSet;
use log::debug;
use crate::error::{Result, SkeleratorError};
use crate::graph::{PositionedGraph, VertexId, VoxelGraph};
use crate::math::Point;
use super::spanning::{EuclideanMst, SpanningTree};

/// Minimum spanning tree over a set of unique grid points.
///
/// Vertex `i` sits at the `i`-th point of the sorted unique input. The tree
/// is never modified after construction.
#[derive(Debug, Clone)]
pub struct Tree {
    graph: VoxelGraph,
}

impl Tree {
    /// Build a tree with the default Euclidean MST primitive
    pub fn new(points: &[Point]) -> Result<Self> {
        Self::with_spanning_tree(points, &EuclideanMst)
    }

    pub fn with_spanning_tree<S: SpanningTree + ?Sized>(points: &[Point], primitive: &S) -> Result<Self> {
        let unique: Vec<Point> = points.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        if unique.len() < 2 {
            return Err(SkeleratorError::InvalidInput(format!(
                "a tree needs at least 2 distinct points, got {} ({} before deduplication)",
                unique.len(),
                points.len()
            )));
        }

        debug!("generating tree over {} unique points", unique.len());
        let edges = primitive.spanning_edges(&unique);

        let n = unique.len();
        if edges.len() + 1 != n {
            return Err(SkeleratorError::InvalidInput(format!(
                "spanning tree primitive returned {} edges for {} points",
                edges.len(),
                n
            )));
        }

        let mut graph = VoxelGraph::with_vertices(unique);
        for &(u, v) in &edges {
            if u >= n || v >= n || u == v {
                return Err(SkeleratorError::InvalidInput(format!(
                    "spanning tree primitive returned invalid edge ({}, {})",
                    u, v
                )));
            }
            graph.add_edge(u, v);
        }

        if !graph.is_connected() {
            return Err(SkeleratorError::InvalidInput(
                "spanning tree primitive returned a disconnected edge set".to_string(),
            ));
        }

        Ok(Self { graph })
    }

    /// Sorted unique points, indexed by vertex id
    pub fn points(&self) -> &[Point] {
        self.graph.positions()
    }

    pub fn degree(&self, v: VertexId) -> usize {
        self.graph.degree(v)
    }
}

impl PositionedGraph for Tree {
    fn graph(&self) -> &VoxelGraph {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::sample_points;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tree_counts_for_random_points() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let points = sample_points(&mut rng, [30, 30, 30], 12, 10).unwrap();
            let unique: BTreeSet<_> = points.iter().copied().collect();
            if unique.len() < 2 {
                continue;
            }

            let tree = Tree::new(&points).unwrap();
            assert_eq!(tree.vertex_count(), unique.len());
            assert_eq!(tree.edge_count(), tree.vertex_count() - 1);
            assert!(tree.graph().is_tree());
            assert!(tree.vertices().all(|v| tree.degree(v) >= 1));
            assert!(tree.root_nodes().unwrap().len() >= 2);
        }
    }

    #[test]
    fn test_duplicates_are_removed() {
        let points = vec![
            Point::new(1, 1, 1),
            Point::new(5, 5, 5),
            Point::new(1, 1, 1),
            Point::new(5, 5, 5),
            Point::new(9, 0, 2),
        ];
        let tree = Tree::new(&points).unwrap();
        assert_eq!(tree.vertex_count(), 3);
        assert_eq!(tree.edge_count(), 2);
        assert_eq!(tree.points(), &[Point::new(1, 1, 1), Point::new(5, 5, 5), Point::new(9, 0, 2)]);
    }

    #[test]
    fn test_single_distinct_point_fails() {
        let points = vec![Point::new(3, 3, 3), Point::new(3, 3, 3)];
        assert!(matches!(Tree::new(&points), Err(SkeleratorError::InvalidInput(_))));
        assert!(Tree::new(&[]).is_err());
    }

    #[test]
    fn test_two_points_have_two_roots() {
        let tree = Tree::new(&[Point::new(0, 0, 0), Point::new(4, 0, 0)]).unwrap();
        assert_eq!(tree.root_nodes().unwrap(), vec![0, 1]);
        assert_eq!(tree.neighbors(0), vec![1]);
    }

    #[test]
    fn test_position_lookup() {
        let tree = Tree::new(&[Point::new(7, 0, 0), Point::new(0, 0, 3)]).unwrap();
        assert_eq!(tree.position(0), Point::new(0, 0, 3));
        assert_eq!(tree.position(1), Point::new(7, 0, 0));
    }

    struct BrokenPrimitive;

    impl SpanningTree for BrokenPrimitive {
        fn spanning_edges(&self, _points: &[Point]) -> Vec<(usize, usize)> {
            vec![(0, 1), (0, 1)]
        }
    }

    #[test]
    fn test_rejects_broken_primitive() {
        let points = vec![Point::new(0, 0, 0), Point::new(1, 0, 0), Point::new(2, 0, 0)];
        let result = Tree::with_spanning_tree(&points, &BrokenPrimitive);
        assert!(matches!(result, Err(SkeleratorError::InvalidInput(_))));
    }

    #[test]
    fn test_export_matches_vertices() {
        let tree = Tree::new(&[Point::new(0, 0, 0), Point::new(4, 0, 0), Point::new(4, 4, 0)]).unwrap();
        let doc = tree.to_document();
        assert_eq!(doc.nodes.len(), 3);
        assert_eq!(doc.edges.len(), 2);
        assert_eq!(doc.nodes[2].x, 4);
        assert_eq!(doc.nodes[2].y, 4);
    }
}
