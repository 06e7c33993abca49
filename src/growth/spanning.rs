use petgraph::algo::min_spanning_tree;
use petgraph::data::Element;
use petgraph::graph::UnGraph;
use crate::math::Point;

/// Spanning tree primitive used by the tree builder.
///
/// Given unique points, return `points.len() - 1` index pairs that connect
/// every point with minimum total Euclidean length.
pub trait SpanningTree {
    fn spanning_edges(&self, points: &[Point]) -> Vec<(usize, usize)>;
}

/// Minimum spanning tree over the complete Euclidean graph.
///
/// The Euclidean MST is contained in the Delaunay graph, so restricting the
/// candidate edges to Delaunay neighbours would give the same tree. The
/// complete graph has no degenerate cases for coplanar or collinear input.
///
/// Time and memory are quadratic in the point count: `n (n - 1) / 2` edges,
/// about 2e8 at 20k points. Suited to the handful of branch points sampled
/// per skeleton; large point sets need a Delaunay-backed [`SpanningTree`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanMst;

impl SpanningTree for EuclideanMst {
    fn spanning_edges(&self, points: &[Point]) -> Vec<(usize, usize)> {
        let n = points.len();
        let mut graph = UnGraph::<usize, f64>::with_capacity(n, n * n.saturating_sub(1) / 2);
        let nodes: Vec<_> = (0..n).map(|i| graph.add_node(i)).collect();

        for i in 0..n {
            for j in (i + 1)..n {
                graph.add_edge(nodes[i], nodes[j], points[i].distance(&points[j]));
            }
        }

        let mut edges: Vec<(usize, usize)> = min_spanning_tree(&graph)
            .filter_map(|element| match element {
                Element::Edge { source, target, .. } => Some((source.min(target), source.max(target))),
                Element::Node { .. } => None,
            })
            .collect();
        edges.sort_unstable();
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collinear_points_form_a_chain() {
        let points = vec![
            Point::new(0, 0, 0),
            Point::new(1, 0, 0),
            Point::new(3, 0, 0),
            Point::new(6, 0, 0),
        ];
        let edges = EuclideanMst.spanning_edges(&points);
        assert_eq!(edges, vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_picks_shortest_connections() {
        // Star: centre at 0, three arms; the far corner pairs must not be used
        let points = vec![
            Point::new(0, 0, 0),
            Point::new(5, 0, 0),
            Point::new(0, 5, 0),
            Point::new(0, 0, 5),
        ];
        let edges = EuclideanMst.spanning_edges(&points);
        assert_eq!(edges, vec![(0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn test_two_points() {
        let points = vec![Point::new(0, 0, 0), Point::new(2, 2, 2)];
        assert_eq!(EuclideanMst.spanning_edges(&points), vec![(0, 1)]);
    }

    #[test]
    fn test_hundreds_of_points() {
        // 300 points give 44850 candidate edges
        let points: Vec<Point> = (0..300i64).map(|i| Point::new(i % 10, (i / 10) % 10, i / 100)).collect();
        let edges = EuclideanMst.spanning_edges(&points);
        assert_eq!(edges.len(), points.len() - 1);
        // Grid neighbours are one apart, so every tree edge has unit length
        for (u, v) in edges {
            assert_eq!(points[u].distance_squared(&points[v]), 1);
        }
    }
}
