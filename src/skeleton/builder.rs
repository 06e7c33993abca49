use std::collections::BTreeSet;
use log::debug;
use rand::Rng;
use crate::error::{Result, SkeleratorError};
use crate::graph::{PositionedGraph, VoxelGraph};
use crate::growth::Tree;
use crate::math::Point;
use crate::raster::{ConstrainedRandomWalk, Dda3, Interpolation, RasterLine, Rasterizer};

/// Voxel-resolution graph obtained by rasterizing every tree edge.
///
/// Vertices `0..tree.vertex_count()` are the tree vertices (scaled), in tree
/// order. Every other vertex is an interior raster point threaded as a
/// degree-2 path between the two tree vertices of its edge, so the skeleton
/// stays a tree and keeps the tree's leaves.
#[derive(Debug, Clone)]
pub struct Skeleton {
    tree: Tree,
    scaling: Point,
    graph: VoxelGraph,
    lines: Vec<RasterLine>,
    points: Vec<Point>,
}

impl Skeleton {
    pub fn new<R: Rng + ?Sized>(
        tree: Tree,
        scaling: Point,
        interpolation: Interpolation,
        rng: &mut R,
    ) -> Result<Self> {
        if scaling.to_array().iter().any(|&s| s <= 0) {
            return Err(SkeleratorError::InvalidInput(format!(
                "scaling must be positive on every axis, got {}",
                scaling
            )));
        }
        if interpolation == Interpolation::Random && scaling != Point::ONE {
            return Err(SkeleratorError::UnsupportedConfiguration(format!(
                "random interpolation does not support scaling {}",
                scaling
            )));
        }

        debug!("interpolating {} edges ({:?})", tree.edge_count(), interpolation);
        let lines = {
            let mut rasterizer: Box<dyn Rasterizer + '_> = match interpolation {
                Interpolation::Linear => Box::new(Dda3::new(scaling)),
                Interpolation::Random => Box::new(ConstrainedRandomWalk::new(rng)),
            };
            tree.edges()
                .iter()
                .map(|e| rasterizer.rasterize(tree.position(e.source), tree.position(e.target)))
                .collect::<Result<Vec<RasterLine>>>()?
        };

        let points: Vec<Point> = lines
            .iter()
            .flatten()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let graph = Self::to_graph(&tree, scaling, &lines)?;

        Ok(Self { tree, scaling, graph, lines, points })
    }

    fn to_graph(tree: &Tree, scaling: Point, lines: &[RasterLine]) -> Result<VoxelGraph> {
        debug!("initializing skeleton graph");
        // Tree vertices first so their ids carry over
        let anchors: Vec<Point> = tree.points().iter().map(|p| p.scale_by(&scaling)).collect();
        let mut graph = VoxelGraph::with_vertices(anchors);

        for (edge, line) in tree.edges().iter().zip(lines) {
            let (first, last) = match (line.first(), line.last()) {
                (Some(&first), Some(&last)) => (first, last),
                _ => {
                    return Err(SkeleratorError::InvalidInput(format!(
                        "empty raster line for edge ({}, {})",
                        edge.source, edge.target
                    )))
                }
            };
            for (expected, actual) in [(graph.position(edge.source), first), (graph.position(edge.target), last)] {
                if expected != actual {
                    return Err(SkeleratorError::EndpointMismatch { expected, actual });
                }
            }

            let mut previous = edge.source;
            for &p in &line[1..line.len() - 1] {
                let v = graph.add_vertex(p);
                graph.add_edge(previous, v);
                previous = v;
            }
            graph.add_edge(previous, edge.target);
        }

        Ok(graph)
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn scaling(&self) -> Point {
        self.scaling
    }

    /// Sorted unique positions of all rasterized points
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Raster line of the tree edge with id `edge`
    pub fn line(&self, edge: usize) -> Option<&[Point]> {
        self.lines.get(edge).map(|l| l.as_slice())
    }
}

impl PositionedGraph for Skeleton {
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

    fn random_tree(rng: &mut StdRng, n: usize) -> Tree {
        loop {
            let points = sample_points(rng, [40, 40, 40], n, 10).unwrap();
            if let Ok(tree) = Tree::new(&points) {
                return tree;
            }
        }
    }

    #[test]
    fn test_single_edge_linear() {
        let mut rng = StdRng::seed_from_u64(0);
        let tree = Tree::new(&[Point::new(0, 0, 0), Point::new(4, 0, 0)]).unwrap();
        let skeleton = Skeleton::new(tree, Point::ONE, Interpolation::Linear, &mut rng).unwrap();

        assert_eq!(skeleton.vertex_count(), 5);
        assert_eq!(skeleton.edge_count(), 4);
        assert_eq!(skeleton.root_nodes().unwrap(), vec![0, 1]);
        assert_eq!(skeleton.line(0).unwrap().len(), 5);
    }

    #[test]
    fn test_skeleton_is_tree_and_contains_tree_points() {
        for (seed, mode) in (0..40u64).zip([Interpolation::Linear, Interpolation::Random].iter().cycle()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let tree = random_tree(&mut rng, 8);
            let tree_points = tree.points().to_vec();
            let skeleton = Skeleton::new(tree, Point::ONE, *mode, &mut rng).unwrap();

            assert!(skeleton.graph().is_tree());
            let point_set: BTreeSet<_> = skeleton.points().iter().copied().collect();
            for p in &tree_points {
                assert!(point_set.contains(p));
            }
            for v in skeleton.vertices() {
                assert!(point_set.contains(&skeleton.position(v)));
            }
        }
    }

    #[test]
    fn test_root_sets_match_tree() {
        for (seed, mode) in (0..200u64).zip([Interpolation::Linear, Interpolation::Random].iter().cycle()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let tree = random_tree(&mut rng, 10);
            let tree_roots: BTreeSet<Point> = tree
                .root_nodes()
                .unwrap()
                .into_iter()
                .map(|v| tree.position(v))
                .collect();

            let skeleton = Skeleton::new(tree, Point::ONE, *mode, &mut rng).unwrap();
            let skeleton_roots: BTreeSet<Point> = skeleton
                .root_nodes()
                .unwrap()
                .into_iter()
                .map(|v| skeleton.position(v))
                .collect();

            assert_eq!(tree_roots, skeleton_roots);
        }
    }

    #[test]
    fn test_tree_vertices_keep_their_degree() {
        let mut rng = StdRng::seed_from_u64(17);
        let tree = random_tree(&mut rng, 12);
        let degrees: Vec<usize> = tree.vertices().map(|v| tree.degree(v)).collect();
        let skeleton = Skeleton::new(tree, Point::ONE, Interpolation::Random, &mut rng).unwrap();

        for (v, degree) in degrees.iter().enumerate() {
            assert_eq!(skeleton.neighbors(v).len(), *degree);
        }
        for v in degrees.len()..skeleton.vertex_count() {
            assert_eq!(skeleton.neighbors(v).len(), 2);
        }
    }

    #[test]
    fn test_random_with_scaling_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let tree = Tree::new(&[Point::new(0, 0, 0), Point::new(4, 0, 0)]).unwrap();
        let result = Skeleton::new(tree, Point::new(2, 1, 1), Interpolation::Random, &mut rng);
        assert!(matches!(result, Err(SkeleratorError::UnsupportedConfiguration(_))));
    }

    #[test]
    fn test_linear_with_scaling() {
        let mut rng = StdRng::seed_from_u64(0);
        let tree = Tree::new(&[Point::new(0, 0, 0), Point::new(2, 1, 0), Point::new(0, 3, 0)]).unwrap();
        let skeleton = Skeleton::new(tree, Point::new(2, 1, 1), Interpolation::Linear, &mut rng).unwrap();

        assert!(skeleton.graph().is_tree());
        assert_eq!(skeleton.position(2), Point::new(4, 1, 0));
        assert_eq!(skeleton.scaling(), Point::new(2, 1, 1));
    }

    #[test]
    fn test_non_positive_scaling_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let tree = Tree::new(&[Point::new(0, 0, 0), Point::new(4, 0, 0)]).unwrap();
        let result = Skeleton::new(tree, Point::new(1, 0, 1), Interpolation::Linear, &mut rng);
        assert!(matches!(result, Err(SkeleratorError::InvalidInput(_))));
    }
}
