use log::{debug, warn};
use ndarray::Array3;
use rand::Rng;
use crate::error::Result;
use crate::graph::{PositionedGraph, VertexId, VoxelGraph};
use crate::math::Point;
use crate::skeleton::Skeleton;
use super::radius::{grow_radius, RadiusField, RadiusRange};

/// Vertex bounds grown by `max_radius + 1` on every side
pub fn bounding_box<G: PositionedGraph + ?Sized>(graph: &G, max_radius: u32) -> Option<(Point, Point)> {
    let mut vertices = graph.vertices();
    let first = graph.position(vertices.next()?);
    let (lo, hi) = vertices.fold((first, first), |(lo, hi), v| {
        let p = graph.position(v);
        (lo.component_min(&p), hi.component_max(&p))
    });

    let pad = max_radius as i64 + 1;
    let pad = Point::new(pad, pad, pad);
    Some((lo - pad, hi + pad))
}

/// Union of solid spheres, one per vertex, written into a `[z, y, x]` canvas.
///
/// Returns the number of sphere voxels that fell outside the canvas.
pub fn draw_spheres<G: PositionedGraph + ?Sized>(
    graph: &G,
    radii: &RadiusField,
    canvas: &mut Array3<bool>,
    offset: Point,
) -> usize {
    let shape = canvas.shape().to_vec();
    let mut clipped = 0;

    for v in graph.vertices() {
        let r = radii.get(v) as i64;
        let center = graph.position(v) + offset;
        for dz in -r..=r {
            for dy in -r..=r {
                for dx in -r..=r {
                    if dx * dx + dy * dy + dz * dz > r * r {
                        continue;
                    }
                    match (center + Point::new(dx, dy, dz)).to_index(&shape) {
                        Some(idx) => canvas[idx] = true,
                        None => clipped += 1,
                    }
                }
            }
        }
    }

    if clipped > 0 {
        warn!("{} neuron voxels fell outside canvas {:?}", clipped, shape);
    }
    clipped
}

/// Smallest canvas holding every sphere, with the offset that maps vertex
/// positions onto zero-based indices
pub fn minimal_canvas<G: PositionedGraph + ?Sized>(graph: &G, max_radius: u32) -> (Array3<bool>, Point) {
    match bounding_box(graph, max_radius) {
        Some((lo, hi)) => {
            let extent = hi - lo + Point::ONE;
            let canvas = Array3::from_elem(
                (extent.z as usize, extent.y as usize, extent.x as usize),
                false,
            );
            (canvas, -lo)
        }
        None => (Array3::from_elem((0, 0, 0), false), Point::ZERO),
    }
}

/// Render the neuron volume described by a graph and its radius field
pub fn render_volume<G: PositionedGraph + ?Sized>(graph: &G, radii: &RadiusField) -> (Array3<bool>, Point) {
    let (mut canvas, offset) = minimal_canvas(graph, radii.range().max);
    draw_spheres(graph, radii, &mut canvas, offset);
    (canvas, offset)
}

/// A skeleton together with a smooth radius field
#[derive(Debug, Clone)]
pub struct Neuron {
    skeleton: Skeleton,
    root: VertexId,
    radii: RadiusField,
}

impl Neuron {
    /// Grow radii from the skeleton's first root node
    pub fn new<R: Rng + ?Sized>(skeleton: Skeleton, min_radius: u32, max_radius: u32, rng: &mut R) -> Result<Self> {
        let range = RadiusRange::new(min_radius, max_radius)?;
        let root = skeleton.root_nodes()?[0];
        Self::with_root(skeleton, root, range, rng)
    }

    pub fn with_root<R: Rng + ?Sized>(skeleton: Skeleton, root: VertexId, range: RadiusRange, rng: &mut R) -> Result<Self> {
        let radii = grow_radius(&skeleton, root, range, rng)?;
        Ok(Self { skeleton, root, radii })
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn root(&self) -> VertexId {
        self.root
    }

    pub fn radius(&self, v: VertexId) -> u32 {
        self.radii.get(v)
    }

    pub fn radii(&self) -> &RadiusField {
        &self.radii
    }

    pub fn bounding_box(&self) -> Option<(Point, Point)> {
        bounding_box(self, self.radii.range().max)
    }

    pub fn minimal_canvas(&self) -> (Array3<bool>, Point) {
        minimal_canvas(self, self.radii.range().max)
    }

    pub fn draw(&self, canvas: &mut Array3<bool>, offset: Point) -> usize {
        debug!("drawing neuron");
        draw_spheres(self, &self.radii, canvas, offset)
    }

    pub fn render_volume(&self) -> (Array3<bool>, Point) {
        render_volume(self, &self.radii)
    }
}

impl PositionedGraph for Neuron {
    fn graph(&self) -> &VoxelGraph {
        self.skeleton.graph()
    }
}
