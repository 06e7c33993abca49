use log::{debug, warn};
use ndarray::Array3;
use crate::graph::PositionedGraph;
use crate::math::Point;
use super::builder::Skeleton;

impl Skeleton {
    /// Write `label` at every vertex position shifted by `offset`.
    ///
    /// The canvas is indexed `[z, y, x]`. Points falling outside it are
    /// skipped and reported; the return value is how many were clipped.
    pub fn draw<T: Clone>(&self, canvas: &mut Array3<T>, offset: Point, label: T) -> usize {
        debug!("drawing skeleton with {} vertices", self.vertex_count());
        let shape = canvas.shape().to_vec();
        let mut clipped = 0;

        for v in self.vertices() {
            match (self.position(v) + offset).to_index(&shape) {
                Some(idx) => canvas[idx] = label.clone(),
                None => clipped += 1,
            }
        }

        if clipped > 0 {
            warn!(
                "canvas {:?} is too small to draw all skeleton points: {} of {} clipped",
                shape,
                clipped,
                self.vertex_count()
            );
        }
        clipped
    }
}
