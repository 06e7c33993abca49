//! Volumetric neurons
//!
//! A neuron is a skeleton plus a per-vertex radius. Neighbouring radii
//! differ by at most one, which keeps the rendered shape smooth.

mod radius;
mod shape;

pub use radius::{grow_radius, RadiusField, RadiusRange};
pub use shape::{bounding_box, draw_spheres, minimal_canvas, render_volume, Neuron};
