pub mod point;
pub mod sampling;

pub use point::Point;
pub use sampling::sample_points;
