pub mod spanning;
pub mod tree;

pub use spanning::{EuclideanMst, SpanningTree};
pub use tree::Tree;
