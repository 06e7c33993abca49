//! Edge rasterization
//!
//! Turns a pair of grid points into an ordered, 26-connected run of grid
//! points that starts and ends exactly at the given endpoints.

mod dda;
mod walk;

use serde::{Deserialize, Serialize};
use crate::error::{Result, SkeleratorError};
use crate::math::Point;

pub use dda::{dda_line, dda_round, Dda3};
pub use walk::{neighbour_offsets, random_walk, ConstrainedRandomWalk};

/// Ordered grid points from a source to a target, both inclusive
pub type RasterLine = Vec<Point>;

/// How tree edges are rasterized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Deterministic DDA line
    #[default]
    Linear,
    /// Constrained random walk
    Random,
}

/// Common contract of the line strategies
pub trait Rasterizer {
    fn rasterize(&mut self, start: Point, end: Point) -> Result<RasterLine>;
}

/// Lines are only drawn on 2D and 3D grids
pub(crate) fn check_dimension<const D: usize>() -> Result<()> {
    if D == 2 || D == 3 {
        Ok(())
    } else {
        Err(SkeleratorError::InvalidInput(format!(
            "lines need 2 or 3 dimensions, got {}",
            D
        )))
    }
}

/// Pad a 2D or 3D coordinate into a [`Point`]
pub(crate) fn to_point<const D: usize>(coords: &[i64; D]) -> Point {
    let mut xyz = [0i64; 3];
    for (dst, src) in xyz.iter_mut().zip(coords.iter()) {
        *dst = *src;
    }
    Point::from(xyz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_point_pads_2d() {
        assert_eq!(to_point(&[4, 5]), Point::new(4, 5, 0));
        assert_eq!(to_point(&[1, 2, 3]), Point::new(1, 2, 3));
    }

    #[test]
    fn test_only_two_and_three_dimensions() {
        assert!(check_dimension::<2>().is_ok());
        assert!(check_dimension::<3>().is_ok());
        assert!(matches!(check_dimension::<1>(), Err(SkeleratorError::InvalidInput(_))));
        assert!(check_dimension::<4>().is_err());
    }

    #[test]
    fn test_interpolation_serde_names() {
        let linear: Interpolation = serde_yaml::from_str("linear").unwrap();
        let random: Interpolation = serde_yaml::from_str("random").unwrap();
        assert_eq!(linear, Interpolation::Linear);
        assert_eq!(random, Interpolation::Random);
        assert!(serde_yaml::from_str::<Interpolation>("cubic").is_err());
    }
}
