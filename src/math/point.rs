use std::fmt;
use std::ops::{Add, Sub, Mul, Neg};
use serde::{Serialize, Deserialize};

/// Integer grid coordinate on the voxel lattice.
///
/// Ordering is lexicographic over `(x, y, z)`, which is the order unique
/// point sets are kept in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0, z: 0 };
    pub const ONE: Point = Point { x: 1, y: 1, z: 1 };

    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(&self) -> [i64; 3] {
        [self.x, self.y, self.z]
    }

    /// Component-wise product, used for anisotropic voxel scaling
    pub fn scale_by(&self, scaling: &Point) -> Self {
        Self {
            x: self.x * scaling.x,
            y: self.y * scaling.y,
            z: self.z * scaling.z,
        }
    }

    pub fn component_min(&self, other: &Self) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
            z: self.z.min(other.z),
        }
    }

    pub fn component_max(&self, other: &Self) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
            z: self.z.max(other.z),
        }
    }

    /// Squared Euclidean distance, exact in integer arithmetic
    pub fn distance_squared(&self, other: &Self) -> i64 {
        let d = *self - *other;
        d.x * d.x + d.y * d.y + d.z * d.z
    }

    pub fn distance(&self, other: &Self) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }

    /// Canvas index in `[z, y, x]` order, or `None` when outside `shape`
    pub fn to_index(&self, shape: &[usize]) -> Option<[usize; 3]> {
        let idx = [self.z, self.y, self.x];
        let mut out = [0usize; 3];
        for d in 0..3 {
            if idx[d] < 0 || idx[d] as usize >= shape[d] {
                return None;
            }
            out[d] = idx[d] as usize;
        }
        Some(out)
    }
}

impl From<[i64; 3]> for Point {
    fn from(a: [i64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl From<Point> for [i64; 3] {
    fn from(p: Point) -> Self {
        p.to_array()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<i64> for Point {
    type Output = Self;
    fn mul(self, scalar: i64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl Neg for Point {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_ops() {
        let a = Point::new(1, 2, 3);
        let b = Point::new(4, 5, 6);

        assert_eq!(a + b, Point::new(5, 7, 9));
        assert_eq!(b - a, Point::new(3, 3, 3));
        assert_eq!(a * 2, Point::new(2, 4, 6));
        assert_eq!(-a, Point::new(-1, -2, -3));
    }

    #[test]
    fn test_scale_by() {
        let p = Point::new(1, 2, 3);
        assert_eq!(p.scale_by(&Point::new(2, 1, 3)), Point::new(2, 2, 9));
        assert_eq!(p.scale_by(&Point::ONE), p);
    }

    #[test]
    fn test_distance() {
        let a = Point::ZERO;
        let b = Point::new(3, 4, 0);
        assert_eq!(a.distance_squared(&b), 25);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut pts = vec![Point::new(1, 0, 0), Point::new(0, 5, 5), Point::new(0, 5, 1)];
        pts.sort();
        assert_eq!(pts, vec![Point::new(0, 5, 1), Point::new(0, 5, 5), Point::new(1, 0, 0)]);
    }

    #[test]
    fn test_to_index_is_zyx() {
        let p = Point::new(1, 2, 3);
        assert_eq!(p.to_index(&[4, 4, 4]), Some([3, 2, 1]));
        assert_eq!(p.to_index(&[3, 4, 4]), None);
        assert_eq!(Point::new(-1, 0, 0).to_index(&[4, 4, 4]), None);
    }

    #[test]
    fn test_min_max() {
        let a = Point::new(1, 5, -2);
        let b = Point::new(3, 0, 4);
        assert_eq!(a.component_min(&b), Point::new(1, 0, -2));
        assert_eq!(a.component_max(&b), Point::new(3, 5, 4));
    }
}
