use rand::Rng;
use crate::error::{Result, SkeleratorError};
use super::point::Point;

/// Draw `n` random grid points with each axis uniform in `[0, shape[d] - margin)`.
///
/// `shape` is given in `(x, y, z)` order. Duplicates are allowed; the tree
/// builder removes them.
pub fn sample_points<R: Rng + ?Sized>(
    rng: &mut R,
    shape: [usize; 3],
    n: usize,
    margin: usize,
) -> Result<Vec<Point>> {
    if let Some(d) = (0..3).find(|&d| shape[d] <= margin) {
        return Err(SkeleratorError::InvalidInput(format!(
            "axis {} has extent {} which leaves no room inside margin {}",
            d, shape[d], margin
        )));
    }

    let upper = [
        (shape[0] - margin) as i64,
        (shape[1] - margin) as i64,
        (shape[2] - margin) as i64,
    ];

    Ok((0..n)
        .map(|_| Point::new(
            rng.gen_range(0..upper[0]),
            rng.gen_range(0..upper[1]),
            rng.gen_range(0..upper[2]),
        ))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_samples_stay_inside_margin() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = sample_points(&mut rng, [30, 20, 15], 500, 10).unwrap();
        assert_eq!(points.len(), 500);
        for p in &points {
            assert!(p.x >= 0 && p.x < 20);
            assert!(p.y >= 0 && p.y < 10);
            assert!(p.z >= 0 && p.z < 5);
        }
    }

    #[test]
    fn test_shape_smaller_than_margin() {
        let mut rng = StdRng::seed_from_u64(7);
        let result = sample_points(&mut rng, [30, 10, 30], 5, 10);
        assert!(matches!(result, Err(SkeleratorError::InvalidInput(_))));
    }

    #[test]
    fn test_deterministic_with_seed() {
        let a = sample_points(&mut StdRng::seed_from_u64(3), [50, 50, 50], 10, 10).unwrap();
        let b = sample_points(&mut StdRng::seed_from_u64(3), [50, 50, 50], 10, 10).unwrap();
        assert_eq!(a, b);
    }
}
