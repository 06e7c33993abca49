use rand::Rng;
use crate::error::{Result, SkeleratorError};
use crate::math::Point;
use super::{check_dimension, to_point, Rasterizer};

/// All `3^D - 1` unit offsets, in lexicographic order of `(-1, 0, 1)` per axis
pub fn neighbour_offsets<const D: usize>() -> Vec<[i64; D]> {
    let total = 3usize.pow(D as u32);
    (0..total)
        .map(|mut n| {
            let mut offset = [0i64; D];
            for d in (0..D).rev() {
                offset[d] = (n % 3) as i64 - 1;
                n /= 3;
            }
            offset
        })
        .filter(|o| o.iter().any(|&c| c != 0))
        .collect()
}

fn distance_squared<const D: usize>(a: &[i64; D], b: &[i64; D]) -> i64 {
    (0..D).map(|d| (a[d] - b[d]) * (a[d] - b[d])).sum()
}

/// Walk from `start` to `end` taking uniformly random unit moves among
/// those that strictly shrink the Euclidean distance to `end`.
///
/// The squared distance drops by at least one per step, so the walk ends
/// after at most `|end - start|^2` moves.
pub fn random_walk<const D: usize, R: Rng + ?Sized>(
    start: [i64; D],
    end: [i64; D],
    rng: &mut R,
) -> Result<Vec<[i64; D]>> {
    check_dimension::<D>()?;
    let offsets = neighbour_offsets::<D>();
    let mut line = vec![start];
    let mut p = start;

    while p != end {
        let current = distance_squared(&p, &end);
        let moves: Vec<[i64; D]> = offsets
            .iter()
            .map(|o| {
                let mut next = p;
                for d in 0..D {
                    next[d] += o[d];
                }
                next
            })
            .filter(|next| distance_squared(next, &end) < current)
            .collect();

        if moves.is_empty() {
            return Err(SkeleratorError::NoProgress {
                position: to_point(&p),
                target: to_point(&end),
            });
        }

        p = moves[rng.gen_range(0..moves.len())];
        line.push(p);
    }

    Ok(line)
}

/// Stochastic rasterizer; only valid for unit scaling
pub struct ConstrainedRandomWalk<'a, R: Rng + ?Sized> {
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> ConstrainedRandomWalk<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + ?Sized> Rasterizer for ConstrainedRandomWalk<'_, R> {
    fn rasterize(&mut self, start: Point, end: Point) -> Result<Vec<Point>> {
        let line = random_walk(start.to_array(), end.to_array(), &mut *self.rng)?;
        Ok(line.into_iter().map(Point::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_offset_counts() {
        assert_eq!(neighbour_offsets::<2>().len(), 8);
        assert_eq!(neighbour_offsets::<3>().len(), 26);
        assert_eq!(neighbour_offsets::<3>()[0], [-1, -1, -1]);
        assert!(!neighbour_offsets::<3>().contains(&[0, 0, 0]));
    }

    #[test]
    fn test_walk_endpoints_over_many_seeds() {
        for seed in 0..200u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let start = [
                rng.gen_range(0..20i64),
                rng.gen_range(0..20i64),
                rng.gen_range(0..20i64),
            ];
            let mut end = [
                rng.gen_range(0..20i64),
                rng.gen_range(0..20i64),
                rng.gen_range(0..20i64),
            ];
            if end == start {
                end[0] += 1;
            }

            let line = random_walk(start, end, &mut rng).unwrap();
            assert_eq!(line[0], start);
            assert_eq!(*line.last().unwrap(), end);
            assert!(line.len() as i64 - 1 <= distance_squared(&start, &end));
            for pair in line.windows(2) {
                assert_ne!(pair[0], pair[1]);
                assert!((0..3).all(|d| (pair[0][d] - pair[1][d]).abs() <= 1));
                assert!(distance_squared(&pair[1], &end) < distance_squared(&pair[0], &end));
            }
        }
    }

    #[test]
    fn test_walk_is_at_least_chebyshev_long() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let line = random_walk([0, 0, 0], [9, 4, -2], &mut rng).unwrap();
            assert!(line.len() >= 10);
        }
    }

    #[test]
    fn test_walk_in_two_dimensions() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let line = random_walk([0, 0], [6, -3], &mut rng).unwrap();
            assert_eq!(line[0], [0, 0]);
            assert_eq!(*line.last().unwrap(), [6, -3]);
        }
    }

    #[test]
    fn test_same_endpoints_yield_single_point() {
        let mut rng = StdRng::seed_from_u64(1);
        let line = random_walk([2, 2, 2], [2, 2, 2], &mut rng).unwrap();
        assert_eq!(line, vec![[2, 2, 2]]);
    }

    #[test]
    fn test_deterministic_with_seed() {
        let a = random_walk([0, 0, 0], [10, 10, 3], &mut StdRng::seed_from_u64(9)).unwrap();
        let b = random_walk([0, 0, 0], [10, 10, 3], &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rasterizer_trait() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut walk = ConstrainedRandomWalk::new(&mut rng);
        let line = walk.rasterize(Point::new(1, 1, 1), Point::new(5, 1, 1)).unwrap();
        assert_eq!(line[0], Point::new(1, 1, 1));
        assert_eq!(*line.last().unwrap(), Point::new(5, 1, 1));
    }

    #[test]
    fn test_rejects_other_dimensions() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            random_walk([0, 0, 0, 0], [3, 1, 2, 0], &mut rng),
            Err(SkeleratorError::InvalidInput(_))
        ));
        assert!(random_walk([0], [4], &mut rng).is_err());
    }
}
