use ndarray::{Array3, Axis, Zip};
use rand::Rng;
use rand_distr::StandardNormal;

/// Reflect an out-of-range index back into `0..n` (`d c b a | a b c d`)
fn reflect(mut i: isize, n: usize) -> usize {
    let n = n as isize;
    loop {
        if i < 0 {
            i = -i - 1;
        } else if i >= n {
            i = 2 * n - i - 1;
        } else {
            return i as usize;
        }
    }
}

/// Absolute value of standard normal noise, one sample per voxel
pub fn abs_normal_noise<R: Rng + ?Sized>(rng: &mut R, shape: (usize, usize, usize)) -> Array3<f32> {
    Array3::from_shape_simple_fn(shape, || rng.sample::<f64, _>(StandardNormal).abs() as f32)
}

/// Normalized 1D Gaussian weights truncated at four standard deviations
pub fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (4.0 * sigma + 0.5) as isize;
    let weights: Vec<f64> = (-radius..=radius)
        .map(|x| (-0.5 * (x * x) as f64 / (sigma * sigma)).exp())
        .collect();
    let sum: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / sum).collect()
}

/// Separable Gaussian blur with reflecting borders
pub fn gaussian_filter(volume: &Array3<f32>, sigma: f64) -> Array3<f32> {
    let mut out = volume.mapv(|v| v as f64);
    if sigma <= 0.0 {
        return out.mapv(|v| v as f32);
    }

    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as isize;

    for axis in 0..3 {
        for mut lane in out.lanes_mut(Axis(axis)) {
            let src: Vec<f64> = lane.to_vec();
            let n = src.len();
            for (i, dst) in lane.iter_mut().enumerate() {
                *dst = kernel
                    .iter()
                    .enumerate()
                    .map(|(k, w)| w * src[reflect(i as isize + k as isize - radius, n)])
                    .sum();
            }
        }
    }

    out.mapv(|v| v as f32)
}

/// Maximum over a `size`-wide window per axis, covering offsets
/// `-(size / 2) ..= (size - 1) / 2`
pub fn maximum_filter(labels: &Array3<u64>, size: usize) -> Array3<u64> {
    let mut out = labels.clone();
    if size <= 1 {
        return out;
    }
    let before = (size / 2) as isize;
    let after = ((size - 1) / 2) as isize;

    for axis in 0..3 {
        for mut lane in out.lanes_mut(Axis(axis)) {
            let src: Vec<u64> = lane.to_vec();
            let n = src.len() as isize;
            for (i, dst) in lane.iter_mut().enumerate() {
                let i = i as isize;
                let lo = (i - before).max(0) as usize;
                let hi = (i + after).min(n - 1) as usize;
                *dst = src[lo..=hi].iter().copied().max().unwrap_or(0);
            }
        }
    }
    out
}

/// Zero every seed voxel that is not the window maximum, separating
/// touching objects
pub fn suppress_non_maxima(seeds: &mut Array3<u64>, size: usize) {
    let maxima = maximum_filter(seeds, size);
    Zip::from(seeds).and(&maxima).for_each(|s, &m| {
        if *s != m {
            *s = 0;
        }
    });
}
