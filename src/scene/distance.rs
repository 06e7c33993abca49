use ndarray::{Array3, Axis};

/// Stand-in for infinity that keeps the parabola arithmetic finite
const FAR: f64 = 1e20;

/// One pass of the lower-envelope squared distance transform
/// (Felzenszwalb & Huttenlocher) over a single lane.
fn squared_distance_1d(f: &[f64], out: &mut [f64]) {
    let n = f.len();
    if n == 0 {
        return;
    }
    let mut v = vec![0usize; n];
    let mut z = vec![0f64; n + 1];
    let mut k = 0usize;
    z[0] = f64::NEG_INFINITY;
    z[1] = f64::INFINITY;

    let intersect = |q: usize, p: usize| {
        let (qf, pf) = (q as f64, p as f64);
        ((f[q] + qf * qf) - (f[p] + pf * pf)) / (2.0 * qf - 2.0 * pf)
    };

    for q in 1..n {
        let mut s = intersect(q, v[k]);
        // z[0] is -inf so this stops at k == 0
        while k > 0 && s <= z[k] {
            k -= 1;
            s = intersect(q, v[k]);
        }
        k += 1;
        v[k] = q;
        z[k] = s;
        z[k + 1] = f64::INFINITY;
    }

    k = 0;
    for (q, dst) in out.iter_mut().enumerate() {
        let qf = q as f64;
        while z[k + 1] < qf {
            k += 1;
        }
        let d = qf - v[k] as f64;
        *dst = d * d + f[v[k]];
    }
}

/// Euclidean distance from every voxel to the nearest non-zero seed.
///
/// Seed voxels are 0. Without any seed every voxel is `f32::INFINITY`.
pub fn distance_transform(seeds: &Array3<u64>) -> Array3<f32> {
    let mut grid = seeds.mapv(|s| if s != 0 { 0.0 } else { FAR });

    for axis in 0..3 {
        for mut lane in grid.lanes_mut(Axis(axis)) {
            let f = lane.to_vec();
            let mut out = vec![0f64; f.len()];
            squared_distance_1d(&f, &mut out);
            for (dst, src) in lane.iter_mut().zip(out) {
                *dst = src;
            }
        }
    }

    grid.mapv(|d| if d >= FAR / 2.0 { f32::INFINITY } else { d.sqrt() as f32 })
}
