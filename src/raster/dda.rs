use std::array;
use crate::error::{Result, SkeleratorError};
use crate::math::Point;
use super::{check_dimension, to_point, Rasterizer};

/// Rounding used for every emitted coordinate: add 0.5 then truncate
/// toward zero. Voxel placement must match this bit for bit.
#[inline]
pub fn dda_round(x: f64) -> i64 {
    (x + 0.5) as i64
}

/// Digital differential analyzer line between two grid points in 2D or 3D.
///
/// Both endpoints are multiplied by `scaling` first. The axis with the
/// largest absolute delta drives the line, which has exactly `L + 1` points
/// for a driving length `L`. The first and last points are checked against
/// the scaled endpoints; this fails for negative coordinates because the
/// rounding rule truncates toward zero.
pub fn dda_line<const D: usize>(
    start: [i64; D],
    end: [i64; D],
    scaling: [i64; D],
) -> Result<Vec<[i64; D]>> {
    check_dimension::<D>()?;
    let scaled_start: [i64; D] = array::from_fn(|d| start[d] * scaling[d]);
    let scaled_end: [i64; D] = array::from_fn(|d| end[d] * scaling[d]);
    let s: [f64; D] = array::from_fn(|d| scaled_start[d] as f64);
    let e: [f64; D] = array::from_fn(|d| scaled_end[d] as f64);

    // First axis wins ties
    let mut max_length = 0.0f64;
    for d in 0..D {
        let len = (e[d] - s[d]).abs();
        if len > max_length {
            max_length = len;
        }
    }

    if max_length == 0.0 {
        return Err(SkeleratorError::ZeroLengthEdge {
            start: to_point(&scaled_start),
            end: to_point(&scaled_end),
        });
    }

    let dv: [f64; D] = array::from_fn(|d| (e[d] - s[d]) / max_length);
    let steps = max_length as usize;

    let mut line = Vec::with_capacity(steps + 1);
    line.push(array::from_fn(|d| dda_round(s[d])));
    for step in 0..steps {
        let k = (step + 1) as f64;
        line.push(array::from_fn(|d| dda_round(k * dv[d] + s[d])));
    }

    for (expected, actual) in [(scaled_start, line[0]), (scaled_end, line[line.len() - 1])] {
        if expected != actual {
            return Err(SkeleratorError::EndpointMismatch {
                expected: to_point(&expected),
                actual: to_point(&actual),
            });
        }
    }

    Ok(line)
}

/// Deterministic rasterizer with per-axis scaling
#[derive(Debug, Clone, Copy)]
pub struct Dda3 {
    pub scaling: Point,
}

impl Dda3 {
    pub fn new(scaling: Point) -> Self {
        Self { scaling }
    }
}

impl Default for Dda3 {
    fn default() -> Self {
        Self::new(Point::ONE)
    }
}

impl Rasterizer for Dda3 {
    fn rasterize(&mut self, start: Point, end: Point) -> Result<Vec<Point>> {
        let line = dda_line(start.to_array(), end.to_array(), self.scaling.to_array())?;
        Ok(line.into_iter().map(Point::from).collect())
    }
}
