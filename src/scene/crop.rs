use ndarray::{s, Array3};
use crate::error::{Result, SkeleratorError};

/// Offset of a centred `output` window inside `input`.
///
/// Every axis needs `output <= input` and an even difference.
pub fn crop_offset(input: [usize; 3], output: [usize; 3]) -> Result<[usize; 3]> {
    let mut offset = [0usize; 3];
    for d in 0..3 {
        if output[d] > input[d] || (input[d] - output[d]) % 2 != 0 {
            return Err(SkeleratorError::InvalidCrop { input, output });
        }
        offset[d] = (input[d] - output[d]) / 2;
    }
    Ok(offset)
}

/// Centred crop of a `[z, y, x]` volume, returned with its offset
pub fn crop<T: Clone>(volume: &Array3<T>, output: [usize; 3]) -> Result<(Array3<T>, [usize; 3])> {
    let (z, y, x) = volume.dim();
    let [oz, oy, ox] = crop_offset([z, y, x], output)?;
    let cropped = volume
        .slice(s![oz..oz + output[0], oy..oy + output[1], ox..ox + output[2]])
        .to_owned();
    Ok((cropped, [oz, oy, ox]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centred_offset() {
        assert_eq!(crop_offset([100, 100, 100], [50, 50, 50]).unwrap(), [25, 25, 25]);
        assert_eq!(crop_offset([10, 20, 30], [10, 10, 2]).unwrap(), [0, 5, 14]);
    }

    #[test]
    fn test_invalid_crops() {
        assert!(matches!(
            crop_offset([100, 100, 100], [51, 50, 50]),
            Err(SkeleratorError::InvalidCrop { .. })
        ));
        assert!(crop_offset([10, 10, 10], [12, 10, 10]).is_err());
    }

    #[test]
    fn test_crop_matches_slice() {
        let volume = Array3::from_shape_fn((100, 100, 100), |(z, y, x)| (z * 10_000 + y * 100 + x) as u64);
        let (cropped, offset) = crop(&volume, [50, 50, 50]).unwrap();
        assert_eq!(offset, [25, 25, 25]);
        assert_eq!(cropped, volume.slice(s![25..75, 25..75, 25..75]));
    }
}
