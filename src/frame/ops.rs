//! Per-channel arithmetic shared by the blending transitions.

use crate::error::{Result, TransitionError};
use crate::frame::Frame;

/// Weighted sum of two equally shaped frames: `a * alpha + b * beta + gamma`
///
/// Each channel is rounded to nearest and saturated to `0..=255`, so heavy
/// weights or a large bias never wrap around.
pub fn add_weighted(a: &Frame, alpha: f32, b: &Frame, beta: f32, gamma: f32) -> Result<Frame> {
    if a.shape() != b.shape() {
        return Err(TransitionError::ShapeMismatch {
            index: 0,
            expected: a.shape(),
            found: b.shape(),
        }
        .into());
    }
    Ok(weighted_unchecked(a, alpha, b, beta, gamma))
}

/// Same as [`add_weighted`] for callers that already checked the shapes
pub(crate) fn weighted_unchecked(a: &Frame, alpha: f32, b: &Frame, beta: f32, gamma: f32) -> Frame {
    let data = a
        .as_bytes()
        .iter()
        .zip(b.as_bytes())
        .map(|(&pa, &pb)| saturate_u8(f32::from(pa) * alpha + f32::from(pb) * beta + gamma))
        .collect();
    Frame::from_parts(a.shape(), data)
}

/// Scale one frame against an implicit black frame: `a * alpha + gamma`
///
/// Identical to `weighted_unchecked(a, alpha, &black, beta, gamma)` for any
/// `beta`, without allocating the black frame.
pub(crate) fn scaled_unchecked(a: &Frame, alpha: f32, gamma: f32) -> Frame {
    let data = a
        .as_bytes()
        .iter()
        .map(|&pa| saturate_u8(f32::from(pa) * alpha + gamma))
        .collect();
    Frame::from_parts(a.shape(), data)
}

/// Round half away from zero and clamp into the byte range
pub fn saturate_u8(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameShape;

    #[test]
    fn test_saturate_clamps_and_rounds() {
        assert_eq!(saturate_u8(-3.0), 0);
        assert_eq!(saturate_u8(300.0), 255);
        assert_eq!(saturate_u8(63.75), 64);
        assert_eq!(saturate_u8(127.5), 128);
        assert_eq!(saturate_u8(191.25), 191);
        assert_eq!(saturate_u8(f32::NAN), 0);
    }

    #[test]
    fn test_add_weighted_blends_per_channel() {
        let a = Frame::filled(2, 2, &[100, 0, 200]).unwrap();
        let b = Frame::filled(2, 2, &[0, 100, 200]).unwrap();
        let out = add_weighted(&a, 0.25, &b, 0.75, 0.0).unwrap();
        assert_eq!(out.pixel(1, 1), &[25, 75, 200]);
    }

    #[test]
    fn test_add_weighted_saturates_with_bias() {
        let a = Frame::filled(1, 1, &[250]).unwrap();
        let b = Frame::filled(1, 1, &[250]).unwrap();
        assert_eq!(add_weighted(&a, 1.0, &b, 1.0, 0.0).unwrap().as_bytes(), &[255]);
        assert_eq!(add_weighted(&a, 0.0, &b, 0.0, -10.0).unwrap().as_bytes(), &[0]);
        assert_eq!(add_weighted(&a, 0.0, &b, 0.0, 12.0).unwrap().as_bytes(), &[12]);
    }

    #[test]
    fn test_add_weighted_rejects_shape_mismatch() {
        let a = Frame::black(FrameShape::new(2, 2, 3)).unwrap();
        let b = Frame::black(FrameShape::new(2, 2, 4)).unwrap();
        assert!(add_weighted(&a, 0.5, &b, 0.5, 0.0).is_err());
    }

    #[test]
    fn test_scaled_matches_blend_against_black() {
        let a = Frame::filled(3, 1, &[10, 120, 255]).unwrap();
        let black = Frame::black(a.shape()).unwrap();
        for &(alpha, gamma) in &[(0.2f32, 0.0f32), (0.75, 3.0), (1.0, -1.0)] {
            assert_eq!(
                scaled_unchecked(&a, alpha, gamma),
                weighted_unchecked(&a, alpha, &black, 1.0 - alpha, gamma)
            );
        }
    }
}
