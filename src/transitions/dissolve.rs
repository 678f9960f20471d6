use tracing::debug;

use crate::error::Result;
use crate::frame::{ops::weighted_unchecked, FrameSequence};
use crate::transitions::{render_frames, schedule::dissolve_weights, validate_gamma, validate_pair};

/// Cross-fade from `sequence` to `other`
///
/// Frame `i` is `sequence[i] * alpha + other[i] * (1 - alpha) + gamma` with
/// `alpha = 1 - i/n`: all of `sequence` at the first frame, one step short
/// of all of `other` at the last.
pub fn dissolve(sequence: &FrameSequence, other: &FrameSequence, gamma: f32) -> Result<FrameSequence> {
    validate_gamma(gamma)?;
    let (n, shape) = validate_pair(sequence, other)?;

    debug!("Dissolve over {} frames ({}), gamma {}", n, shape, gamma);

    render_frames(n, |i| {
        let (alpha, beta) = dissolve_weights(i, n);
        Ok(weighted_unchecked(&sequence[i], alpha, &other[i], beta, gamma))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transitions::test_support::{gradient_sequence, solid_sequence};

    #[test]
    fn test_black_to_white_quarter_steps() {
        let black = solid_sequence(4, 2, 2, |_| [0, 0, 0]);
        let white = solid_sequence(4, 2, 2, |_| [255, 255, 255]);

        let out = dissolve(&black, &white, 0.0).unwrap();
        let means: Vec<f64> = out.iter().map(|f| f.mean()).collect();
        // A contributes 1.0, 0.75, 0.5, 0.25 of each pixel
        assert_eq!(means, vec![0.0, 64.0, 128.0, 191.0]);
    }

    #[test]
    fn test_first_frame_is_first_sequence() {
        let a = gradient_sequence(6, 8, 5);
        let b = solid_sequence(6, 8, 5, |_| [90, 90, 90]);
        let out = dissolve(&a, &b, 0.0).unwrap();
        assert_eq!(out[0], a[0]);
    }

    #[test]
    fn test_identical_inputs_are_unchanged() {
        let a = gradient_sequence(5, 6, 4);
        let out = dissolve(&a, &a, 0.0).unwrap();
        assert_eq!(out, a);
    }

    #[test]
    fn test_interpolates_monotonically() {
        let a = solid_sequence(10, 2, 2, |_| [20, 20, 20]);
        let b = solid_sequence(10, 2, 2, |_| [220, 220, 220]);
        let out = dissolve(&a, &b, 0.0).unwrap();
        let means: Vec<f64> = out.iter().map(|f| f.mean()).collect();
        assert!(means.windows(2).all(|w| w[1] > w[0]));
        assert!((means[9] - 200.0).abs() < 1.0);
    }

    #[test]
    fn test_gamma_is_added_and_saturates() {
        let a = solid_sequence(2, 1, 1, |_| [250, 100, 0]);
        let out = dissolve(&a, &a, 10.0).unwrap();
        assert_eq!(out[0].pixel(0, 0), &[255, 110, 10]);

        assert!(dissolve(&a, &a, f32::INFINITY).is_err());
    }

    #[test]
    fn test_inputs_are_not_modified() {
        let a = gradient_sequence(3, 4, 4);
        let b = solid_sequence(3, 4, 4, |_| [255, 0, 0]);
        let (a_before, b_before) = (a.clone(), b.clone());
        dissolve(&a, &b, 0.0).unwrap();
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }
}
