//! Closed-form per-index schedules.
//!
//! Every function takes the frame index `i` and the sequence length `n`
//! (`n >= 1`, `i < n`) and has no other state, so frames can be computed in
//! any order.

/// Dissolve weights `(alpha, beta)` for frame `i`
///
/// `alpha = 1 - i/n` weighs the first sequence; `beta = 1 - alpha` weighs
/// the second.
pub fn dissolve_weights(i: usize, n: usize) -> (f32, f32) {
    let alpha = 1.0 - i as f32 / n as f32;
    (alpha, 1.0 - alpha)
}

/// Fade weight `w(i) = (i + 1) / n`, from `1/n` at the first frame to `1`
pub fn fade_weight(i: usize, n: usize) -> f32 {
    (i + 1) as f32 / n as f32
}

/// Weight of the source frame at index `i`; the black frame gets the complement
pub fn fade_frame_weight(i: usize, n: usize, fade_in: bool) -> f32 {
    let w = fade_weight(i, n);
    if fade_in {
        w
    } else {
        1.0 - w
    }
}

/// Iris radius in pixels for frame `i`
///
/// `short_side` is `min(width, height)`. Opening runs `r(i) = i/n`, closing
/// runs `r(n - i)`; the pixel radius is `round(short_side * r / 2)`.
pub fn iris_radius(i: usize, n: usize, short_side: u32, iris_in: bool) -> u32 {
    let step = if iris_in { i } else { n - i };
    let fraction = step as f64 / n as f64;
    (f64::from(short_side) * fraction / 2.0).round() as u32
}

/// Wipe split position along an axis of `extent` pixels for frame `i`
///
/// `c(i) = round(extent * (i + 1) / n)`, clamped to `extent`.
pub fn wipe_split(i: usize, n: usize, extent: u32) -> u32 {
    let step = f64::from(extent) / n as f64;
    let split = (step * (i + 1) as f64).round() as u32;
    split.min(extent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dissolve_weights_quarter_steps() {
        let alphas: Vec<f32> = (0..4).map(|i| dissolve_weights(i, 4).0).collect();
        assert_eq!(alphas, vec![1.0, 0.75, 0.5, 0.25]);

        for i in 0..7 {
            let (alpha, beta) = dissolve_weights(i, 7);
            assert_relative_eq!(alpha + beta, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_dissolve_alpha_decreases() {
        let n = 30;
        for i in 1..n {
            assert!(dissolve_weights(i, n).0 < dissolve_weights(i - 1, n).0);
        }
        assert!(dissolve_weights(n - 1, n).0 > 0.0);
    }

    #[test]
    fn test_fade_weight_range() {
        assert_relative_eq!(fade_weight(0, 5), 0.2, epsilon = 1e-6);
        assert_relative_eq!(fade_weight(4, 5), 1.0, epsilon = 1e-6);
        assert_relative_eq!(fade_frame_weight(0, 5, false), 0.8, epsilon = 1e-6);
        assert_relative_eq!(fade_frame_weight(4, 5, false), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_fade_complement_at_first_frame() {
        // The black frame weight at i = 0 is 1 - 1/n, not a wrapped lookup
        let n = 10;
        let frame_w = fade_frame_weight(0, n, true);
        assert_relative_eq!(1.0 - frame_w, 0.9, epsilon = 1e-6);
    }

    #[test]
    fn test_iris_radius_grows_and_shrinks() {
        let (n, side) = (10, 200);
        let opening: Vec<u32> = (0..n).map(|i| iris_radius(i, n, side, true)).collect();
        let closing: Vec<u32> = (0..n).map(|i| iris_radius(i, n, side, false)).collect();

        assert_eq!(opening[0], 0);
        assert_eq!(opening[n - 1], 90);
        assert!(opening.windows(2).all(|w| w[1] > w[0]));

        assert_eq!(closing[0], 100);
        assert_eq!(closing[n - 1], 10);
        assert!(closing.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_wipe_split_monotonic_and_complete() {
        let (n, width) = (7, 100);
        let splits: Vec<u32> = (0..n).map(|i| wipe_split(i, n, width)).collect();
        assert_eq!(splits[0], 14);
        assert_eq!(splits[n - 1], width);
        assert!(splits.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_wipe_split_more_frames_than_pixels() {
        let splits: Vec<u32> = (0..10).map(|i| wipe_split(i, 10, 3)).collect();
        assert_eq!(splits[0], 0);
        assert_eq!(splits[9], 3);
        assert!(splits.windows(2).all(|w| w[1] >= w[0]));
    }
}
