use tracing::debug;

use crate::error::Result;
use crate::frame::{ops::scaled_unchecked, FrameSequence};
use crate::transitions::{render_frames, schedule::fade_frame_weight, validate_gamma, validate_single};

/// Fade `sequence` in from black (`fade_in`) or out to black
///
/// With `w(i) = (i + 1) / n`, fading in blends `frame * w + black * (1 - w)`;
/// fading out swaps the weights. Blending against black reduces to scaling
/// the source frame, so no black buffer is allocated.
pub fn fade(sequence: &FrameSequence, gamma: f32, fade_in: bool) -> Result<FrameSequence> {
    validate_gamma(gamma)?;
    let (n, shape) = validate_single(sequence)?;

    debug!(
        "Fade {} over {} frames ({}), gamma {}",
        if fade_in { "in" } else { "out" },
        n,
        shape,
        gamma
    );

    render_frames(n, |i| {
        let weight = fade_frame_weight(i, n, fade_in);
        Ok(scaled_unchecked(&sequence[i], weight, gamma))
    })
}
