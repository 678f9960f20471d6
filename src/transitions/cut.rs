use tracing::debug;

use crate::error::{Result, TransitionError};
use crate::frame::FrameSequence;
use crate::transitions::validate_pair;

/// Splice `sequence` and `other` at frame `pivot`
///
/// Output frame `i` is a copy of `sequence[i]` for `i < pivot` and of
/// `other[i]` from `pivot` on. `pivot == 0` gives all of `other`,
/// `pivot == len` all of `sequence`.
pub fn cut(sequence: &FrameSequence, other: &FrameSequence, pivot: usize) -> Result<FrameSequence> {
    let (n, _) = validate_pair(sequence, other)?;
    if pivot > n {
        return Err(TransitionError::invalid(format!(
            "cut pivot {pivot} is outside 0..={n}"
        ))
        .into());
    }

    debug!("Cut at frame {} of {}", pivot, n);

    let frames = sequence
        .iter()
        .take(pivot)
        .chain(other.iter().skip(pivot))
        .cloned()
        .collect();
    Ok(FrameSequence::from_uniform(frames))
}
