use tracing::debug;

use crate::error::Result;
use crate::frame::{Frame, FrameSequence, FrameShape};
use crate::transitions::{render_frames, schedule::wipe_split, validate_pair, WipeAxis};

/// Wipe from `sequence` to `other` along `axis`
///
/// At frame `i` the split `c = wipe_split(i, n, extent)` selects the trailing
/// `extent - c` columns (or rows) of `sequence[i]` and the trailing `c` of
/// `other[i]`. The `other` slice leads and the `sequence` slice trails;
/// `reverse` swaps the order. Frame 0 is always a copy of `sequence[0]`.
pub fn wipe(
    sequence: &FrameSequence,
    other: &FrameSequence,
    axis: WipeAxis,
    reverse: bool,
) -> Result<FrameSequence> {
    let (n, shape) = validate_pair(sequence, other)?;
    let extent = match axis {
        WipeAxis::Horizontal => shape.width,
        WipeAxis::Vertical => shape.height,
    };

    debug!(
        "{} wipe over {} frames ({}), reverse: {}",
        axis, n, shape, reverse
    );

    render_frames(n, |i| {
        if i == 0 {
            return Ok(sequence[0].clone());
        }
        let split = wipe_split(i, n, extent);
        let frame = match axis {
            WipeAxis::Horizontal => join_columns(&sequence[i], &other[i], split, reverse),
            WipeAxis::Vertical => join_rows(&sequence[i], &other[i], split, reverse),
        };
        Ok(frame)
    })
}

fn join_columns(a: &Frame, b: &Frame, split: u32, reverse: bool) -> Frame {
    let shape = a.shape();
    let c = shape.channels as usize;
    let width = shape.width as usize;
    let split = split as usize;

    let mut data = Vec::with_capacity(shape.byte_len());
    for y in 0..shape.height {
        let a_slice = &a.row(y)[split * c..];
        let b_slice = &b.row(y)[(width - split) * c..];
        let (lead, trail) = order(a_slice, b_slice, reverse);
        data.extend_from_slice(lead);
        data.extend_from_slice(trail);
    }
    Frame::from_parts(shape, data)
}

fn join_rows(a: &Frame, b: &Frame, split: u32, reverse: bool) -> Frame {
    let shape: FrameShape = a.shape();
    let row_len = shape.row_len();
    let height = shape.height as usize;
    let split = split as usize;

    let a_slice = &a.as_bytes()[split * row_len..];
    let b_slice = &b.as_bytes()[(height - split) * row_len..];
    let (lead, trail) = order(a_slice, b_slice, reverse);

    let mut data = Vec::with_capacity(shape.byte_len());
    data.extend_from_slice(lead);
    data.extend_from_slice(trail);
    Frame::from_parts(shape, data)
}

fn order<'a>(a_slice: &'a [u8], b_slice: &'a [u8], reverse: bool) -> (&'a [u8], &'a [u8]) {
    if reverse {
        (a_slice, b_slice)
    } else {
        (b_slice, a_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{TransitionError, TransitionsError};
    use crate::transitions::test_support::{gradient_sequence, solid_sequence};

    /// Count of pixels in `frame` matching `color`
    fn count(frame: &Frame, color: [u8; 3]) -> usize {
        frame.as_bytes().chunks_exact(3).filter(|px| *px == color).count()
    }

    #[test]
    fn test_horizontal_wipe_progresses() {
        let a = solid_sequence(5, 10, 4, |_| [255, 0, 0]);
        let b = solid_sequence(5, 10, 4, |_| [0, 0, 255]);
        let out = wipe(&a, &b, WipeAxis::Horizontal, false).unwrap();

        assert_eq!(out[0], a[0]);
        assert_eq!(out[4], b[4]);

        let b_pixels: Vec<usize> = out.iter().map(|f| count(f, [0, 0, 255])).collect();
        assert!(b_pixels.windows(2).all(|w| w[1] >= w[0]));
        // Frame 2: split = 6, B fills the six leading columns
        assert_eq!(b_pixels[2], 6 * 4);
        assert_eq!(out[2].pixel(5, 0), &[0, 0, 255]);
        assert_eq!(out[2].pixel(6, 0), &[255, 0, 0]);
    }

    #[test]
    fn test_horizontal_slices_come_from_trailing_columns() {
        // Pixel value = column index, so slice origins are visible
        let a = gradient_sequence(4, 8, 2);
        let b = gradient_sequence(4, 8, 2);
        let out = wipe(&a, &b, WipeAxis::Horizontal, false).unwrap();

        // Frame 1: split = 4 -> B columns 4..8 then A columns 4..8
        let cols: Vec<u8> = (0..8).map(|x| out[1].pixel(x, 0)[0]).collect();
        assert_eq!(cols, vec![4, 5, 6, 7, 4, 5, 6, 7]);
    }

    #[test]
    fn test_reverse_swaps_lead_and_trail() {
        let a = solid_sequence(4, 8, 2, |_| [255, 0, 0]);
        let b = solid_sequence(4, 8, 2, |_| [0, 255, 0]);
        let out = wipe(&a, &b, WipeAxis::Horizontal, true).unwrap();

        assert_eq!(out[0], a[0]);
        // Frame 2: split = 6, A's remaining two columns lead
        assert_eq!(out[2].pixel(0, 0), &[255, 0, 0]);
        assert_eq!(out[2].pixel(1, 1), &[255, 0, 0]);
        assert_eq!(out[2].pixel(2, 0), &[0, 255, 0]);
        assert_eq!(out[3], b[3]);
    }

    #[test]
    fn test_vertical_wipe_replaces_rows() {
        let a = solid_sequence(4, 3, 8, |_| [9, 9, 9]);
        let b = solid_sequence(4, 3, 8, |_| [200, 200, 200]);
        let out = wipe(&a, &b, WipeAxis::Vertical, false).unwrap();

        assert_eq!(out[0], a[0]);
        // Frame 1: split = 4 rows of B on top
        assert_eq!(out[1].row(3), &[200; 9]);
        assert_eq!(out[1].row(4), &[9; 9]);
        assert_eq!(out[3], b[3]);
    }

    #[test]
    fn test_reverse_vertical_wipe_puts_source_rows_on_top() {
        let a = solid_sequence(4, 3, 8, |_| [9, 9, 9]);
        let b = solid_sequence(4, 3, 8, |_| [200, 200, 200]);
        let out = wipe(&a, &b, WipeAxis::Vertical, true).unwrap();

        assert_eq!(out[0], a[0]);
        // Frame 2: split = 6, A's remaining two rows lead
        assert_eq!(out[2].row(1), &[9; 9]);
        assert_eq!(out[2].row(2), &[200; 9]);
        assert_eq!(out[2].row(7), &[200; 9]);
        assert_eq!(out[3], b[3]);
    }

    #[test]
    fn test_reverse_vertical_rows_come_from_trailing_rows() {
        // Green channel = row index
        let a = gradient_sequence(4, 2, 8);
        let b = gradient_sequence(4, 2, 8);
        let out = wipe(&a, &b, WipeAxis::Vertical, true).unwrap();

        // Frame 2: A rows 6..8 then B rows 2..8
        let rows: Vec<u8> = (0..8).map(|y| out[2].pixel(0, y)[1]).collect();
        assert_eq!(rows, vec![6, 7, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_more_frames_than_columns() {
        let a = solid_sequence(20, 3, 2, |_| [1, 1, 1]);
        let b = solid_sequence(20, 3, 2, |_| [2, 2, 2]);
        let out = wipe(&a, &b, WipeAxis::Horizontal, false).unwrap();

        assert_eq!(out.len(), 20);
        // Split of zero leaves the source frame as-is
        assert_eq!(wipe_split(1, 20, 3), 0);
        assert_eq!(out[1], a[1]);
        assert_eq!(out[19], b[19]);
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let a = solid_sequence(3, 8, 4, |_| [0, 0, 0]);
        let b = solid_sequence(3, 8, 5, |_| [0, 0, 0]);
        assert!(matches!(
            wipe(&a, &b, WipeAxis::Horizontal, false),
            Err(TransitionsError::Transition(TransitionError::ShapeMismatch { .. }))
        ));
    }
}
