use crate::error::{Result, TransitionError};
use crate::frame::Frame;

/// Per-pixel byte mask: 255 lets a pixel through, 0 blacks it out
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Mask {
    /// Mask with every pixel blocked
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// Solid circle of `radius` around `(center_x, center_y)`
    ///
    /// A pixel is inside when its squared distance to the center is at most
    /// `radius^2`. A zero radius leaves the mask empty.
    pub fn circle(width: u32, height: u32, center_x: u32, center_y: u32, radius: u32) -> Self {
        let mut mask = Self::empty(width, height);
        if radius == 0 {
            return mask;
        }

        let r = i64::from(radius);
        let r2 = r * r;
        let (cx, cy) = (i64::from(center_x), i64::from(center_y));
        let y_start = (cy - r).max(0);
        let y_end = (cy + r).min(i64::from(height) - 1);

        for y in y_start..=y_end {
            let dy = y - cy;
            // Widest dx with dx^2 + dy^2 <= r^2
            let span = integer_sqrt(r2 - dy * dy);
            let x_start = (cx - span).max(0);
            let x_end = (cx + span).min(i64::from(width) - 1);
            if x_start > x_end {
                continue;
            }
            let row = y as usize * width as usize;
            mask.data[row + x_start as usize..=row + x_end as usize].fill(u8::MAX);
        }
        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_set(&self, x: u32, y: u32) -> bool {
        self.data[y as usize * self.width as usize + x as usize] != 0
    }

    /// Number of pixels let through
    pub fn coverage(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Bitwise AND of every channel of `frame` with the mask value
    pub fn apply(&self, frame: &Frame) -> Result<Frame> {
        if frame.width() != self.width || frame.height() != self.height {
            return Err(TransitionError::invalid(format!(
                "mask is {}x{} but frame is {}x{}",
                self.width,
                self.height,
                frame.width(),
                frame.height()
            ))
            .into());
        }

        let channels = frame.channels() as usize;
        let mut data = frame.as_bytes().to_vec();
        for (px, &m) in data.chunks_exact_mut(channels).zip(&self.data) {
            for v in px {
                *v &= m;
            }
        }
        Ok(Frame::from_parts(frame.shape(), data))
    }
}

fn integer_sqrt(n: i64) -> i64 {
    if n <= 0 {
        return 0;
    }
    let mut x = (n as f64).sqrt() as i64;
    while x * x > n {
        x -= 1;
    }
    while (x + 1) * (x + 1) <= n {
        x += 1;
    }
    x
}
