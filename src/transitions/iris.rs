use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TransitionError};
use crate::frame::{blur::gaussian_blur, FrameSequence, Mask};
use crate::transitions::{render_frames, schedule::iris_radius, validate_single};

/// Gaussian softening applied to each masked frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Smoothing {
    /// Kernel half-width; the kernel spans `2 * radius + 1` pixels
    pub radius: u32,
    pub sigma: f32,
}

impl Default for Smoothing {
    /// 5x5 kernel
    fn default() -> Self {
        Self {
            radius: 2,
            sigma: 1.1,
        }
    }
}

impl Smoothing {
    pub fn validate(&self) -> Result<()> {
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(TransitionError::invalid(format!(
                "smoothing sigma must be > 0, got {}",
                self.sigma
            ))
            .into());
        }
        Ok(())
    }
}

/// Reveal (`iris_in`) or hide `sequence` through a centered circle
///
/// The radius is bounded by half the shorter side of the frame, so the
/// corners of a non-square frame stay black even at the widest opening.
/// Pixels outside the circle are zeroed with a bitwise AND against the mask.
pub fn iris(sequence: &FrameSequence, iris_in: bool, smoothing: Option<&Smoothing>) -> Result<FrameSequence> {
    let (n, shape) = validate_single(sequence)?;
    if let Some(smoothing) = smoothing {
        smoothing.validate()?;
    }

    let short_side = shape.width.min(shape.height);
    let (center_x, center_y) = (shape.width / 2, shape.height / 2);

    debug!(
        "Iris {} over {} frames ({}), radius {} -> {}",
        if iris_in { "in" } else { "out" },
        n,
        shape,
        iris_radius(0, n, short_side, iris_in),
        iris_radius(n - 1, n, short_side, iris_in)
    );

    render_frames(n, |i| {
        let radius = iris_radius(i, n, short_side, iris_in);
        let mask = Mask::circle(shape.width, shape.height, center_x, center_y, radius);
        let masked = mask.apply(&sequence[i])?;
        match smoothing {
            Some(s) => gaussian_blur(&masked, s.radius, s.sigma),
            None => Ok(masked),
        }
    })
}
