//! # Transitions
//!
//! Five transition generators over equal-length frame sequences:
//!
//! - **Cut**: hard switch from the first sequence to the second at a pivot frame
//! - **Dissolve**: linear cross-fade between two sequences
//! - **Fade**: a single sequence fading in from, or out to, black
//! - **Iris**: a single sequence seen through a growing or shrinking circle
//! - **Wipe**: the second sequence pushing the first off along one axis
//!
//! Every generator validates its inputs before allocating any output, works
//! on each frame index independently, and returns a new sequence of the same
//! length and frame shape as its input.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use frame_transitions::frame::{Frame, FrameSequence};
//! use frame_transitions::transitions::TransitionKind;
//!
//! # fn main() -> frame_transitions::Result<()> {
//! let black = Frame::filled(64, 48, &[0, 0, 0])?;
//! let white = Frame::filled(64, 48, &[255, 255, 255])?;
//! let a = FrameSequence::new(vec![black; 24])?;
//! let b = FrameSequence::new(vec![white; 24])?;
//!
//! let dissolve = TransitionKind::Dissolve { gamma: 0.0 }.render(&a, Some(&b))?;
//! assert_eq!(dissolve.duration(), 24);
//! # Ok(())
//! # }
//! ```

pub mod cut;
pub mod dissolve;
pub mod fade;
pub mod iris;
pub mod schedule;
pub mod wipe;

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, TransitionError};
use crate::frame::{Frame, FrameSequence, FrameShape};

pub use iris::Smoothing;

/// Default additive bias for the blending transitions
pub const DEFAULT_GAMMA: f32 = 0.0;

/// Axis a wipe travels along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WipeAxis {
    /// Columns are replaced, the boundary moves across the width
    #[default]
    Horizontal,
    /// Rows are replaced, the boundary moves down the height
    Vertical,
}

impl fmt::Display for WipeAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => f.write_str("horizontal"),
            Self::Vertical => f.write_str("vertical"),
        }
    }
}

impl FromStr for WipeAxis {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(Self::Horizontal),
            "vertical" | "v" => Ok(Self::Vertical),
            other => Err(format!("unknown wipe axis '{other}' (expected horizontal or vertical)")),
        }
    }
}

/// A transition request: which effect, with its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransitionKind {
    /// Frames before `pivot` come from the first sequence, the rest from the second
    Cut { pivot: usize },

    /// Cross-fade with additive bias `gamma`
    Dissolve {
        #[serde(default)]
        gamma: f32,
    },

    /// Fade from black (`fade_in`) or to black
    Fade {
        #[serde(default)]
        gamma: f32,
        #[serde(default)]
        fade_in: bool,
    },

    /// Circular reveal (`iris_in`) or close, optionally softened
    Iris {
        #[serde(default)]
        iris_in: bool,
        #[serde(default)]
        smoothing: Option<Smoothing>,
    },

    /// Progressive replacement along `axis`; `reverse` swaps which side leads
    Wipe {
        #[serde(default)]
        axis: WipeAxis,
        #[serde(default)]
        reverse: bool,
    },
}

impl TransitionKind {
    /// Short lowercase name of the effect
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cut { .. } => "cut",
            Self::Dissolve { .. } => "dissolve",
            Self::Fade { .. } => "fade",
            Self::Iris { .. } => "iris",
            Self::Wipe { .. } => "wipe",
        }
    }

    /// Number of input sequences the effect consumes
    pub fn input_count(&self) -> usize {
        match self {
            Self::Fade { .. } | Self::Iris { .. } => 1,
            Self::Cut { .. } | Self::Dissolve { .. } | Self::Wipe { .. } => 2,
        }
    }

    /// Run the transition
    ///
    /// `other` is required for cut, dissolve and wipe. Fade and iris only use
    /// `sequence`; a second sequence passed to them is ignored.
    pub fn render(&self, sequence: &FrameSequence, other: Option<&FrameSequence>) -> Result<Transition> {
        if self.input_count() == 1 && other.is_some() {
            warn!("{} uses a single sequence; ignoring the second one", self.name());
        }

        let frames = match self {
            Self::Cut { pivot } => cut::cut(sequence, self.require_other(other)?, *pivot)?,
            Self::Dissolve { gamma } => dissolve::dissolve(sequence, self.require_other(other)?, *gamma)?,
            Self::Fade { gamma, fade_in } => fade::fade(sequence, *gamma, *fade_in)?,
            Self::Iris { iris_in, smoothing } => iris::iris(sequence, *iris_in, smoothing.as_ref())?,
            Self::Wipe { axis, reverse } => {
                wipe::wipe(sequence, self.require_other(other)?, *axis, *reverse)?
            }
        };

        Ok(Transition {
            kind: self.clone(),
            frames,
        })
    }

    fn require_other<'a>(&self, other: Option<&'a FrameSequence>) -> Result<&'a FrameSequence> {
        other.ok_or_else(|| {
            TransitionError::invalid(format!("{} needs a second sequence", self.name())).into()
        })
    }
}

/// The rendered output of one transition
///
/// Holds the request that produced it alongside the frames, so a result can
/// be saved or composed further without losing what it depicts.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    kind: TransitionKind,
    frames: FrameSequence,
}

impl Transition {
    pub fn kind(&self) -> &TransitionKind {
        &self.kind
    }

    pub fn frames(&self) -> &FrameSequence {
        &self.frames
    }

    pub fn into_frames(self) -> FrameSequence {
        self.frames
    }

    /// Number of frames in the transition
    pub fn duration(&self) -> usize {
        self.frames.len()
    }

    pub fn shape(&self) -> Option<FrameShape> {
        self.frames.shape()
    }
}

/// Check a one-sequence input, returning its length and frame shape
pub(crate) fn validate_single(sequence: &FrameSequence) -> Result<(usize, FrameShape)> {
    match sequence.shape() {
        Some(shape) => Ok((sequence.len(), shape)),
        None => Err(TransitionError::invalid("input sequence is empty").into()),
    }
}

/// Check a two-sequence input: non-empty, equal length, equal frame shape
pub(crate) fn validate_pair(sequence: &FrameSequence, other: &FrameSequence) -> Result<(usize, FrameShape)> {
    let (n, shape) = validate_single(sequence)?;
    if other.len() != n {
        return Err(TransitionError::LengthMismatch {
            expected: n,
            found: other.len(),
        }
        .into());
    }
    // Both sequences are internally uniform, so comparing the first frames
    // finds the first mismatching index.
    if let Some(found) = other.shape() {
        if found != shape {
            return Err(TransitionError::ShapeMismatch {
                index: 0,
                expected: shape,
                found,
            }
            .into());
        }
    }
    Ok((n, shape))
}

pub(crate) fn validate_gamma(gamma: f32) -> Result<()> {
    if !gamma.is_finite() {
        return Err(TransitionError::invalid(format!("gamma must be finite, got {gamma}")).into());
    }
    Ok(())
}

/// Compute frames `0..n` in parallel, keeping index order
pub(crate) fn render_frames<F>(n: usize, render: F) -> Result<FrameSequence>
where
    F: Fn(usize) -> Result<Frame> + Sync + Send,
{
    debug!("Rendering {} frames on {} worker(s)", n, rayon::current_num_threads());
    let frames = (0..n)
        .into_par_iter()
        .map(render)
        .collect::<Result<Vec<_>>>()?;
    Ok(FrameSequence::from_uniform(frames))
}
