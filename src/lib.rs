//! # Frame-Transitions
//!
//! Classic video-editing transitions over in-memory frame sequences.
//!
//! A transition takes one or two equally-shaped [`FrameSequence`]s and
//! produces a new sequence of the same length: a hard cut, a cross-dissolve,
//! a fade to or from black, a circular iris, or a horizontal/vertical wipe.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use frame_transitions::{
//!     composition::TransitionEngine,
//!     config::Config,
//!     transitions::{TransitionKind, WipeAxis},
//! };
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let engine = TransitionEngine::new(Config::default())?;
//! let kind = TransitionKind::Wipe { axis: WipeAxis::Vertical, reverse: false };
//!
//! let saved = engine
//!     .compose(&kind, &[PathBuf::from("clip_a/"), PathBuf::from("clip_b/")], "out/")
//!     .await?;
//! println!("wrote {} frames", saved.frame_count);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`frame`] - frame data model, blending, masks, blur and image I/O
//! - [`transitions`] - the transition generators and their schedules
//! - [`composition`] - pipeline engine with a sized worker pool
//! - [`config`] - configuration management

pub mod composition;
pub mod config;
pub mod error;
pub mod frame;
pub mod transitions;

// Re-export commonly used types for convenience
pub use crate::{
    composition::TransitionEngine,
    config::Config,
    error::{Result, TransitionsError},
    frame::{Frame, FrameSequence, FrameShape},
    transitions::{Smoothing, Transition, TransitionKind, WipeAxis},
};
