//! # Composition Engine
//!
//! The engine ties configuration, frame I/O and the transition generators
//! together into a load, render and save pipeline.

pub mod engine;

pub use engine::TransitionEngine;
