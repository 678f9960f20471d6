//! # Frame Module
//!
//! The shared frame/sequence data model, the pixel primitives the transitions
//! are built from, and the thin glue for reading and writing frame files.

pub mod blur;
pub mod mask;
pub mod ops;
pub mod types;

mod loader;
mod writer;

pub use mask::Mask;
pub use ops::add_weighted;
pub use types::{Frame, FrameSequence, FrameShape};
pub use loader::SequenceLoader;
pub use writer::{SavedSequence, SequenceWriter};
