use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{FrameError, Result};
use crate::frame::types::{Frame, FrameSequence};

/// Loads a directory of still images as one frame sequence
#[derive(Debug, Clone)]
pub struct SequenceLoader {
    extensions: Vec<String>,
}

impl SequenceLoader {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.into().trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    /// Load every supported image in `dir`, in frame order
    pub fn load_dir<P: AsRef<Path>>(&self, dir: P) -> Result<FrameSequence> {
        let dir = dir.as_ref();
        let paths = self.frame_paths(dir)?;
        if paths.is_empty() {
            return Err(FrameError::NoFramesFound {
                path: dir.display().to_string(),
            }
            .into());
        }

        debug!("Loading {} frames from {:?}", paths.len(), dir);
        let frames = paths
            .iter()
            .map(|path| Self::load_frame(path))
            .collect::<Result<Vec<_>>>()?;
        let sequence = FrameSequence::new(frames)?;

        if let Some(shape) = sequence.shape() {
            info!("Loaded {} frames ({}) from {:?}", sequence.len(), shape, dir);
        }
        Ok(sequence)
    }

    /// Decode a single image file
    pub fn load_frame<P: AsRef<Path>>(path: P) -> Result<Frame> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|e| FrameError::LoadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Frame::from_dynamic(image)
    }

    /// Supported files in `dir`, sorted into frame order
    ///
    /// Files named by frame index (`0.jpg`, `1.jpg`, ..., `10.jpg`) sort
    /// numerically; anything else falls back to name order.
    pub fn frame_paths<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(FrameError::NoFramesFound {
                path: dir.display().to_string(),
            }
            .into());
        }

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if self.is_supported(&path) {
                paths.push(path);
            } else {
                warn!("Skipping non-frame file: {:?}", path);
            }
        }

        paths.sort_by(|a, b| compare_frame_names(a, b));
        Ok(paths)
    }

    /// Check the file extension against the configured list
    pub fn is_supported<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

fn frame_index(path: &Path) -> Option<u64> {
    path.file_stem()?.to_str()?.parse().ok()
}

fn compare_frame_names(a: &Path, b: &Path) -> Ordering {
    match (frame_index(a), frame_index(b)) {
        (Some(ia), Some(ib)) => ia.cmp(&ib).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
