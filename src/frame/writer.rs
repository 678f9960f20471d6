use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{FrameError, Result};
use crate::frame::types::FrameSequence;

/// A sequence persisted as one image file per frame
#[derive(Debug, Clone)]
pub struct SavedSequence {
    pub dir: PathBuf,
    pub paths: Vec<PathBuf>,
    pub frame_count: usize,
}

/// Writes frame sequences to disk as `0.jpg`, `1.jpg`, ...
#[derive(Debug, Clone)]
pub struct SequenceWriter {
    extension: String,
    create_dirs: bool,
}

impl SequenceWriter {
    pub fn new<S: Into<String>>(extension: S, create_dirs: bool) -> Self {
        Self {
            extension: extension.into().trim_start_matches('.').to_lowercase(),
            create_dirs,
        }
    }

    /// File path for frame `index` inside `dir`
    pub fn frame_path<P: AsRef<Path>>(&self, dir: P, index: usize) -> PathBuf {
        dir.as_ref().join(format!("{}.{}", index, self.extension))
    }

    /// Save every frame of `sequence` into `dir`
    pub fn save<P: AsRef<Path>>(&self, sequence: &FrameSequence, dir: P) -> Result<SavedSequence> {
        let dir = dir.as_ref();
        if !dir.exists() {
            if self.create_dirs {
                create_dir_all(dir)?;
            } else {
                return Err(FrameError::SaveFailed {
                    path: dir.display().to_string(),
                    reason: "output directory does not exist".to_string(),
                }
                .into());
            }
        }

        debug!("Saving frames to directory: {:?}", dir);

        let stale = self.stale_frames(dir, sequence.len())?;
        if !stale.is_empty() {
            warn!(
                "{:?} already holds {} frame file(s) numbered {} or higher; they are left in place",
                dir,
                stale.len(),
                sequence.len()
            );
        }

        let mut paths = Vec::with_capacity(sequence.len());
        for (index, frame) in sequence.iter().enumerate() {
            let path = self.frame_path(dir, index);
            frame.save(&path)?;
            paths.push(path);
        }

        info!("Saved {} frames as .{} images", paths.len(), self.extension);
        Ok(SavedSequence {
            dir: dir.to_path_buf(),
            frame_count: paths.len(),
            paths,
        })
    }

    /// Frame files in `dir` numbered at or past `len`
    ///
    /// A later `load_dir` picks these up alongside the frames just written.
    pub fn stale_frames<P: AsRef<Path>>(&self, dir: P, len: usize) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut stale = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let matches_ext = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension));
            let index = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<usize>().ok());
            if matches_ext && index.is_some_and(|i| i >= len) {
                stale.push(path);
            }
        }
        stale.sort();
        Ok(stale)
    }
}
