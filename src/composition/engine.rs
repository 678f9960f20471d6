use std::path::{Path, PathBuf};

use tokio::task;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::{Result, TransitionError, TransitionsError},
    frame::{FrameSequence, SavedSequence, SequenceLoader, SequenceWriter},
    transitions::{Transition, TransitionKind},
};

/// Runs transitions with the configured worker pool and frame I/O
///
/// The pipeline is:
/// 1. Loading - read each input directory into a frame sequence
/// 2. Alignment - optionally trim two inputs to a common length
/// 3. Rendering - run the transition on the worker pool
/// 4. Output - write one image file per output frame
pub struct TransitionEngine {
    config: Config,
    pool: rayon::ThreadPool,
    loader: SequenceLoader,
    writer: SequenceWriter,
}

impl TransitionEngine {
    /// Create an engine, validating the configuration and building its pool
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.processing.threads)
            .thread_name(|i| format!("transition-worker-{i}"))
            .build()
            .map_err(|e| TransitionsError::generic(format!("Failed to build worker pool: {e}")))?;

        let loader = SequenceLoader::new(config.input.extensions.iter().cloned());
        let writer = SequenceWriter::new(config.output.extension.clone(), config.output.create_dirs);

        debug!("Transition engine ready with {} worker(s)", config.processing.threads);
        Ok(Self {
            config,
            pool,
            loader,
            writer,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Render a transition over in-memory sequences on the engine's pool
    pub fn render(
        &self,
        kind: &TransitionKind,
        sequence: &FrameSequence,
        other: Option<&FrameSequence>,
    ) -> Result<Transition> {
        info!("🎬 Rendering {} over {} frames", kind.name(), sequence.len());
        let transition = self.pool.install(|| kind.render(sequence, other))?;
        info!("   ✅ {} frames rendered", transition.duration());
        Ok(transition)
    }

    /// Bring two sequences to a common length
    ///
    /// Unequal lengths are trimmed to the shorter one when
    /// `input.trim_to_shortest` is set and rejected otherwise.
    pub fn align(&self, mut sequence: FrameSequence, mut other: FrameSequence) -> Result<(FrameSequence, FrameSequence)> {
        if sequence.len() == other.len() {
            return Ok((sequence, other));
        }

        if !self.config.input.trim_to_shortest {
            return Err(TransitionError::LengthMismatch {
                expected: sequence.len(),
                found: other.len(),
            }
            .into());
        }

        let len = sequence.len().min(other.len());
        warn!(
            "Trimming inputs of {} and {} frames to {}",
            sequence.len(),
            other.len(),
            len
        );
        sequence.truncate(len);
        other.truncate(len);
        Ok((sequence, other))
    }

    /// Load frames from `inputs`, render `kind` and save the result to `output`
    pub async fn compose<P: AsRef<Path>>(
        &self,
        kind: &TransitionKind,
        inputs: &[PathBuf],
        output: P,
    ) -> Result<SavedSequence> {
        let output = output.as_ref();
        if inputs.len() != kind.input_count() {
            return Err(TransitionError::invalid(format!(
                "{} takes {} input director{}, got {}",
                kind.name(),
                kind.input_count(),
                if kind.input_count() == 1 { "y" } else { "ies" },
                inputs.len()
            ))
            .into());
        }

        info!("📂 Step 1: Loading {} input sequence(s)...", inputs.len());
        let handles: Vec<_> = inputs
            .iter()
            .cloned()
            .map(|dir| {
                let loader = self.loader.clone();
                task::spawn_blocking(move || loader.load_dir(dir))
            })
            .collect();
        let mut sequences = Vec::with_capacity(handles.len());
        for handle in handles {
            sequences.push(join(handle).await??);
        }

        let (sequence, other) = match (sequences.pop(), sequences.pop()) {
            (Some(second), Some(first)) => {
                let (first, second) = self.align(first, second)?;
                (first, Some(second))
            }
            (Some(only), None) => (only, None),
            _ => return Err(TransitionError::invalid("no input sequences").into()),
        };

        info!("🎞️  Step 2: Rendering transition...");
        let transition = self.render(kind, &sequence, other.as_ref())?;

        info!("💾 Step 3: Saving frames to {:?}", output);
        let writer = self.writer.clone();
        let frames = transition.into_frames();
        let dir = output.to_path_buf();
        let saved = join(task::spawn_blocking(move || writer.save(&frames, dir))).await??;

        info!("🎉 Transition complete! {} frames saved to {:?}", saved.frame_count, saved.dir);
        Ok(saved)
    }
}

async fn join<T>(handle: task::JoinHandle<T>) -> Result<T> {
    handle
        .await
        .map_err(|e| TransitionsError::generic(format!("Frame I/O task failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame;
    use crate::transitions::WipeAxis;
    use tempfile::tempdir;

    fn engine(trim: bool) -> TransitionEngine {
        let mut config = Config::default();
        config.processing.threads = 2;
        config.input.trim_to_shortest = trim;
        config.output.extension = "png".to_string();
        TransitionEngine::new(config).unwrap()
    }

    fn solid(n: usize, color: [u8; 3]) -> FrameSequence {
        FrameSequence::new(vec![Frame::filled(6, 4, &color).unwrap(); n]).unwrap()
    }

    fn write_clip(dir: &Path, n: usize, color: [u8; 3]) {
        SequenceWriter::new("png", true).save(&solid(n, color), dir).unwrap();
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.processing.threads = 0;
        assert!(TransitionEngine::new(config).is_err());
    }

    #[test]
    fn test_align_without_trimming() {
        let result = engine(false).align(solid(3, [0, 0, 0]), solid(5, [0, 0, 0]));
        assert!(matches!(
            result,
            Err(TransitionsError::Transition(TransitionError::LengthMismatch { expected: 3, found: 5 }))
        ));
    }

    #[test]
    fn test_align_trims_to_shortest() {
        let (a, b) = engine(true)
            .align(solid(7, [0, 0, 0]), solid(4, [1, 1, 1]))
            .unwrap();
        assert_eq!(a.len(), 4);
        assert_eq!(b.len(), 4);
    }

    #[test]
    fn test_render_uses_pool() {
        let kind = TransitionKind::Wipe { axis: WipeAxis::Horizontal, reverse: false };
        let out = engine(false)
            .render(&kind, &solid(3, [0, 0, 0]), Some(&solid(3, [9, 9, 9])))
            .unwrap();
        assert_eq!(out.duration(), 3);
        assert_eq!(out.frames()[2], solid(1, [9, 9, 9])[0]);
    }

    #[tokio::test]
    async fn test_compose_dissolve_end_to_end() {
        let dir = tempdir().unwrap();
        let (first, second, out) = (dir.path().join("a"), dir.path().join("b"), dir.path().join("out"));
        write_clip(&first, 4, [0, 0, 0]);
        write_clip(&second, 6, [255, 255, 255]);

        let saved = engine(true)
            .compose(&TransitionKind::Dissolve { gamma: 0.0 }, &[first, second], &out)
            .await
            .unwrap();
        assert_eq!(saved.frame_count, 4);

        let loaded = SequenceLoader::new(["png"]).load_dir(&out).unwrap();
        let means: Vec<f64> = loaded.iter().map(Frame::mean).collect();
        assert_eq!(means, vec![0.0, 64.0, 128.0, 191.0]);
    }

    #[tokio::test]
    async fn test_compose_checks_input_count() {
        let dir = tempdir().unwrap();
        let result = engine(false)
            .compose(
                &TransitionKind::Fade { gamma: 0.0, fade_in: true },
                &[dir.path().join("a"), dir.path().join("b")],
                dir.path().join("out"),
            )
            .await;
        assert!(matches!(
            result,
            Err(TransitionsError::Transition(TransitionError::InvalidParameter { .. }))
        ));
    }

    #[tokio::test]
    async fn test_compose_missing_input_dir() {
        let dir = tempdir().unwrap();
        let result = engine(false)
            .compose(
                &TransitionKind::Iris { iris_in: true, smoothing: None },
                &[dir.path().join("nothing")],
                dir.path().join("out"),
            )
            .await;
        assert!(result.is_err());
        assert!(!dir.path().join("out").exists());
    }
}
