use thiserror::Error;

use crate::frame::FrameShape;

/// Main error type for the frame-transitions library
#[derive(Error, Debug)]
pub enum TransitionsError {
    #[error("Transition error: {0}")]
    Transition(#[from] TransitionError),

    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Errors raised by the transition generators before any output is produced
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransitionError {
    #[error("Frame shape mismatch at index {index}: expected {expected}, found {found}")]
    ShapeMismatch {
        index: usize,
        expected: FrameShape,
        found: FrameShape,
    },

    #[error("Sequence length mismatch: expected {expected} frames, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("Invalid transition parameter: {details}")]
    InvalidParameter { details: String },
}

/// Frame buffer and frame file errors
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Frame buffer has {actual} bytes, shape requires {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Unsupported channel count: {channels}")]
    UnsupportedChannels { channels: u8 },

    #[error("Invalid frame dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Failed to load frame: {path} - {reason}")]
    LoadFailed { path: String, reason: String },

    #[error("Failed to save frame: {path} - {reason}")]
    SaveFailed { path: String, reason: String },

    #[error("No frames found in directory: {path}")]
    NoFramesFound { path: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {key}")]
    MissingKey { key: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using TransitionsError
pub type Result<T> = std::result::Result<T, TransitionsError>;

impl TransitionError {
    pub(crate) fn invalid<S: Into<String>>(details: S) -> Self {
        Self::InvalidParameter {
            details: details.into(),
        }
    }
}

impl TransitionsError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Check if this error is recoverable (can be retried)
    ///
    /// Transition errors are deterministic: the same inputs fail the same way.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::Frame(FrameError::LoadFailed { .. }) => true,
            Self::Frame(FrameError::SaveFailed { .. }) => true,
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Transition(TransitionError::LengthMismatch { expected, found }) => {
                format!(
                    "The two clips have different lengths ({} and {} frames). Trim them to the same length or enable input.trim_to_shortest.",
                    expected, found
                )
            }
            Self::Frame(FrameError::NoFramesFound { path }) => {
                format!("No image frames found in '{}'. Expected files such as 0.jpg, 1.jpg, ...", path)
            }
            Self::Frame(FrameError::LoadFailed { path, .. }) => {
                format!("Could not load frame '{}'. Please check the file exists and is a supported image format.", path)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
