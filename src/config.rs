use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, Result},
    transitions::{Smoothing, WipeAxis, DEFAULT_GAMMA},
};

/// Main configuration for frame-transitions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Worker pool settings
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Default transition parameters, overridable per run
    #[serde(default)]
    pub defaults: TransitionDefaults,

    /// How input frame directories are read
    #[serde(default)]
    pub input: InputConfig,

    /// How output frames are written
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.processing.validate()?;
        self.defaults.validate()?;
        self.input.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

/// Worker pool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Number of threads used to render frames; 1 renders strictly in order
    pub threads: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
        }
    }
}

impl ProcessingConfig {
    fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(ConfigError::InvalidValue {
                key: "processing.threads".to_string(),
                value: self.threads.to_string()
            }.into());
        }
        Ok(())
    }
}

/// Transition parameters used when a run doesn't specify them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionDefaults {
    /// Additive bias for dissolve and fade
    pub gamma: f32,

    /// Soften the iris edge with a Gaussian blur
    pub iris_smoothing: Option<Smoothing>,

    /// Wipe direction
    pub wipe_axis: WipeAxis,
}

impl Default for TransitionDefaults {
    fn default() -> Self {
        Self {
            gamma: DEFAULT_GAMMA,
            iris_smoothing: None,
            wipe_axis: WipeAxis::Horizontal,
        }
    }
}

impl TransitionDefaults {
    fn validate(&self) -> Result<()> {
        if !self.gamma.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: "defaults.gamma".to_string(),
                value: self.gamma.to_string()
            }.into());
        }

        if let Some(smoothing) = &self.iris_smoothing {
            if smoothing.validate().is_err() {
                return Err(ConfigError::InvalidValue {
                    key: "defaults.iris_smoothing.sigma".to_string(),
                    value: smoothing.sigma.to_string()
                }.into());
            }
        }

        Ok(())
    }
}

/// Input directory configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// File extensions treated as frames
    pub extensions: Vec<String>,

    /// Trim two inputs to the shorter one instead of failing on unequal lengths
    pub trim_to_shortest: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            extensions: vec![
                "png".to_string(),
                "jpg".to_string(),
                "jpeg".to_string(),
                "bmp".to_string(),
            ],
            trim_to_shortest: false,
        }
    }
}

impl InputConfig {
    fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            return Err(ConfigError::MissingKey {
                key: "input.extensions".to_string()
            }.into());
        }
        Ok(())
    }
}

/// Output directory configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Image format of written frames, by extension
    pub extension: String,

    /// Create the output directory when missing
    pub create_dirs: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            extension: "jpg".to_string(),
            create_dirs: true,
        }
    }
}

impl OutputConfig {
    fn validate(&self) -> Result<()> {
        let ext = self.extension.trim_start_matches('.').to_lowercase();
        if !matches!(ext.as_str(), "jpg" | "jpeg" | "png" | "bmp") {
            return Err(ConfigError::InvalidValue {
                key: "output.extension".to_string(),
                value: self.extension.clone()
            }.into());
        }
        Ok(())
    }
}
