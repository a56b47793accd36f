//! Engine configuration

use crate::EngineError;
use config::{Config, Environment, File};
use learning_store::LearningConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix for environment overrides, e.g. `FORMCHECK_LEARNING__MAX_ENTRIES`
pub const ENV_PREFIX: &str = "FORMCHECK";

/// Full engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub classifier: ClassifierConfig,
    pub learning: LearningConfig,
    pub throttle: ThrottleConfig,
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Defaults, overlaid with `path` (TOML, JSON or YAML by extension) when
    /// given, then with `FORMCHECK_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, EngineError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// Which classifier implementation to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierBackend {
    #[default]
    Heuristic,
    Neural,
}

/// Classifier configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub backend: ClassifierBackend,

    /// Model artifact, required by the neural backend
    pub model_path: Option<PathBuf>,
}

/// Frame rate limiting for live video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Frames processed per second; 0 disables throttling
    pub max_fps: u32,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self { max_fps: 15 }
    }
}

/// Log output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum level: trace, debug, info, warn or error
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
