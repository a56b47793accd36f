//! Form Engine
//!
//! Entry point for hosts running a pose detector: classifies the exercise in
//! each frame, scores its form, and learns from the user's corrections.
//!
//! ```no_run
//! use form_engine::{EngineConfig, FormEngine, init_logging};
//!
//! let config = EngineConfig::load(None)?;
//! init_logging(&config.logging)?;
//! let engine = FormEngine::new(config)?;
//! # Ok::<(), form_engine::EngineError>(())
//! ```

mod config;
mod engine;
mod logging;
mod throttle;

pub use crate::config::{
    ClassifierBackend, ClassifierConfig, EngineConfig, LoggingConfig, ThrottleConfig,
};
pub use engine::{FormEngine, FrameReport};
pub use logging::init_logging;
pub use throttle::FrameThrottle;

pub use exercise_classifier::{ClassificationResult, ScoredExercise};
pub use exercise_registry::{ExerciseId, FormStatus, MuscleGroup};
pub use feature_engine::{Landmark, PoseDetection};
pub use form_analyzer::{CheckpointResult, FormResult};
pub use learning_store::{LearningConfig, LearningStats, TrainingSample};

use thiserror::Error;

/// Engine setup errors. Per-frame operations never fail.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Neural backend selected but no model path configured")]
    MissingModelPath,

    #[error("Model error: {0}")]
    Model(#[from] exercise_classifier::ModelError),

    #[error("Logging error: {0}")]
    Logging(String),
}
