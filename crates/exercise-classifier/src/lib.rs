//! Exercise Classifier
//!
//! Scores every registered exercise against a pose and ranks the results.
//! Two interchangeable backends share one output contract: the rule-based
//! [`HeuristicClassifier`] and the optional [`NeuralClassifier`] loaded from
//! an offline-trained artifact.

mod heuristic;
mod neural;
mod ranking;

pub use heuristic::HeuristicClassifier;
pub use neural::{Activation, BatchNorm, DenseLayer, ModelArtifact, NeuralClassifier};
pub use ranking::{rank_scores, ClassificationResult, ScoredExercise, CONFIDENCE_CALIBRATION, TOP_K};

use exercise_registry::Boosts;
use feature_engine::{FeatureError, Landmark};
use thiserror::Error;

/// A classification backend.
///
/// Never fails: frames that cannot be classified produce
/// [`ClassificationResult::fallback`].
pub trait Classify: Send + Sync {
    fn classify(&self, landmarks: &[Landmark], boosts: &Boosts) -> ClassificationResult;

    /// Backend name for logs
    fn name(&self) -> &'static str;
}

/// Errors loading or validating a neural model artifact
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to read model: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse model: {0}")]
    Parse(#[from] serde_json::Error),

    /// The model was trained on a different feature order
    #[error("Model feature layout does not match: expected {expected:?}, got {actual:?}")]
    FeatureLayoutMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Invalid normalization: {0}")]
    Normalization(#[from] FeatureError),

    #[error("Layer {layer}: expected {expected} values, got {actual}")]
    Shape {
        layer: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Model label is not a known exercise: {0}")]
    UnknownLabel(String),

    #[error("Invalid model: {0}")]
    Invalid(String),
}
