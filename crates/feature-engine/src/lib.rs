//! Pose Feature Engine
//!
//! Turns the 33-point body landmark array produced by the pose detector into
//! the geometric features used by exercise classification and form scoring.

mod features;
mod geometry;
mod landmarks;
mod measurements;
mod normalization;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use features::{
    AngleSnapshot, FeatureExtractor, FeatureVector, FEATURE_COUNT, FEATURE_NAMES,
    HORIZONTAL_MIN_LEAN, UPRIGHT_MAX_LEAN, WRIST_BAND, WRIST_LEVEL_TOLERANCE,
};
pub use geometry::{
    angle_deg, distance, mid, tilt_from_horizontal, tilt_from_vertical, Point, DEGENERATE_ANGLE,
};
pub use landmarks::{Landmark, PoseDetection, PoseLandmark, LANDMARK_COUNT, MIN_LANDMARKS};
pub use measurements::{PoseMeasurements, MIN_SIDE_SPAN};
pub use normalization::FeatureNormalization;

use thiserror::Error;

/// Feature extraction errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// Fewer landmarks than the extractor needs; callers treat this as
    /// "cannot classify this frame".
    #[error("Insufficient landmarks: need at least {required}, got {actual}")]
    InsufficientLandmarks { required: usize, actual: usize },

    /// Normalization parameters do not match the feature layout
    #[error("Normalization expects {expected} features, got {actual}")]
    NormalizationShape { expected: usize, actual: usize },
}
