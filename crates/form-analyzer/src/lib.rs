//! Form Analyzer
//!
//! Scores a pose against the weighted checkpoints of an exercise and turns
//! failed checkpoints into corrective messages and flagged muscle groups.

mod analyzer;
mod result;

pub use analyzer::{PoseAnalyzer, DEFAULT_FORM_SCORE};
pub use result::{CheckpointResult, FormResult};
