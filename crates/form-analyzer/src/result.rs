//! Form analysis results

use exercise_registry::{FormStatus, MuscleGroup};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Outcome of one checkpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointResult {
    pub id: String,
    pub label: String,
    pub weight: f64,
    /// 0-100
    pub score: f64,
    pub passed: bool,
    pub message: String,
    pub related_muscles: Vec<MuscleGroup>,
}

/// Form assessment of one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResult {
    /// Weighted checkpoint average, rounded (0-100)
    pub overall_score: f64,
    pub status: FormStatus,
    pub checkpoints: Vec<CheckpointResult>,
    /// Muscles attached to failed checkpoints
    pub wrong_muscles: BTreeSet<MuscleGroup>,
    /// Muscles the exercise trains
    pub active_muscles: Vec<MuscleGroup>,
    /// Messages of failed checkpoints, in checkpoint order
    pub corrections: Vec<String>,
}

impl FormResult {
    /// Whether the overall status is `Good`
    pub fn is_good(&self) -> bool {
        self.status == FormStatus::Good
    }

    /// Checkpoints that scored below the pass threshold
    pub fn failed_checkpoints(&self) -> impl Iterator<Item = &CheckpointResult> {
        self.checkpoints.iter().filter(|c| !c.passed)
    }

    /// Checkpoint by id
    pub fn checkpoint(&self, id: &str) -> Option<&CheckpointResult> {
        self.checkpoints.iter().find(|c| c.id == id)
    }
}
