//! Exercise Registry
//!
//! One strongly-typed table per exercise: its classification rule, alias
//! target, form criteria and trained muscles all hang off [`ExerciseId`], so
//! the lookups used by classification and form scoring cannot drift apart.

mod criteria;
mod exercise;
mod muscles;
mod registry;
mod rules;
mod scoring;
mod status;

pub use criteria::{Checkpoint, CheckpointOutcome, FormCriteria, GENERIC_CRITERIA};
pub use exercise::ExerciseId;
pub use muscles::MuscleGroup;
pub use registry::ExerciseEntry;
pub use rules::{Condition, ExerciseRule, Metric, ScoreTerm, GENERIC_RULE};
pub use scoring::{above_score, below_score, range_score, PASS_THRESHOLD};
pub use status::{FormStatus, GOOD_THRESHOLD, WARNING_THRESHOLD};

use std::collections::HashMap;
use thiserror::Error;

/// Learned score adjustments per exercise
pub type Boosts = HashMap<ExerciseId, f64>;

/// Registry lookup errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Unknown exercise key: {0}")]
    UnknownExercise(String),
}
