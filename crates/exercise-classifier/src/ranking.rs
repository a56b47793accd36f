//! Score ranking shared by both backends

use exercise_registry::{Boosts, ExerciseId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Maps raw heuristic scores (rarely above ~90) onto the 0-100 confidence
/// range. Tunable.
pub const CONFIDENCE_CALIBRATION: f64 = 1.1;

/// Number of ranked candidates reported
pub const TOP_K: usize = 3;

/// One ranked candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredExercise {
    pub key: ExerciseId,
    pub score: f64,
}

/// Outcome of classifying one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub key: ExerciseId,
    /// 0-100
    pub confidence: u8,
    pub top3: Vec<ScoredExercise>,
    /// Learned boosts changed at least one score
    pub used_learning: bool,
}

impl ClassificationResult {
    /// Result for frames that cannot be classified
    pub fn fallback() -> Self {
        Self {
            key: ExerciseId::FALLBACK,
            confidence: 0,
            top3: Vec::new(),
            used_learning: false,
        }
    }
}

/// Apply boosts and rank candidates.
///
/// `scores` must be in registration order; equal scores keep that order.
/// A boosted score is floored at zero, unboosted scores are left as-is.
pub fn rank_scores(scores: Vec<(ExerciseId, f64)>, boosts: &Boosts) -> ClassificationResult {
    let mut used_learning = false;
    let mut ranked: Vec<ScoredExercise> = scores
        .into_iter()
        .map(|(key, score)| match boosts.get(&key) {
            Some(boost) if *boost != 0.0 => {
                used_learning = true;
                ScoredExercise {
                    key,
                    score: (score + boost).max(0.0),
                }
            }
            _ => ScoredExercise { key, score },
        })
        .collect();

    // sort_by is stable; -0.0 and 0.0 compare equal
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranked.truncate(TOP_K);

    let Some(best) = ranked.first() else {
        return ClassificationResult::fallback();
    };

    ClassificationResult {
        key: best.key,
        confidence: confidence(best.score),
        top3: ranked,
        used_learning,
    }
}

fn confidence(best_score: f64) -> u8 {
    let calibrated = (best_score * CONFIDENCE_CALIBRATION).clamp(0.0, 100.0);
    if calibrated.is_nan() {
        0
    } else {
        calibrated.round() as u8
    }
}
