//! Persisted records and derived reports

use feature_engine::{AngleSnapshot, FEATURE_COUNT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One user correction.
///
/// Labels are kept as the raw exercise keys so entries written by newer
/// builds (with exercises this build does not know) still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionEntry {
    pub feature_snapshot: AngleSnapshot,
    /// Full training vector; absent in entries from older builds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_feature_snapshot: Option<Vec<f64>>,
    pub correct_label: String,
    #[serde(rename = "aiGuessedLabel")]
    pub ai_guess_label: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

/// Row for the offline trainer, features in training layout order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub features: [f64; FEATURE_COUNT],
    pub label: String,
    pub timestamp: i64,
}

/// How often one guess was corrected to one label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Confusion {
    pub ai_guess: String,
    pub correct_label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStats {
    pub total_corrections: usize,
    /// Corrections per correct label
    pub per_exercise_counts: BTreeMap<String, usize>,
    /// Most frequent first
    pub confusions: Vec<Confusion>,
}

impl LearningStats {
    pub(crate) fn from_entries<'a>(entries: impl IntoIterator<Item = &'a CorrectionEntry>) -> Self {
        let mut stats = Self::default();
        let mut pairs: BTreeMap<(&str, &str), usize> = BTreeMap::new();

        for entry in entries {
            stats.total_corrections += 1;
            *stats
                .per_exercise_counts
                .entry(entry.correct_label.clone())
                .or_default() += 1;
            if entry.ai_guess_label != entry.correct_label {
                *pairs
                    .entry((entry.ai_guess_label.as_str(), entry.correct_label.as_str()))
                    .or_default() += 1;
            }
        }

        stats.confusions = pairs
            .into_iter()
            .map(|((guess, correct), count)| Confusion {
                ai_guess: guess.to_string(),
                correct_label: correct.to_string(),
                count,
            })
            .collect();
        // stable: equal counts stay in key order
        stats.confusions.sort_by(|a, b| b.count.cmp(&a.count));
        stats
    }
}
