//! Correction history and learned boosts

use crate::config::LearningConfig;
use crate::entry::{CorrectionEntry, LearningStats, TrainingSample};
use crate::kv::KeyValueStore;
use crate::LearningError;
use exercise_registry::{Boosts, ExerciseId};
use feature_engine::{FeatureExtractor, Landmark, FEATURE_COUNT};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Bounded, persisted list of user corrections.
///
/// Every mutation runs its trim-and-persist sequence under one lock, so the
/// store can be shared across threads. Persistence failures are logged and
/// otherwise ignored; the in-memory list stays authoritative.
pub struct LearningStore {
    backend: Box<dyn KeyValueStore>,
    config: LearningConfig,
    extractor: FeatureExtractor,
    entries: Mutex<VecDeque<CorrectionEntry>>,
}

impl LearningStore {
    /// Load persisted corrections. Missing, unreadable or corrupt data
    /// starts an empty history.
    pub fn open(backend: Box<dyn KeyValueStore>, config: LearningConfig) -> Self {
        let mut entries = match load(backend.as_ref(), &config.storage_key) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Discarding stored corrections: {}", e);
                VecDeque::new()
            }
        };
        while entries.len() > config.max_entries {
            entries.pop_front();
        }

        info!(
            entries = entries.len(),
            max_entries = config.max_entries,
            "Learning store opened"
        );

        Self {
            backend,
            config,
            extractor: FeatureExtractor::new(),
            entries: Mutex::new(entries),
        }
    }

    /// Active learning configuration
    pub fn config(&self) -> &LearningConfig {
        &self.config
    }

    /// Remember that `landmarks` showed `correct_label` while the classifier
    /// said `ai_guess_label`. Frames without enough landmarks are ignored.
    pub fn record_correction(
        &self,
        landmarks: &[Landmark],
        correct_label: &str,
        ai_guess_label: &str,
    ) {
        let features = match self.extractor.extract(landmarks) {
            Ok(features) => features,
            Err(e) => {
                debug!("Correction not recorded: {}", e);
                return;
            }
        };

        let entry = CorrectionEntry {
            feature_snapshot: features.angle_snapshot(),
            full_feature_snapshot: Some(features.to_training_vector().to_vec()),
            correct_label: correct_label.to_string(),
            ai_guess_label: ai_guess_label.to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        };

        let mut entries = self.lock();
        entries.push_back(entry);
        while entries.len() > self.config.max_entries {
            entries.pop_front();
        }
        debug!(
            correct = correct_label,
            guess = ai_guess_label,
            total = entries.len(),
            "Recorded correction"
        );
        self.persist(&entries);
    }

    /// Score adjustments from corrections whose pose resembles `landmarks`.
    ///
    /// Each entry closer than the similarity threshold adds
    /// `(1 - d / threshold) * boost_scale` to its correct label and subtracts
    /// `penalty_ratio` of that from its wrong guess. Labels this build does
    /// not know are skipped. Reads never modify the store.
    pub fn learned_boosts(&self, landmarks: &[Landmark]) -> Boosts {
        let mut boosts = Boosts::new();
        let Ok(features) = self.extractor.extract(landmarks) else {
            return boosts;
        };
        let query = features.angle_snapshot();
        let threshold = self.config.similarity_threshold;

        for entry in self.lock().iter() {
            let distance = query.distance(&entry.feature_snapshot);
            if distance.is_nan() || distance >= threshold {
                continue;
            }
            let boost = (1.0 - distance / threshold) * self.config.boost_scale;
            if let Ok(correct) = entry.correct_label.parse::<ExerciseId>() {
                *boosts.entry(correct).or_insert(0.0) += boost;
            }
            if let Ok(guess) = entry.ai_guess_label.parse::<ExerciseId>() {
                *boosts.entry(guess).or_insert(0.0) -= boost * self.config.penalty_ratio;
            }
        }
        boosts
    }

    /// Totals, per-label counts and the most frequent confusions
    pub fn stats(&self) -> LearningStats {
        LearningStats::from_entries(self.lock().iter())
    }

    /// Corrections carrying a full feature vector, oldest first
    pub fn export_for_training(&self) -> Vec<TrainingSample> {
        self.lock()
            .iter()
            .filter_map(|entry| {
                let full = entry.full_feature_snapshot.as_deref()?;
                let features: [f64; FEATURE_COUNT] = full.try_into().ok()?;
                Some(TrainingSample {
                    features,
                    label: entry.correct_label.clone(),
                    timestamp: entry.timestamp,
                })
            })
            .collect()
    }

    /// Forget every correction
    pub fn clear(&self) {
        let mut entries = self.lock();
        entries.clear();
        info!("Cleared correction history");
        self.persist(&entries);
    }

    /// Snapshot of the stored corrections, oldest first
    pub fn entries(&self) -> Vec<CorrectionEntry> {
        self.lock().iter().cloned().collect()
    }

    /// Number of stored corrections
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no corrections are stored
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<CorrectionEntry>> {
        // The list stays consistent even if a holder panicked
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, entries: &VecDeque<CorrectionEntry>) {
        if let Err(e) = save(self.backend.as_ref(), &self.config.storage_key, entries) {
            warn!("Failed to persist corrections: {}", e);
        }
    }
}

fn load(
    backend: &dyn KeyValueStore,
    key: &str,
) -> Result<VecDeque<CorrectionEntry>, LearningError> {
    match backend.get(key)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(VecDeque::new()),
    }
}

fn save(
    backend: &dyn KeyValueStore,
    key: &str,
    entries: &VecDeque<CorrectionEntry>,
) -> Result<(), LearningError> {
    let json = serde_json::to_string(entries)?;
    backend.set(key, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{FileStore, MemoryStore};
    use crate::StoreError;
    use feature_engine::{fixtures, AngleSnapshot};
    use std::sync::Arc;

    /// Backend that refuses everything, like storage in private browsing
    struct Unavailable;

    impl KeyValueStore for Unavailable {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("disabled".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("disabled".to_string()))
        }
    }

    fn memory_store() -> LearningStore {
        LearningStore::open(Box::new(MemoryStore::new()), LearningConfig::default())
    }

    #[test]
    fn test_correction_boosts_and_penalizes() {
        let store = memory_store();
        let squat = fixtures::squat();
        store.record_correction(&squat, "lunge", "squat");

        let boosts = store.learned_boosts(&squat);
        // identical pose: distance 0, full boost and half penalty
        assert!((boosts[&ExerciseId::Lunge] - 30.0).abs() < 1e-9);
        assert!((boosts[&ExerciseId::Squat] + 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_distant_pose_is_not_boosted() {
        let store = memory_store();
        store.record_correction(&fixtures::squat(), "lunge", "squat");
        assert!(store.learned_boosts(&fixtures::plank()).is_empty());
    }

    /// Correction whose snapshot sits `knee_offset` degrees from `query`
    fn entry_near(query: AngleSnapshot, knee_offset: f64) -> CorrectionEntry {
        let mut angles = query.0;
        angles[0] += knee_offset;
        CorrectionEntry {
            feature_snapshot: AngleSnapshot(angles),
            full_feature_snapshot: None,
            correct_label: "lunge".to_string(),
            ai_guess_label: "squat".to_string(),
            timestamp: 1,
        }
    }

    fn store_with(entries: &[CorrectionEntry], config: LearningConfig) -> LearningStore {
        let backend = MemoryStore::new();
        backend
            .set(&config.storage_key, &serde_json::to_string(entries).unwrap())
            .unwrap();
        LearningStore::open(Box::new(backend), config)
    }

    fn squat_snapshot() -> AngleSnapshot {
        FeatureExtractor::new()
            .extract(&fixtures::squat())
            .unwrap()
            .angle_snapshot()
    }

    #[test]
    fn test_boost_falls_off_with_distance() {
        let query = squat_snapshot();
        let entry = entry_near(query, 10.0);
        let distance = query.distance(&entry.feature_snapshot);
        assert!((distance - 10.0).abs() < 1e-9);

        let store = store_with(&[entry], LearningConfig::default());
        let boosts = store.learned_boosts(&fixtures::squat());
        // (1 - 10 / 25) * 30 = 18, penalty half of that
        assert!((boosts[&ExerciseId::Lunge] - 18.0).abs() < 1e-6);
        assert!((boosts[&ExerciseId::Squat] + 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_threshold_distance_is_excluded() {
        let query = squat_snapshot();
        let entry = entry_near(query, 12.0);
        let distance = query.distance(&entry.feature_snapshot);

        let at_threshold = LearningConfig {
            similarity_threshold: distance,
            ..Default::default()
        };
        let store = store_with(&[entry.clone()], at_threshold);
        assert!(store.learned_boosts(&fixtures::squat()).is_empty());

        let just_inside = LearningConfig {
            similarity_threshold: distance + 1e-6,
            ..Default::default()
        };
        let store = store_with(&[entry], just_inside);
        let boosts = store.learned_boosts(&fixtures::squat());
        assert!(boosts[&ExerciseId::Lunge] > 0.0);
        assert!(boosts[&ExerciseId::Lunge] < 1e-3);
    }

    #[test]
    fn test_presets_change_match_radius() {
        let query = squat_snapshot();
        let entry = entry_near(query, 20.0);
        let distance = query.distance(&entry.feature_snapshot);
        let boost = |config: LearningConfig| {
            store_with(&[entry.clone()], config)
                .learned_boosts(&fixtures::squat())
                .get(&ExerciseId::Lunge)
                .copied()
        };

        assert_eq!(boost(LearningConfig::strict()), None);

        let default = boost(LearningConfig::default()).unwrap();
        assert!((default - (1.0 - distance / 25.0) * 30.0).abs() < 1e-9);

        let lenient = boost(LearningConfig::lenient()).unwrap();
        assert!((lenient - (1.0 - distance / 35.0) * 30.0).abs() < 1e-9);
        assert!(lenient > default);
    }

    #[test]
    fn test_matches_accumulate() {
        let store = memory_store();
        let squat = fixtures::squat();
        store.record_correction(&squat, "lunge", "squat");
        store.record_correction(&squat, "lunge", "squat");
        let boosts = store.learned_boosts(&squat);
        assert!((boosts[&ExerciseId::Lunge] - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_boost_read_is_idempotent() {
        let store = memory_store();
        let squat = fixtures::squat();
        store.record_correction(&squat, "lunge", "squat");
        let first = store.learned_boosts(&squat);
        let second = store.learned_boosts(&squat);
        assert_eq!(first, second);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_fifo_cap() {
        let config = LearningConfig {
            max_entries: 3,
            ..Default::default()
        };
        let store = LearningStore::open(Box::new(MemoryStore::new()), config);
        let squat = fixtures::squat();
        for label in ["lunge", "plank", "deadlift", "pushUp", "burpee"] {
            store.record_correction(&squat, label, "squat");
        }
        let labels: Vec<_> = store.entries().into_iter().map(|e| e.correct_label).collect();
        assert_eq!(labels, vec!["deadlift", "pushUp", "burpee"]);
    }

    #[test]
    fn test_short_input_is_ignored() {
        let store = memory_store();
        store.record_correction(&[], "lunge", "squat");
        assert!(store.is_empty());
        assert!(store.learned_boosts(&[]).is_empty());
    }

    #[test]
    fn test_unknown_labels_are_kept_but_not_boosted() {
        let store = memory_store();
        let squat = fixtures::squat();
        store.record_correction(&squat, "zumba", "squat");
        let boosts = store.learned_boosts(&squat);
        assert_eq!(boosts.len(), 1);
        assert!(boosts[&ExerciseId::Squat] < 0.0);
        assert_eq!(store.stats().per_exercise_counts["zumba"], 1);
    }

    #[test]
    fn test_unavailable_backend_is_swallowed() {
        let store = LearningStore::open(Box::new(Unavailable), LearningConfig::default());
        let squat = fixtures::squat();
        store.record_correction(&squat, "lunge", "squat");
        assert_eq!(store.len(), 1);
        assert!(store.learned_boosts(&squat)[&ExerciseId::Lunge] > 0.0);
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_persistence_across_instances() {
        let shared = Arc::new(MemoryStore::new());
        let squat = fixtures::squat();
        {
            let store = LearningStore::open(Box::new(shared.clone()), LearningConfig::default());
            store.record_correction(&squat, "lunge", "squat");
        }
        let reopened = LearningStore::open(Box::new(shared), LearningConfig::default());
        assert_eq!(reopened.len(), 1);
        assert!(reopened.learned_boosts(&squat)[&ExerciseId::Lunge] > 0.0);
    }

    #[test]
    fn test_file_backed_store() {
        let dir = tempfile::tempdir().unwrap();
        let squat = fixtures::squat();
        {
            let backend = FileStore::open(dir.path()).unwrap();
            let store = LearningStore::open(Box::new(backend), LearningConfig::default());
            store.record_correction(&squat, "lunge", "squat");
        }
        let backend = FileStore::open(dir.path()).unwrap();
        let store = LearningStore::open(Box::new(backend), LearningConfig::default());
        assert_eq!(store.entries()[0].correct_label, "lunge");
    }

    #[test]
    fn test_corrupt_data_starts_empty() {
        let backend = MemoryStore::new();
        backend.set("formcheck_corrections", "{not json").unwrap();
        let store = LearningStore::open(Box::new(backend), LearningConfig::default());
        assert!(store.is_empty());
    }

    #[test]
    fn test_export_for_training() {
        let store = memory_store();
        store.record_correction(&fixtures::squat(), "lunge", "squat");
        let samples = store.export_for_training();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].label, "lunge");
        assert!((samples[0].features[0] - 90.0).abs() < 2.0);
    }

    #[test]
    fn test_export_skips_entries_without_full_snapshot() {
        let backend = MemoryStore::new();
        backend
            .set(
                "formcheck_corrections",
                r#"[{"featureSnapshot":[90,100,170,30,10],"correctLabel":"lunge","aiGuessedLabel":"squat","timestamp":1}]"#,
            )
            .unwrap();
        let store = LearningStore::open(Box::new(backend), LearningConfig::default());
        assert_eq!(store.len(), 1);
        assert!(store.export_for_training().is_empty());
    }

    #[test]
    fn test_clear_persists() {
        let shared = Arc::new(MemoryStore::new());
        let store = LearningStore::open(Box::new(shared.clone()), LearningConfig::default());
        store.record_correction(&fixtures::squat(), "lunge", "squat");
        store.clear();
        assert_eq!(shared.get("formcheck_corrections").unwrap().as_deref(), Some("[]"));
    }
}
