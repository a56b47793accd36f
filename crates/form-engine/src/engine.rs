//! Engine facade

use crate::config::{ClassifierBackend, ClassifierConfig, EngineConfig};
use crate::EngineError;
use exercise_classifier::{ClassificationResult, Classify, HeuristicClassifier, NeuralClassifier};
use exercise_registry::ExerciseId;
use feature_engine::{Landmark, PoseDetection};
use form_analyzer::{FormResult, PoseAnalyzer};
use learning_store::{
    FileStore, KeyValueStore, LearningConfig, LearningStats, LearningStore, MemoryStore,
    TrainingSample,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Classification and form assessment of one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameReport {
    /// Exercise the form was scored against
    pub exercise: ExerciseId,
    pub classification: ClassificationResult,
    pub form: FormResult,
}

/// Exercise recognition and form feedback.
///
/// Per-frame methods take `&self` and never fail; degraded frames produce
/// the documented fallback results.
pub struct FormEngine {
    classifier: Box<dyn Classify>,
    analyzer: PoseAnalyzer,
    learning: LearningStore,
}

impl FormEngine {
    /// Build the configured classifier and open the correction history.
    ///
    /// An unusable storage directory falls back to in-memory corrections.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let classifier = build_classifier(&config.classifier)?;
        let learning = open_learning(config.learning);
        Ok(Self::with_parts(classifier, learning))
    }

    /// Assemble from already-built parts
    pub fn with_parts(classifier: Box<dyn Classify>, learning: LearningStore) -> Self {
        info!(
            classifier = classifier.name(),
            corrections = learning.len(),
            "Form engine ready"
        );
        Self {
            classifier,
            analyzer: PoseAnalyzer::new(),
            learning,
        }
    }

    /// Backend name of the active classifier
    pub fn classifier_name(&self) -> &'static str {
        self.classifier.name()
    }

    /// Correction history backing the learned boosts
    pub fn learning(&self) -> &LearningStore {
        &self.learning
    }

    /// Classify the exercise, with learned boosts applied
    pub fn classify_exercise(&self, landmarks: &[Landmark]) -> ClassificationResult {
        let boosts = self.learning.learned_boosts(landmarks);
        self.classifier.classify(landmarks, &boosts)
    }

    /// Score form against a string exercise key; unknown keys get the
    /// generic criteria
    pub fn analyze_pose(&self, landmarks: &[Landmark], exercise_key: &str) -> FormResult {
        self.analyzer.analyze_pose(landmarks, exercise_key)
    }

    /// Score form against the criteria registered for `exercise`
    pub fn analyze(&self, landmarks: &[Landmark], exercise: ExerciseId) -> FormResult {
        self.analyzer.analyze(landmarks, exercise)
    }

    /// Classify, then score form against `selected` or, when the user has not
    /// picked an exercise, the classified one
    pub fn process(&self, detection: &PoseDetection, selected: Option<ExerciseId>) -> FrameReport {
        if detection.is_fallback {
            debug!(
                landmarks = detection.landmarks.len(),
                "Processing fallback detection"
            );
        }

        let classification = if detection.is_complete() {
            self.classify_exercise(&detection.landmarks)
        } else {
            debug!(
                landmarks = detection.landmarks.len(),
                "Incomplete detection, skipping classification"
            );
            ClassificationResult::fallback()
        };
        let exercise = selected.unwrap_or(classification.key);
        let form = self.analyzer.analyze(&detection.landmarks, exercise);

        FrameReport {
            exercise,
            classification,
            form,
        }
    }

    /// Record that the pose was `correct` while the classifier said `ai_guess`
    pub fn record_correction(
        &self,
        landmarks: &[Landmark],
        correct: ExerciseId,
        ai_guess: ExerciseId,
    ) {
        self.learning
            .record_correction(landmarks, correct.key(), ai_guess.key());
    }

    /// String-keyed variant; labels are stored as given
    pub fn record_correction_labels(
        &self,
        landmarks: &[Landmark],
        correct_label: &str,
        ai_guess_label: &str,
    ) {
        self.learning
            .record_correction(landmarks, correct_label, ai_guess_label);
    }

    /// Totals and per-label counts of recorded corrections
    pub fn learning_stats(&self) -> LearningStats {
        self.learning.stats()
    }

    /// Corrections in the offline trainer's feature layout
    pub fn export_for_training(&self) -> Vec<TrainingSample> {
        self.learning.export_for_training()
    }

    /// Forget every recorded correction
    pub fn clear_learning(&self) {
        self.learning.clear();
    }
}

fn build_classifier(config: &ClassifierConfig) -> Result<Box<dyn Classify>, EngineError> {
    match config.backend {
        ClassifierBackend::Heuristic => Ok(Box::new(HeuristicClassifier::new())),
        ClassifierBackend::Neural => {
            let path = config
                .model_path
                .as_deref()
                .ok_or(EngineError::MissingModelPath)?;
            Ok(Box::new(NeuralClassifier::load(path)?))
        }
    }
}

fn open_learning(config: LearningConfig) -> LearningStore {
    let backend: Box<dyn KeyValueStore> = match &config.storage_dir {
        Some(dir) => match FileStore::open(dir) {
            Ok(store) => Box::new(store),
            Err(e) => {
                warn!("Corrections will not be persisted: {}", e);
                Box::new(MemoryStore::new())
            }
        },
        None => Box::new(MemoryStore::new()),
    };
    LearningStore::open(backend, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::fixtures;
    use std::fs;
    use std::path::PathBuf;

    fn engine() -> FormEngine {
        FormEngine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_default_engine() {
        let engine = engine();
        assert_eq!(engine.classifier_name(), "heuristic");
        assert!(engine.learning().is_empty());
    }

    #[test]
    fn test_neural_requires_model_path() {
        let mut config = EngineConfig::default();
        config.classifier.backend = ClassifierBackend::Neural;
        assert!(matches!(
            FormEngine::new(config),
            Err(EngineError::MissingModelPath)
        ));
    }

    #[test]
    fn test_neural_missing_model_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = EngineConfig::default();
        config.classifier.backend = ClassifierBackend::Neural;
        config.classifier.model_path = Some(dir.path().join("absent.json"));
        assert!(matches!(FormEngine::new(config), Err(EngineError::Model(_))));
    }

    #[test]
    fn test_unusable_storage_dir_keeps_working() {
        let dir = tempfile::tempdir().unwrap();
        let blocker: PathBuf = dir.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();

        let mut config = EngineConfig::default();
        config.learning.storage_dir = Some(blocker);
        let engine = FormEngine::new(config).unwrap();

        let squat = fixtures::squat();
        engine.record_correction(&squat, ExerciseId::Lunge, ExerciseId::Squat);
        assert_eq!(engine.learning_stats().total_corrections, 1);
    }

    #[test]
    fn test_process_uses_selected_exercise() {
        let engine = engine();
        let detection = PoseDetection::new(fixtures::squat());

        let auto = engine.process(&detection, None);
        assert_eq!(auto.exercise, ExerciseId::Squat);
        assert_eq!(auto.form.checkpoints.len(), 5);

        let chosen = engine.process(&detection, Some(ExerciseId::PushUp));
        assert_eq!(chosen.exercise, ExerciseId::PushUp);
        assert_eq!(chosen.classification.key, ExerciseId::Squat);
        assert!(chosen.form.checkpoint("hip_height").is_some());
    }

    #[test]
    fn test_incomplete_detection_reports_fallbacks() {
        let engine = engine();
        let mut landmarks = fixtures::squat();
        landmarks.truncate(20);
        let detection = PoseDetection::new(landmarks);
        assert!(!detection.is_complete());

        let report = engine.process(&detection, None);
        assert_eq!(report.classification, ClassificationResult::fallback());
        assert_eq!(report.exercise, ExerciseId::FALLBACK);
        assert_eq!(report.form.overall_score, form_analyzer::DEFAULT_FORM_SCORE);
        assert!(report.form.checkpoints.is_empty());
    }

    #[test]
    fn test_fallback_detection_same_path() {
        let engine = engine();
        let mut detection = PoseDetection::new(fixtures::squat());
        let regular = engine.process(&detection, None);
        detection.is_fallback = true;
        assert_eq!(engine.process(&detection, None), regular);
    }

    #[test]
    fn test_string_labels_pass_through() {
        let engine = engine();
        engine.record_correction_labels(&fixtures::squat(), "frontSquat", "squat");
        let stats = engine.learning_stats();
        assert_eq!(stats.per_exercise_counts.get("frontSquat"), Some(&1));
    }
}
