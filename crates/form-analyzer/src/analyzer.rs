//! Checkpoint evaluation

use crate::result::{CheckpointResult, FormResult};
use exercise_registry::{ExerciseId, FormCriteria, FormStatus, MuscleGroup, GENERIC_CRITERIA};
use feature_engine::{Landmark, PoseMeasurements};
use std::collections::BTreeSet;
use tracing::debug;

/// Score reported when a frame has too few landmarks to assess
pub const DEFAULT_FORM_SCORE: f64 = 85.0;

/// Stateless form analyzer
#[derive(Debug, Clone, Copy, Default)]
pub struct PoseAnalyzer;

impl PoseAnalyzer {
    /// Create a new analyzer
    pub fn new() -> Self {
        Self
    }

    /// Analyze against a string exercise key. Unknown keys are scored with
    /// the generic stability/alignment criteria.
    pub fn analyze_pose(&self, landmarks: &[Landmark], exercise_key: &str) -> FormResult {
        match exercise_key.parse::<ExerciseId>() {
            Ok(id) => self.analyze(landmarks, id),
            Err(_) => {
                debug!(exercise = exercise_key, "Unknown exercise, using generic criteria");
                self.analyze_with(landmarks, &GENERIC_CRITERIA, &[])
            }
        }
    }

    /// Analyze against the criteria registered for `exercise`
    pub fn analyze(&self, landmarks: &[Landmark], exercise: ExerciseId) -> FormResult {
        let entry = exercise.entry();
        self.analyze_with(landmarks, entry.form_criteria(), entry.primary_muscles)
    }

    /// Analyze against explicit criteria
    pub fn analyze_with(
        &self,
        landmarks: &[Landmark],
        criteria: &FormCriteria,
        active_muscles: &[MuscleGroup],
    ) -> FormResult {
        let measurements = match PoseMeasurements::from_landmarks(landmarks) {
            Ok(m) => m,
            Err(e) => {
                debug!("Form not assessed: {}", e);
                return default_result(active_muscles);
            }
        };

        let mut checkpoints = Vec::with_capacity(criteria.checkpoints.len());
        let mut wrong_muscles = BTreeSet::new();
        let mut corrections = Vec::new();
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;

        for checkpoint in criteria.checkpoints {
            let outcome = checkpoint.evaluate(&measurements);
            weighted_sum += outcome.score * checkpoint.weight;
            total_weight += checkpoint.weight;

            if !outcome.passed {
                wrong_muscles.extend(checkpoint.muscles.iter().copied());
                corrections.push(outcome.message.to_string());
            }

            checkpoints.push(CheckpointResult {
                id: checkpoint.id.to_string(),
                label: checkpoint.label.to_string(),
                weight: checkpoint.weight,
                score: outcome.score,
                passed: outcome.passed,
                message: outcome.message.to_string(),
                related_muscles: checkpoint.muscles.to_vec(),
            });
        }

        if total_weight <= 0.0 {
            return default_result(active_muscles);
        }

        let overall_score = (weighted_sum / total_weight).clamp(0.0, 100.0).round();
        let status = FormStatus::from_score(overall_score);
        debug!(
            score = overall_score,
            status = status.as_str(),
            failed = corrections.len(),
            "Form analyzed"
        );

        FormResult {
            overall_score,
            status,
            checkpoints,
            wrong_muscles,
            active_muscles: active_muscles.to_vec(),
            corrections,
        }
    }
}

fn default_result(active_muscles: &[MuscleGroup]) -> FormResult {
    FormResult {
        overall_score: DEFAULT_FORM_SCORE,
        status: FormStatus::from_score(DEFAULT_FORM_SCORE),
        checkpoints: Vec::new(),
        wrong_muscles: BTreeSet::new(),
        active_muscles: active_muscles.to_vec(),
        corrections: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::fixtures;
    use proptest::prelude::*;

    fn analyze(landmarks: &[Landmark], exercise: ExerciseId) -> FormResult {
        PoseAnalyzer::new().analyze(landmarks, exercise)
    }

    #[test]
    fn test_good_squat() {
        let result = analyze(&fixtures::squat(), ExerciseId::Squat);
        assert_eq!(result.overall_score, 100.0);
        assert_eq!(result.status, FormStatus::Good);
        assert!(result.corrections.is_empty());
        assert!(result.wrong_muscles.is_empty());
        assert_eq!(result.checkpoints.len(), 5);
        assert!(result.active_muscles.contains(&MuscleGroup::Quadriceps));
    }

    #[test]
    fn test_valgus_squat_flags_knees() {
        let result = analyze(&fixtures::valgus_squat(), ExerciseId::Squat);
        let knees = result.checkpoint("knee_alignment").unwrap();
        assert!(!knees.passed);
        assert!(result.wrong_muscles.contains(&MuscleGroup::Quadriceps));
        assert_eq!(result.corrections, vec!["Push your knees out over your toes"]);
        // 25-weight checkpoint at half score
        assert!((result.overall_score - 88.0).abs() < 1.0);
        assert_eq!(result.failed_checkpoints().count(), 1);
    }

    #[test]
    fn test_fixtures_score_well_on_their_exercise() {
        let cases = [
            (fixtures::lunge(), ExerciseId::Lunge),
            (fixtures::push_up(), ExerciseId::PushUp),
            (fixtures::plank(), ExerciseId::Plank),
            (fixtures::overhead_press(), ExerciseId::OverheadPress),
            (fixtures::lateral_raise(), ExerciseId::LateralRaise),
        ];
        for (landmarks, exercise) in cases {
            let result = analyze(&landmarks, exercise);
            assert!(result.is_good(), "{exercise}: {result:?}");
        }
    }

    #[test]
    fn test_wrong_exercise_lowers_score() {
        let result = analyze(&fixtures::squat(), ExerciseId::PushUp);
        assert_eq!(result.status, FormStatus::Warning);
        assert!(!result.checkpoint("hip_height").unwrap().passed);
        assert!(!result.corrections.is_empty());
    }

    #[test]
    fn test_insufficient_landmarks_default() {
        let result = analyze(&[Landmark::default(); 10], ExerciseId::Squat);
        assert_eq!(result.overall_score, DEFAULT_FORM_SCORE);
        assert_eq!(result.status, FormStatus::Good);
        assert!(result.corrections.is_empty());
        assert!(result.checkpoints.is_empty());
    }

    #[test]
    fn test_alias_uses_target_criteria() {
        let incline = analyze(&fixtures::standing(), ExerciseId::InclineBench);
        let bench = analyze(&fixtures::standing(), ExerciseId::BenchPress);
        let ids: Vec<_> = incline.checkpoints.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["wrist_stack", "elbow_tuck", "symmetry", "leg_drive"]);
        assert_eq!(incline.overall_score, bench.overall_score);
        assert_ne!(incline.active_muscles, Vec::<MuscleGroup>::new());
    }

    #[test]
    fn test_string_keys() {
        let analyzer = PoseAnalyzer::new();
        let typed = analyzer.analyze(&fixtures::squat(), ExerciseId::Squat);
        assert_eq!(analyzer.analyze_pose(&fixtures::squat(), "squat"), typed);

        let unknown = analyzer.analyze_pose(&fixtures::standing(), "zumba");
        let ids: Vec<_> = unknown.checkpoints.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["stability", "alignment"]);
        assert_eq!(unknown.overall_score, 100.0);
        assert!(unknown.active_muscles.is_empty());
    }

    #[test]
    fn test_generic_fallback_exercise() {
        let result = analyze(&fixtures::standing(), ExerciseId::Burpee);
        assert_eq!(result.checkpoints.len(), 2);
        assert!(result.is_good());
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = analyze(&fixtures::valgus_squat(), ExerciseId::Squat);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "good");
        assert!(json["wrongMuscles"]
            .as_array()
            .unwrap()
            .contains(&serde_json::Value::from("quadriceps")));
        assert!(json["checkpoints"][0]["relatedMuscles"].is_array());
    }

    proptest! {
        #[test]
        fn prop_score_bounded(
            coords in proptest::collection::vec((-1.0f64..2.0, -1.0f64..2.0), 29..=33),
            exercise in 0usize..ExerciseId::ALL.len(),
        ) {
            let landmarks: Vec<Landmark> =
                coords.iter().map(|&(x, y)| Landmark::new(x, y)).collect();
            let result = analyze(&landmarks, ExerciseId::ALL[exercise]);
            prop_assert!((0.0..=100.0).contains(&result.overall_score));
            for checkpoint in &result.checkpoints {
                prop_assert!((0.0..=100.0).contains(&checkpoint.score));
            }
        }
    }
}
