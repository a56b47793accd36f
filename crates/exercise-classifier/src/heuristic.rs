//! Rule-based classification

use crate::ranking::{rank_scores, ClassificationResult};
use crate::Classify;
use exercise_registry::{Boosts, ExerciseId, ScoreTerm};
use feature_engine::{FeatureExtractor, FeatureVector, Landmark};
use tracing::debug;

/// Scores every registered exercise with its declarative rule
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicClassifier {
    extractor: FeatureExtractor,
}

impl HeuristicClassifier {
    /// Create a new rule-based classifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw rule scores in registration order
    pub fn score_all(&self, features: &FeatureVector) -> Vec<(ExerciseId, f64)> {
        ExerciseId::ALL
            .into_iter()
            .map(|id| (id, id.entry().rule.score(features)))
            .collect()
    }

    /// Rule terms that fired for `id` on this pose; empty if the frame
    /// cannot be classified
    pub fn explain(&self, landmarks: &[Landmark], id: ExerciseId) -> Vec<&'static ScoreTerm> {
        match self.extractor.extract(landmarks) {
            Ok(features) => id.entry().rule.explain(&features),
            Err(_) => Vec::new(),
        }
    }
}

impl Classify for HeuristicClassifier {
    fn classify(&self, landmarks: &[Landmark], boosts: &Boosts) -> ClassificationResult {
        let features = match self.extractor.extract(landmarks) {
            Ok(features) => features,
            Err(e) => {
                debug!("Skipping classification: {}", e);
                return ClassificationResult::fallback();
            }
        };

        let result = rank_scores(self.score_all(&features), boosts);
        debug!(
            exercise = %result.key,
            confidence = result.confidence,
            used_learning = result.used_learning,
            "Heuristic classification"
        );
        result
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::fixtures;

    fn classify(landmarks: &[Landmark]) -> ClassificationResult {
        HeuristicClassifier::new().classify(landmarks, &Boosts::new())
    }

    fn top_keys(result: &ClassificationResult) -> Vec<ExerciseId> {
        result.top3.iter().map(|s| s.key).collect()
    }

    #[test]
    fn test_squat_is_recognized() {
        let result = classify(&fixtures::squat());
        assert_eq!(result.key, ExerciseId::Squat);
        assert!(result.confidence > 50);
        assert_eq!(result.top3[0].score, 75.0);
        assert!(!result.used_learning);
    }

    #[test]
    fn test_push_up_and_plank_ordering() {
        let push_up = classify(&fixtures::push_up());
        assert_eq!(
            top_keys(&push_up),
            vec![ExerciseId::PushUp, ExerciseId::Plank, ExerciseId::HipThrust]
        );

        let plank = classify(&fixtures::plank());
        assert_eq!(
            top_keys(&plank),
            vec![ExerciseId::Plank, ExerciseId::PushUp, ExerciseId::HipThrust]
        );
        assert_eq!(plank.confidence, 88);
    }

    #[test]
    fn test_upright_arm_exercises() {
        assert_eq!(classify(&fixtures::overhead_press()).key, ExerciseId::OverheadPress);
        assert_eq!(classify(&fixtures::lateral_raise()).key, ExerciseId::LateralRaise);
        assert_eq!(classify(&fixtures::lunge()).key, ExerciseId::Lunge);
    }

    #[test]
    fn test_short_input_falls_back() {
        assert_eq!(classify(&[]), ClassificationResult::fallback());
        assert_eq!(
            classify(&[Landmark::default(); 28]),
            ClassificationResult::fallback()
        );
    }

    #[test]
    fn test_generic_exercises_score_zero() {
        let features = FeatureExtractor::new().extract(&fixtures::squat()).unwrap();
        let scores = HeuristicClassifier::new().score_all(&features);
        assert_eq!(scores.len(), ExerciseId::ALL.len());
        let burpee = scores.iter().find(|(id, _)| *id == ExerciseId::Burpee).unwrap();
        assert_eq!(burpee.1, 0.0);
    }

    #[test]
    fn test_learned_boost_promotes_generic_exercise() {
        let mut boosts = Boosts::new();
        boosts.insert(ExerciseId::Burpee, 90.0);
        let result = HeuristicClassifier::new().classify(&fixtures::squat(), &boosts);
        assert_eq!(result.key, ExerciseId::Burpee);
        assert!(result.used_learning);
    }

    #[test]
    fn test_explain_lists_fired_terms() {
        let classifier = HeuristicClassifier::new();
        let terms = classifier.explain(&fixtures::squat(), ExerciseId::Squat);
        assert_eq!(terms.iter().map(|t| t.points).sum::<f64>(), 75.0);
        assert!(classifier.explain(&[], ExerciseId::Squat).is_empty());
    }
}
