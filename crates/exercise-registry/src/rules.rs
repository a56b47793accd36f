//! Heuristic classification rules
//!
//! Each exercise is scored by an ordered list of (condition, points) terms.
//! A rule's score is the sum of the points of every term whose condition
//! holds; points may be negative for contradicting evidence, and the sum is
//! not clamped here.

use feature_engine::FeatureVector;
use std::fmt;

/// Continuous feature a condition can test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Knee,
    Hip,
    Elbow,
    Shoulder,
    TorsoLean,
    KneeAsymmetry,
    ElbowAsymmetry,
    ArmSpread,
    LegSpread,
}

impl Metric {
    /// Read this metric from a feature vector
    pub fn value(self, f: &FeatureVector) -> f64 {
        match self {
            Metric::Knee => f.knee_angle,
            Metric::Hip => f.hip_angle,
            Metric::Elbow => f.elbow_angle,
            Metric::Shoulder => f.shoulder_angle,
            Metric::TorsoLean => f.torso_lean,
            Metric::KneeAsymmetry => f.knee_asymmetry,
            Metric::ElbowAsymmetry => f.elbow_asymmetry,
            Metric::ArmSpread => f.arm_spread,
            Metric::LegSpread => f.leg_spread,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Metric::Knee => "knee angle",
            Metric::Hip => "hip angle",
            Metric::Elbow => "elbow angle",
            Metric::Shoulder => "shoulder angle",
            Metric::TorsoLean => "torso lean",
            Metric::KneeAsymmetry => "knee asymmetry",
            Metric::ElbowAsymmetry => "elbow asymmetry",
            Metric::ArmSpread => "arm spread",
            Metric::LegSpread => "leg spread",
        }
    }
}

/// Predicate over a feature vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    Upright,
    Leaning,
    Horizontal,
    WristsAboveShoulders,
    WristsAtShoulders,
    WristsAtChest,
    WristsBelowHips,
    WristsAboveHead,
    /// Inclusive range
    Between(Metric, f64, f64),
    /// Strictly greater
    Above(Metric, f64),
    /// Strictly less
    Below(Metric, f64),
}

impl Condition {
    /// Whether the condition is true for `f`
    pub fn holds(&self, f: &FeatureVector) -> bool {
        match *self {
            Condition::Upright => f.is_upright,
            Condition::Leaning => f.is_leaning,
            Condition::Horizontal => f.is_horizontal,
            Condition::WristsAboveShoulders => f.wrists_above_shoulders,
            Condition::WristsAtShoulders => f.wrists_at_shoulders,
            Condition::WristsAtChest => f.wrists_at_chest,
            Condition::WristsBelowHips => f.wrists_below_hips,
            Condition::WristsAboveHead => f.wrists_above_head,
            Condition::Between(metric, lo, hi) => (lo..=hi).contains(&metric.value(f)),
            Condition::Above(metric, limit) => metric.value(f) > limit,
            Condition::Below(metric, limit) => metric.value(f) < limit,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Upright => f.write_str("torso upright"),
            Condition::Leaning => f.write_str("torso leaning"),
            Condition::Horizontal => f.write_str("torso horizontal"),
            Condition::WristsAboveShoulders => f.write_str("wrists above shoulders"),
            Condition::WristsAtShoulders => f.write_str("wrists at shoulder height"),
            Condition::WristsAtChest => f.write_str("wrists at chest height"),
            Condition::WristsBelowHips => f.write_str("wrists below hips"),
            Condition::WristsAboveHead => f.write_str("wrists above head"),
            Condition::Between(m, lo, hi) => write!(f, "{} between {lo} and {hi}", m.name()),
            Condition::Above(m, limit) => write!(f, "{} above {limit}", m.name()),
            Condition::Below(m, limit) => write!(f, "{} below {limit}", m.name()),
        }
    }
}

/// One scoring contribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreTerm {
    pub condition: Condition,
    pub points: f64,
}

const fn term(condition: Condition, points: f64) -> ScoreTerm {
    ScoreTerm { condition, points }
}

/// Additive scoring rule for one exercise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExerciseRule {
    pub terms: &'static [ScoreTerm],
}

impl ExerciseRule {
    /// Sum of the points of every term that holds; 0.0 when none do
    pub fn score(&self, features: &FeatureVector) -> f64 {
        self.terms
            .iter()
            .filter(|t| t.condition.holds(features))
            .fold(0.0, |total, t| total + t.points)
    }

    /// Terms that fired, in rule order
    pub fn explain(&self, features: &FeatureVector) -> Vec<&'static ScoreTerm> {
        self.terms
            .iter()
            .filter(|t| t.condition.holds(features))
            .collect()
    }
}

use Condition::*;
use Metric::*;

/// Rule for exercises the heuristics cannot recognize; only learned boosts
/// can rank them.
pub static GENERIC_RULE: ExerciseRule = ExerciseRule { terms: &[] };

pub(crate) static SQUAT: ExerciseRule = ExerciseRule {
    terms: &[
        term(Below(TorsoLean, 45.0), 15.0),
        term(Between(Knee, 60.0, 130.0), 30.0),
        term(Between(Hip, 60.0, 130.0), 20.0),
        term(Below(KneeAsymmetry, 15.0), 10.0),
        term(Above(KneeAsymmetry, 25.0), -20.0),
        term(Horizontal, -30.0),
        term(Above(Knee, 160.0), -20.0),
    ],
};

pub(crate) static LUNGE: ExerciseRule = ExerciseRule {
    terms: &[
        term(Above(KneeAsymmetry, 25.0), 35.0),
        term(Upright, 15.0),
        term(Between(Knee, 70.0, 140.0), 15.0),
        term(Below(KneeAsymmetry, 10.0), -15.0),
        term(Horizontal, -30.0),
    ],
};

pub(crate) static DEADLIFT: ExerciseRule = ExerciseRule {
    terms: &[
        term(Leaning, 25.0),
        term(Between(Hip, 60.0, 140.0), 20.0),
        term(Between(Knee, 130.0, 175.0), 20.0),
        term(WristsBelowHips, 15.0),
        term(Above(Elbow, 150.0), 10.0),
        term(Below(Knee, 110.0), -20.0),
    ],
};

pub(crate) static PUSH_UP: ExerciseRule = ExerciseRule {
    terms: &[
        term(Horizontal, 30.0),
        term(WristsBelowHips, 15.0),
        term(Above(Knee, 150.0), 15.0),
        term(Between(Shoulder, 60.0, 110.0), 10.0),
        term(Above(Elbow, 120.0), 15.0),
        term(Upright, -30.0),
    ],
};

pub(crate) static PLANK: ExerciseRule = ExerciseRule {
    terms: &[
        term(Horizontal, 30.0),
        term(Between(Elbow, 60.0, 110.0), 25.0),
        term(Above(Knee, 150.0), 15.0),
        term(Above(Hip, 150.0), 10.0),
        term(Upright, -30.0),
    ],
};

pub(crate) static BENCH_PRESS: ExerciseRule = ExerciseRule {
    terms: &[
        term(Horizontal, 25.0),
        term(WristsAboveShoulders, 25.0),
        term(Below(Knee, 130.0), 10.0),
        term(Between(Shoulder, 60.0, 120.0), 10.0),
        term(Upright, -30.0),
    ],
};

pub(crate) static OVERHEAD_PRESS: ExerciseRule = ExerciseRule {
    terms: &[
        term(Upright, 20.0),
        term(WristsAboveShoulders, 25.0),
        term(Above(Knee, 150.0), 15.0),
        term(Below(ArmSpread, 2.0), 10.0),
        term(Between(Elbow, 60.0, 160.0), 10.0),
        term(Horizontal, -30.0),
    ],
};

pub(crate) static PULL_UP: ExerciseRule = ExerciseRule {
    terms: &[
        term(WristsAboveHead, 25.0),
        term(Upright, 15.0),
        term(Above(ArmSpread, 1.5), 15.0),
        term(Below(Elbow, 120.0), 10.0),
        term(Below(Knee, 150.0), 10.0),
        term(Horizontal, -30.0),
    ],
};

pub(crate) static BICEP_CURL: ExerciseRule = ExerciseRule {
    terms: &[
        term(Upright, 20.0),
        term(Below(Elbow, 100.0), 30.0),
        term(WristsAtChest, 15.0),
        term(WristsAboveShoulders, -15.0),
        term(Below(ArmSpread, 1.5), 10.0),
        term(Above(Knee, 150.0), 10.0),
        term(Horizontal, -30.0),
    ],
};

pub(crate) static LATERAL_RAISE: ExerciseRule = ExerciseRule {
    terms: &[
        term(Upright, 20.0),
        term(WristsAtShoulders, 25.0),
        term(Above(ArmSpread, 2.5), 25.0),
        term(Above(Elbow, 140.0), 10.0),
        term(Above(Knee, 150.0), 5.0),
        term(Horizontal, -30.0),
    ],
};

pub(crate) static BENT_OVER_ROW: ExerciseRule = ExerciseRule {
    terms: &[
        term(Between(TorsoLean, 30.0, 75.0), 25.0),
        term(Below(Elbow, 120.0), 20.0),
        term(Between(Knee, 120.0, 175.0), 15.0),
        term(Between(Hip, 60.0, 130.0), 15.0),
    ],
};

pub(crate) static HIP_THRUST: ExerciseRule = ExerciseRule {
    terms: &[
        term(Horizontal, 20.0),
        term(Between(Knee, 70.0, 110.0), 25.0),
        term(Above(Hip, 150.0), 20.0),
        term(WristsAboveShoulders, -15.0),
    ],
};

pub(crate) static JUMPING_JACK: ExerciseRule = ExerciseRule {
    terms: &[
        term(Upright, 15.0),
        term(WristsAboveHead, 20.0),
        term(Above(ArmSpread, 2.0), 20.0),
        term(Above(LegSpread, 1.8), 25.0),
        term(Above(Knee, 150.0), 10.0),
        term(Horizontal, -30.0),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::{fixtures, FeatureExtractor};

    fn features(landmarks: &[feature_engine::Landmark]) -> FeatureVector {
        FeatureExtractor::new().extract(landmarks).unwrap()
    }

    #[test]
    fn test_squat_rule_on_squat() {
        let f = features(&fixtures::squat());
        // lean, knee range, hip range, symmetric knees
        assert_eq!(SQUAT.score(&f), 75.0);
        assert_eq!(SQUAT.explain(&f).len(), 4);
    }

    #[test]
    fn test_negative_terms_are_not_clamped() {
        let f = features(&fixtures::squat());
        assert_eq!(PLANK.score(&f), -30.0);
        assert_eq!(GENERIC_RULE.score(&f), 0.0);
    }

    #[test]
    fn test_push_up_rule() {
        let f = features(&fixtures::push_up());
        assert_eq!(PUSH_UP.score(&f), 85.0);
        let fired: Vec<String> = PUSH_UP
            .explain(&f)
            .iter()
            .map(|t| t.condition.to_string())
            .collect();
        assert_eq!(fired[0], "torso horizontal");
        assert!(!fired.contains(&"torso upright".to_string()));
    }

    #[test]
    fn test_condition_boundaries() {
        let mut f = features(&fixtures::squat());
        f.knee_angle = 130.0;
        assert!(Between(Knee, 60.0, 130.0).holds(&f));
        assert!(!Above(Knee, 130.0).holds(&f));
        assert!(!Below(Knee, 130.0).holds(&f));
    }

    #[test]
    fn test_condition_display() {
        assert_eq!(Above(Knee, 150.0).to_string(), "knee angle above 150");
        assert_eq!(Between(TorsoLean, 30.0, 75.0).to_string(), "torso lean between 30 and 75");
    }
}
