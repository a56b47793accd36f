//! Form criteria: weighted checkpoints per exercise
//!
//! Every table here must have weights summing to 100; the tests enforce it.

use crate::muscles::MuscleGroup::{self, *};
use crate::scoring::{above_score, below_score, range_score, PASS_THRESHOLD};
use feature_engine::PoseMeasurements;

/// One weighted, independently scored form rule
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint {
    pub id: &'static str,
    pub label: &'static str,
    pub weight: f64,
    pub muscles: &'static [MuscleGroup],
    /// Maps measurements onto a 0-100 sub-score
    pub score: fn(&PoseMeasurements) -> f64,
    pub good_message: &'static str,
    pub fix_message: &'static str,
}

/// Result of evaluating one checkpoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckpointOutcome {
    pub score: f64,
    pub passed: bool,
    pub message: &'static str,
}

impl Checkpoint {
    /// Score the checkpoint, clamped to 0..=100 with NaN as 0
    pub fn evaluate(&self, measurements: &PoseMeasurements) -> CheckpointOutcome {
        let raw = (self.score)(measurements);
        let score = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 100.0) };
        let passed = score >= PASS_THRESHOLD;
        CheckpointOutcome {
            score,
            passed,
            message: if passed { self.good_message } else { self.fix_message },
        }
    }
}

/// Checkpoint set for one exercise
#[derive(Debug, Clone, Copy)]
pub struct FormCriteria {
    pub checkpoints: &'static [Checkpoint],
}

impl FormCriteria {
    /// Sum of checkpoint weights
    pub fn total_weight(&self) -> f64 {
        self.checkpoints.iter().map(|c| c.weight).sum()
    }
}

/// Scored when an exercise has no criteria of its own
pub static GENERIC_CRITERIA: FormCriteria = FormCriteria {
    checkpoints: &[
        Checkpoint {
            id: "stability",
            label: "Stability",
            weight: 50.0,
            muscles: &[Core],
            score: |m| below_score(m.shoulder_tilt.max(m.hip_tilt), 8.0, 15.0),
            good_message: "Shoulders and hips are level",
            fix_message: "Keep shoulders and hips level",
        },
        Checkpoint {
            id: "alignment",
            label: "Alignment",
            weight: 50.0,
            muscles: &[Core],
            score: |m| {
                below_score(
                    m.features.knee_asymmetry.max(m.features.elbow_asymmetry),
                    15.0,
                    30.0,
                )
            },
            good_message: "Both sides move evenly",
            fix_message: "Move both sides evenly",
        },
    ],
};

pub(crate) static SQUAT: FormCriteria = FormCriteria {
    checkpoints: &[
        Checkpoint {
            id: "depth",
            label: "Squat depth",
            weight: 30.0,
            muscles: &[Quadriceps, Glutes],
            score: |m| range_score(m.features.knee_angle, 70.0, 130.0, 40.0),
            good_message: "Good depth",
            fix_message: "Bend your knees to reach parallel",
        },
        Checkpoint {
            id: "knee_alignment",
            label: "Knee alignment",
            weight: 25.0,
            muscles: &[Quadriceps, Adductors],
            score: |m| above_score(m.knee_valgus_ratio, 0.85, 0.5),
            good_message: "Knees track over your toes",
            fix_message: "Push your knees out over your toes",
        },
        Checkpoint {
            id: "back_angle",
            label: "Back angle",
            weight: 25.0,
            muscles: &[LowerBack, Core],
            score: |m| below_score(m.features.torso_lean, 45.0, 30.0),
            good_message: "Chest stays up",
            fix_message: "Keep your chest up and back straight",
        },
        Checkpoint {
            id: "hip_hinge",
            label: "Hip hinge",
            weight: 10.0,
            muscles: &[Glutes, Hamstrings],
            score: |m| range_score(m.features.hip_angle, 60.0, 140.0, 40.0),
            good_message: "Hips sit back well",
            fix_message: "Sit your hips back as you descend",
        },
        Checkpoint {
            id: "symmetry",
            label: "Symmetry",
            weight: 10.0,
            muscles: &[Quadriceps, Glutes],
            score: |m| below_score(m.features.knee_asymmetry, 15.0, 30.0),
            good_message: "Weight is evenly balanced",
            fix_message: "Shift your weight evenly between both legs",
        },
    ],
};

pub(crate) static LUNGE: FormCriteria = FormCriteria {
    checkpoints: &[
        Checkpoint {
            id: "front_knee",
            label: "Front knee",
            weight: 30.0,
            muscles: &[Quadriceps, Glutes],
            score: |m| range_score(m.min_knee_angle, 70.0, 110.0, 40.0),
            good_message: "Front knee is near 90 degrees",
            fix_message: "Lower until your front knee reaches 90 degrees",
        },
        Checkpoint {
            id: "torso",
            label: "Torso",
            weight: 25.0,
            muscles: &[Core, LowerBack],
            score: |m| below_score(m.features.torso_lean, 20.0, 30.0),
            good_message: "Torso stays upright",
            fix_message: "Keep your torso upright",
        },
        Checkpoint {
            id: "front_shin",
            label: "Front shin",
            weight: 20.0,
            muscles: &[Quadriceps, Glutes],
            score: |m| below_score(m.front_shin_tilt, 20.0, 30.0),
            good_message: "Front knee stays over the ankle",
            fix_message: "Keep your front knee stacked over your ankle",
        },
        Checkpoint {
            id: "rear_knee",
            label: "Rear knee",
            weight: 15.0,
            muscles: &[HipFlexors, Quadriceps],
            score: |m| range_score(m.max_knee_angle, 80.0, 140.0, 40.0),
            good_message: "Rear knee drops well",
            fix_message: "Drop your rear knee toward the floor",
        },
        Checkpoint {
            id: "balance",
            label: "Balance",
            weight: 10.0,
            muscles: &[Core, Glutes],
            score: |m| below_score(m.shoulder_tilt, 8.0, 15.0),
            good_message: "Shoulders stay level",
            fix_message: "Keep your shoulders level",
        },
    ],
};

pub(crate) static DEADLIFT: FormCriteria = FormCriteria {
    checkpoints: &[
        Checkpoint {
            id: "hip_hinge",
            label: "Hip hinge",
            weight: 30.0,
            muscles: &[Glutes, Hamstrings],
            score: |m| range_score(m.features.hip_angle, 60.0, 150.0, 40.0),
            good_message: "Good hip hinge",
            fix_message: "Hinge at the hips, push them back",
        },
        Checkpoint {
            id: "back",
            label: "Back",
            weight: 25.0,
            muscles: &[LowerBack, Core],
            score: |m| below_score(m.features.torso_lean, 65.0, 25.0),
            good_message: "Back angle is controlled",
            fix_message: "Don't let your chest drop toward the floor",
        },
        Checkpoint {
            id: "knee_bend",
            label: "Knee bend",
            weight: 20.0,
            muscles: &[Quadriceps, Hamstrings],
            score: |m| range_score(m.features.knee_angle, 130.0, 175.0, 40.0),
            good_message: "Knees softly bent",
            fix_message: "Keep a slight bend in your knees, don't squat the weight",
        },
        Checkpoint {
            id: "arms_straight",
            label: "Arms",
            weight: 15.0,
            muscles: &[Forearms, UpperBack],
            score: |m| above_score(m.features.elbow_angle, 150.0, 60.0),
            good_message: "Arms stay long",
            fix_message: "Keep your arms straight, don't pull with them",
        },
        Checkpoint {
            id: "level",
            label: "Level shoulders",
            weight: 10.0,
            muscles: &[UpperBack, Core],
            score: |m| below_score(m.shoulder_tilt, 8.0, 15.0),
            good_message: "Shoulders stay level",
            fix_message: "Keep the bar level across both shoulders",
        },
    ],
};

pub(crate) static PUSH_UP: FormCriteria = FormCriteria {
    checkpoints: &[
        Checkpoint {
            id: "body_line",
            label: "Body line",
            weight: 35.0,
            muscles: &[Core, Glutes],
            score: |m| above_score(m.body_line_angle, 160.0, 40.0),
            good_message: "Straight line from head to heels",
            fix_message: "Keep your body in a straight line",
        },
        Checkpoint {
            id: "hand_placement",
            label: "Hand placement",
            weight: 25.0,
            muscles: &[Chest, Shoulders],
            score: |m| below_score(m.wrist_shoulder_offset, 0.08, 0.15),
            good_message: "Hands under shoulders",
            fix_message: "Place your hands directly under your shoulders",
        },
        Checkpoint {
            id: "elbow_flare",
            label: "Elbow flare",
            weight: 20.0,
            muscles: &[Chest, Triceps],
            score: |m| below_score(m.elbow_flare_ratio, 1.6, 1.0),
            good_message: "Elbows tucked",
            fix_message: "Tuck your elbows closer to your body",
        },
        Checkpoint {
            id: "head",
            label: "Head position",
            weight: 10.0,
            muscles: &[UpperBack],
            score: |m| above_score(m.neck_angle, 150.0, 40.0),
            good_message: "Neck is neutral",
            fix_message: "Keep your head in line with your spine",
        },
        Checkpoint {
            id: "hip_height",
            label: "Hip height",
            weight: 10.0,
            muscles: &[Core, LowerBack],
            score: |m| below_score(m.hip_line_deviation, 0.04, 0.08),
            good_message: "Hips in line",
            fix_message: "Don't let your hips sag or pike",
        },
    ],
};

pub(crate) static PLANK: FormCriteria = FormCriteria {
    checkpoints: &[
        Checkpoint {
            id: "body_line",
            label: "Body line",
            weight: 40.0,
            muscles: &[Core, Glutes],
            score: |m| above_score(m.body_line_angle, 165.0, 40.0),
            good_message: "Body is straight",
            fix_message: "Straighten your body from shoulders to ankles",
        },
        Checkpoint {
            id: "hip_height",
            label: "Hip height",
            weight: 25.0,
            muscles: &[Core, LowerBack],
            score: |m| below_score(m.hip_line_deviation, 0.03, 0.08),
            good_message: "Hips level",
            fix_message: "Level your hips, don't sag or pike",
        },
        Checkpoint {
            id: "elbow_stack",
            label: "Elbow position",
            weight: 20.0,
            muscles: &[Shoulders],
            score: |m| below_score(m.elbow_shoulder_offset, 0.06, 0.12),
            good_message: "Elbows under shoulders",
            fix_message: "Stack your elbows under your shoulders",
        },
        Checkpoint {
            id: "head",
            label: "Head position",
            weight: 15.0,
            muscles: &[UpperBack],
            score: |m| above_score(m.neck_angle, 150.0, 40.0),
            good_message: "Neck is neutral",
            fix_message: "Look at the floor, keep your neck neutral",
        },
    ],
};

pub(crate) static BENCH_PRESS: FormCriteria = FormCriteria {
    checkpoints: &[
        Checkpoint {
            id: "wrist_stack",
            label: "Wrist stack",
            weight: 30.0,
            muscles: &[Triceps, Chest],
            score: |m| below_score(m.forearm_tilt, 20.0, 30.0),
            good_message: "Wrists over elbows",
            fix_message: "Keep your wrists stacked over your elbows",
        },
        Checkpoint {
            id: "elbow_tuck",
            label: "Elbow angle",
            weight: 25.0,
            muscles: &[Shoulders, Chest],
            score: |m| range_score(m.features.shoulder_angle, 45.0, 80.0, 30.0),
            good_message: "Elbows at a safe angle",
            fix_message: "Tuck your elbows to about 45-75 degrees",
        },
        Checkpoint {
            id: "symmetry",
            label: "Symmetry",
            weight: 25.0,
            muscles: &[Chest, Triceps],
            score: |m| below_score(m.features.elbow_asymmetry, 10.0, 25.0),
            good_message: "Bar path is even",
            fix_message: "Press evenly with both arms",
        },
        Checkpoint {
            id: "leg_drive",
            label: "Leg drive",
            weight: 20.0,
            muscles: &[Glutes, Quadriceps],
            score: |m| range_score(m.features.knee_angle, 70.0, 120.0, 40.0),
            good_message: "Feet planted",
            fix_message: "Plant your feet with knees bent",
        },
    ],
};

pub(crate) static OVERHEAD_PRESS: FormCriteria = FormCriteria {
    checkpoints: &[
        Checkpoint {
            id: "press_height",
            label: "Lockout",
            weight: 30.0,
            muscles: &[Shoulders, Triceps],
            score: |m| above_score(m.features.wrist_shoulder_rise, 0.05, 0.2),
            good_message: "Full press overhead",
            fix_message: "Press the weight all the way overhead",
        },
        Checkpoint {
            id: "torso",
            label: "Torso",
            weight: 25.0,
            muscles: &[LowerBack, Core],
            score: |m| below_score(m.features.torso_lean, 10.0, 20.0),
            good_message: "Core braced",
            fix_message: "Brace your core, don't lean back",
        },
        Checkpoint {
            id: "wrist_stack",
            label: "Wrist stack",
            weight: 25.0,
            muscles: &[Forearms, Shoulders],
            score: |m| below_score(m.forearm_tilt, 20.0, 30.0),
            good_message: "Forearms vertical",
            fix_message: "Keep your forearms vertical under the weight",
        },
        Checkpoint {
            id: "symmetry",
            label: "Symmetry",
            weight: 20.0,
            muscles: &[Shoulders],
            score: |m| below_score(m.features.elbow_asymmetry, 10.0, 25.0),
            good_message: "Both arms press evenly",
            fix_message: "Press evenly with both arms",
        },
    ],
};

pub(crate) static PULL_UP: FormCriteria = FormCriteria {
    checkpoints: &[
        Checkpoint {
            id: "grip",
            label: "Grip width",
            weight: 25.0,
            muscles: &[Lats],
            score: |m| range_score(m.features.arm_spread, 1.2, 2.5, 1.0),
            good_message: "Grip is shoulder width or wider",
            fix_message: "Take a grip slightly wider than your shoulders",
        },
        Checkpoint {
            id: "symmetry",
            label: "Symmetry",
            weight: 25.0,
            muscles: &[Lats, Biceps],
            score: |m| below_score(m.features.elbow_asymmetry, 10.0, 25.0),
            good_message: "Pulling evenly",
            fix_message: "Pull evenly with both arms",
        },
        Checkpoint {
            id: "swing",
            label: "Body swing",
            weight: 25.0,
            muscles: &[Core],
            score: |m| below_score(m.features.torso_lean, 15.0, 25.0),
            good_message: "No swinging",
            fix_message: "Stop swinging, keep your body still",
        },
        Checkpoint {
            id: "level",
            label: "Level shoulders",
            weight: 25.0,
            muscles: &[UpperBack, Lats],
            score: |m| below_score(m.shoulder_tilt, 8.0, 15.0),
            good_message: "Shoulders level",
            fix_message: "Keep your shoulders level",
        },
    ],
};

pub(crate) static BICEP_CURL: FormCriteria = FormCriteria {
    checkpoints: &[
        Checkpoint {
            id: "upper_arm",
            label: "Upper arm",
            weight: 35.0,
            muscles: &[Biceps, Shoulders],
            score: |m| below_score(m.upper_arm_tilt, 20.0, 30.0),
            good_message: "Elbows pinned",
            fix_message: "Keep your elbows pinned to your sides",
        },
        Checkpoint {
            id: "torso",
            label: "Torso",
            weight: 30.0,
            muscles: &[LowerBack, Core],
            score: |m| below_score(m.features.torso_lean, 10.0, 20.0),
            good_message: "No body swing",
            fix_message: "Don't swing your body to lift the weight",
        },
        Checkpoint {
            id: "range",
            label: "Range of motion",
            weight: 20.0,
            muscles: &[Biceps],
            score: |m| range_score(m.features.elbow_angle, 30.0, 170.0, 30.0),
            good_message: "Full range of motion",
            fix_message: "Use the full range, fully extend and curl",
        },
        Checkpoint {
            id: "symmetry",
            label: "Symmetry",
            weight: 15.0,
            muscles: &[Biceps, Forearms],
            score: |m| below_score(m.features.elbow_asymmetry, 15.0, 30.0),
            good_message: "Arms move together",
            fix_message: "Curl both arms evenly",
        },
    ],
};

pub(crate) static LATERAL_RAISE: FormCriteria = FormCriteria {
    checkpoints: &[
        Checkpoint {
            id: "arm_height",
            label: "Arm height",
            weight: 35.0,
            muscles: &[Shoulders],
            score: |m| range_score(m.features.wrist_shoulder_rise, -0.06, 0.06, 0.15),
            good_message: "Arms at shoulder height",
            fix_message: "Raise your arms to shoulder height, no higher",
        },
        Checkpoint {
            id: "soft_elbows",
            label: "Elbows",
            weight: 20.0,
            muscles: &[Shoulders],
            score: |m| range_score(m.features.elbow_angle, 150.0, 180.0, 40.0),
            good_message: "Slight bend in the elbows",
            fix_message: "Keep your arms nearly straight",
        },
        Checkpoint {
            id: "torso",
            label: "Torso",
            weight: 25.0,
            muscles: &[Core, LowerBack],
            score: |m| below_score(m.features.torso_lean, 10.0, 20.0),
            good_message: "Torso still",
            fix_message: "Don't swing your torso",
        },
        Checkpoint {
            id: "symmetry",
            label: "Symmetry",
            weight: 20.0,
            muscles: &[Shoulders, UpperBack],
            score: |m| below_score(m.shoulder_tilt, 8.0, 15.0),
            good_message: "Shoulders level",
            fix_message: "Raise both arms evenly and don't shrug",
        },
    ],
};

pub(crate) static BENT_OVER_ROW: FormCriteria = FormCriteria {
    checkpoints: &[
        Checkpoint {
            id: "torso_angle",
            label: "Torso angle",
            weight: 30.0,
            muscles: &[LowerBack, Hamstrings],
            score: |m| range_score(m.features.torso_lean, 30.0, 75.0, 20.0),
            good_message: "Good hinge angle",
            fix_message: "Hinge forward to about 45 degrees",
        },
        Checkpoint {
            id: "neck",
            label: "Neck",
            weight: 20.0,
            muscles: &[UpperBack],
            score: |m| above_score(m.neck_angle, 140.0, 40.0),
            good_message: "Neck is neutral",
            fix_message: "Keep your neck in line with your back",
        },
        Checkpoint {
            id: "pull",
            label: "Pull",
            weight: 25.0,
            muscles: &[Lats, Biceps],
            score: |m| range_score(m.features.elbow_angle, 60.0, 120.0, 50.0),
            good_message: "Strong pull",
            fix_message: "Pull your elbows back past your torso",
        },
        Checkpoint {
            id: "soft_knees",
            label: "Knees",
            weight: 15.0,
            muscles: &[Hamstrings, Quadriceps],
            score: |m| range_score(m.features.knee_angle, 130.0, 170.0, 30.0),
            good_message: "Knees softly bent",
            fix_message: "Keep a slight bend in your knees",
        },
        Checkpoint {
            id: "symmetry",
            label: "Symmetry",
            weight: 10.0,
            muscles: &[Lats, UpperBack],
            score: |m| below_score(m.features.elbow_asymmetry, 10.0, 25.0),
            good_message: "Rowing evenly",
            fix_message: "Row evenly with both arms",
        },
    ],
};

pub(crate) static HIP_THRUST: FormCriteria = FormCriteria {
    checkpoints: &[
        Checkpoint {
            id: "hip_extension",
            label: "Hip extension",
            weight: 40.0,
            muscles: &[Glutes, Hamstrings],
            score: |m| above_score(m.features.hip_angle, 165.0, 40.0),
            good_message: "Full hip extension",
            fix_message: "Drive your hips up to full extension",
        },
        Checkpoint {
            id: "shin_angle",
            label: "Shin angle",
            weight: 25.0,
            muscles: &[Hamstrings, Quadriceps],
            score: |m| range_score(m.features.knee_angle, 80.0, 100.0, 30.0),
            good_message: "Shins vertical at the top",
            fix_message: "Adjust your feet so your knees reach 90 degrees",
        },
        Checkpoint {
            id: "torso",
            label: "Torso",
            weight: 20.0,
            muscles: &[Core],
            score: |m| range_score(m.features.torso_lean, 70.0, 110.0, 30.0),
            good_message: "Torso parallel to the floor",
            fix_message: "Keep your ribs down and torso flat at the top",
        },
        Checkpoint {
            id: "knee_alignment",
            label: "Knee alignment",
            weight: 15.0,
            muscles: &[Glutes, Adductors],
            score: |m| above_score(m.knee_valgus_ratio, 0.85, 0.5),
            good_message: "Knees track outward",
            fix_message: "Push your knees out",
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::fixtures;

    const ALL: [&FormCriteria; 13] = [
        &GENERIC_CRITERIA,
        &SQUAT,
        &LUNGE,
        &DEADLIFT,
        &PUSH_UP,
        &PLANK,
        &BENCH_PRESS,
        &OVERHEAD_PRESS,
        &PULL_UP,
        &BICEP_CURL,
        &LATERAL_RAISE,
        &BENT_OVER_ROW,
        &HIP_THRUST,
    ];

    #[test]
    fn test_weights_sum_to_100() {
        for criteria in ALL {
            assert!((criteria.total_weight() - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_checkpoint_ids_unique_per_exercise() {
        for criteria in ALL {
            let mut ids: Vec<_> = criteria.checkpoints.iter().map(|c| c.id).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), criteria.checkpoints.len());
        }
    }

    #[test]
    fn test_outcome_message_follows_pass() {
        let good = PoseMeasurements::from_landmarks(&fixtures::squat()).unwrap();
        let valgus = PoseMeasurements::from_landmarks(&fixtures::valgus_squat()).unwrap();
        let knees = &SQUAT.checkpoints[1];
        assert_eq!(knees.id, "knee_alignment");

        let pass = knees.evaluate(&good);
        assert!(pass.passed);
        assert_eq!(pass.message, knees.good_message);

        let fail = knees.evaluate(&valgus);
        assert!(!fail.passed);
        assert!((fail.score - 50.0).abs() < 1e-6);
        assert_eq!(fail.message, "Push your knees out over your toes");
    }

    fn fixed(score: fn(&PoseMeasurements) -> f64) -> Checkpoint {
        Checkpoint {
            id: "fixed",
            label: "Fixed",
            weight: 100.0,
            muscles: &[Core],
            score,
            good_message: "ok",
            fix_message: "fix",
        }
    }

    #[test]
    fn test_pass_threshold_is_inclusive() {
        // Calibrated constant: a sub-score of exactly 60 passes
        let m = PoseMeasurements::from_landmarks(&fixtures::squat()).unwrap();

        let at = fixed(|_| PASS_THRESHOLD).evaluate(&m);
        assert!(at.passed);
        assert_eq!(at.message, "ok");

        let below = fixed(|_| PASS_THRESHOLD - 0.01).evaluate(&m);
        assert!(!below.passed);
        assert_eq!(below.message, "fix");
    }

    #[test]
    fn test_outcome_score_is_clamped() {
        let m = PoseMeasurements::from_landmarks(&fixtures::squat()).unwrap();
        assert_eq!(fixed(|_| 140.0).evaluate(&m).score, 100.0);
        assert_eq!(fixed(|_| -5.0).evaluate(&m).score, 0.0);

        let nan = fixed(|_| f64::NAN).evaluate(&m);
        assert_eq!(nan.score, 0.0);
        assert!(!nan.passed);
    }
}
