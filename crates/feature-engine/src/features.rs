//! Feature Vector Assembly

use crate::geometry::{angle_deg, distance, mid, tilt_from_vertical, Point};
use crate::landmarks::{Landmark, PoseLandmark as P, MIN_LANDMARKS};
use crate::FeatureError;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Torso lean below this is upright (degrees from vertical)
pub const UPRIGHT_MAX_LEAN: f64 = 35.0;

/// Torso lean at or above this is horizontal (degrees from vertical)
pub const HORIZONTAL_MIN_LEAN: f64 = 60.0;

/// Margin a wrist must clear to count as above/below a body line
pub const WRIST_LEVEL_TOLERANCE: f64 = 0.03;

/// Half-height of the "at shoulder level" band
pub const WRIST_BAND: f64 = 0.08;

/// Fraction of the shoulder-to-hip span counted as chest height
const CHEST_FRACTION: f64 = 0.6;

/// Spans shorter than this are treated as zero when used as a divisor
const MIN_SPAN: f64 = 1e-6;

/// Upper bound for the body bounding-box aspect ratio
const MAX_BODY_ASPECT: f64 = 10.0;

/// Number of features in the training layout
pub const FEATURE_COUNT: usize = 20;

/// Training feature order shared with the offline trainer. Append-only.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "knee_angle",
    "hip_angle",
    "elbow_angle",
    "shoulder_angle",
    "torso_lean",
    "knee_asymmetry",
    "elbow_asymmetry",
    "arm_spread",
    "leg_spread",
    "is_upright",
    "is_leaning",
    "is_horizontal",
    "wrists_above_shoulders",
    "wrists_at_shoulders",
    "wrists_at_chest",
    "wrists_below_hips",
    "wrists_above_head",
    "hip_knee_drop",
    "wrist_shoulder_rise",
    "body_aspect",
];

/// Compact pose signature used for similarity matching:
/// knee, hip, elbow, shoulder and torso angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleSnapshot(pub [f64; 5]);

impl AngleSnapshot {
    /// Euclidean distance in degree units
    pub fn distance(&self, other: &AngleSnapshot) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

/// Named features derived from one landmark set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Bilateral mean of hip-knee-ankle angles
    pub knee_angle: f64,
    /// Bilateral mean of shoulder-hip-knee angles
    pub hip_angle: f64,
    /// Bilateral mean of shoulder-elbow-wrist angles
    pub elbow_angle: f64,
    /// Bilateral mean of elbow-shoulder-hip angles
    pub shoulder_angle: f64,
    pub left_knee_angle: f64,
    pub right_knee_angle: f64,
    pub left_elbow_angle: f64,
    pub right_elbow_angle: f64,
    /// Shoulder-midpoint to hip-midpoint angle from vertical
    pub torso_lean: f64,
    pub knee_asymmetry: f64,
    pub elbow_asymmetry: f64,
    /// Wrist distance / shoulder width
    pub arm_spread: f64,
    /// Ankle distance / hip width
    pub leg_spread: f64,
    pub is_upright: bool,
    pub is_leaning: bool,
    pub is_horizontal: bool,
    pub wrists_above_shoulders: bool,
    pub wrists_at_shoulders: bool,
    pub wrists_at_chest: bool,
    pub wrists_below_hips: bool,
    pub wrists_above_head: bool,
    /// Knee-midpoint y minus hip-midpoint y (positive when hips are higher)
    pub hip_knee_drop: f64,
    /// Shoulder-midpoint y minus wrist-midpoint y (positive when wrists are higher)
    pub wrist_shoulder_rise: f64,
    /// Height / width of the body bounding box
    pub body_aspect: f64,
}

impl FeatureVector {
    /// Knee, hip, elbow, shoulder and torso angles
    pub fn angle_snapshot(&self) -> AngleSnapshot {
        AngleSnapshot([
            self.knee_angle,
            self.hip_angle,
            self.elbow_angle,
            self.shoulder_angle,
            self.torso_lean,
        ])
    }

    /// Flatten into [`FEATURE_NAMES`] order, booleans as 0/1
    pub fn to_training_vector(&self) -> [f64; FEATURE_COUNT] {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        [
            self.knee_angle,
            self.hip_angle,
            self.elbow_angle,
            self.shoulder_angle,
            self.torso_lean,
            self.knee_asymmetry,
            self.elbow_asymmetry,
            self.arm_spread,
            self.leg_spread,
            flag(self.is_upright),
            flag(self.is_leaning),
            flag(self.is_horizontal),
            flag(self.wrists_above_shoulders),
            flag(self.wrists_at_shoulders),
            flag(self.wrists_at_chest),
            flag(self.wrists_below_hips),
            flag(self.wrists_above_head),
            self.hip_knee_drop,
            self.wrist_shoulder_rise,
            self.body_aspect,
        ]
    }
}

/// Feature extractor for landmark arrays
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }

    /// Extract features from a landmark array.
    ///
    /// Fails with [`FeatureError::InsufficientLandmarks`] when fewer than
    /// [`MIN_LANDMARKS`] points are supplied.
    pub fn extract(&self, landmarks: &[Landmark]) -> Result<FeatureVector, FeatureError> {
        if landmarks.len() < MIN_LANDMARKS {
            return Err(FeatureError::InsufficientLandmarks {
                required: MIN_LANDMARKS,
                actual: landmarks.len(),
            });
        }

        let p = |id: P| id.point(landmarks);

        let left_knee = angle_deg(p(P::LeftHip), p(P::LeftKnee), p(P::LeftAnkle));
        let right_knee = angle_deg(p(P::RightHip), p(P::RightKnee), p(P::RightAnkle));
        let left_hip = angle_deg(p(P::LeftShoulder), p(P::LeftHip), p(P::LeftKnee));
        let right_hip = angle_deg(p(P::RightShoulder), p(P::RightHip), p(P::RightKnee));
        let left_elbow = angle_deg(p(P::LeftShoulder), p(P::LeftElbow), p(P::LeftWrist));
        let right_elbow = angle_deg(p(P::RightShoulder), p(P::RightElbow), p(P::RightWrist));
        let left_shoulder = angle_deg(p(P::LeftElbow), p(P::LeftShoulder), p(P::LeftHip));
        let right_shoulder = angle_deg(p(P::RightElbow), p(P::RightShoulder), p(P::RightHip));

        let shoulder_mid = mid(p(P::LeftShoulder), p(P::RightShoulder));
        let hip_mid = mid(p(P::LeftHip), p(P::RightHip));
        let knee_mid = mid(p(P::LeftKnee), p(P::RightKnee));
        let wrist_mid = mid(p(P::LeftWrist), p(P::RightWrist));
        let nose = p(P::Nose);

        let torso_lean = tilt_from_vertical(shoulder_mid, hip_mid);

        let shoulder_width = distance(p(P::LeftShoulder), p(P::RightShoulder));
        let hip_width = distance(p(P::LeftHip), p(P::RightHip));
        let arm_spread = ratio_or_one(distance(p(P::LeftWrist), p(P::RightWrist)), shoulder_width);
        let leg_spread = ratio_or_one(distance(p(P::LeftAnkle), p(P::RightAnkle)), hip_width);

        let chest_floor = shoulder_mid.y + (hip_mid.y - shoulder_mid.y) * CHEST_FRACTION;
        let (is_upright, is_leaning, is_horizontal) = lean_zone(torso_lean);

        let features = FeatureVector {
            knee_angle: (left_knee + right_knee) / 2.0,
            hip_angle: (left_hip + right_hip) / 2.0,
            elbow_angle: (left_elbow + right_elbow) / 2.0,
            shoulder_angle: (left_shoulder + right_shoulder) / 2.0,
            left_knee_angle: left_knee,
            right_knee_angle: right_knee,
            left_elbow_angle: left_elbow,
            right_elbow_angle: right_elbow,
            torso_lean,
            knee_asymmetry: (left_knee - right_knee).abs(),
            elbow_asymmetry: (left_elbow - right_elbow).abs(),
            arm_spread,
            leg_spread,
            is_upright,
            is_leaning,
            is_horizontal,
            wrists_above_shoulders: wrist_mid.y < shoulder_mid.y - WRIST_LEVEL_TOLERANCE,
            wrists_at_shoulders: (wrist_mid.y - shoulder_mid.y).abs() <= WRIST_BAND,
            wrists_at_chest: wrist_mid.y > shoulder_mid.y && wrist_mid.y <= chest_floor,
            wrists_below_hips: wrist_mid.y > hip_mid.y + WRIST_LEVEL_TOLERANCE,
            wrists_above_head: wrist_mid.y < nose.y - WRIST_LEVEL_TOLERANCE,
            hip_knee_drop: knee_mid.y - hip_mid.y,
            wrist_shoulder_rise: shoulder_mid.y - wrist_mid.y,
            body_aspect: body_aspect(landmarks),
        };

        trace!(
            knee = features.knee_angle,
            hip = features.hip_angle,
            torso = features.torso_lean,
            "Extracted pose features"
        );

        Ok(features)
    }
}

/// (upright, leaning, horizontal); exactly one holds for any finite lean
fn lean_zone(torso_lean: f64) -> (bool, bool, bool) {
    (
        torso_lean < UPRIGHT_MAX_LEAN,
        (UPRIGHT_MAX_LEAN..HORIZONTAL_MIN_LEAN).contains(&torso_lean),
        torso_lean >= HORIZONTAL_MIN_LEAN,
    )
}

fn ratio_or_one(numerator: f64, denominator: f64) -> f64 {
    if denominator < MIN_SPAN {
        1.0
    } else {
        numerator / denominator
    }
}

/// Height/width of the box around shoulders, wrists, hips and ankles
fn body_aspect(landmarks: &[Landmark]) -> f64 {
    const JOINTS: [P; 8] = [
        P::LeftShoulder,
        P::RightShoulder,
        P::LeftWrist,
        P::RightWrist,
        P::LeftHip,
        P::RightHip,
        P::LeftAnkle,
        P::RightAnkle,
    ];

    let (mut min, mut max) = (
        Point::new(f64::INFINITY, f64::INFINITY),
        Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
    );
    for joint in JOINTS {
        let pt = joint.point(landmarks);
        min = Point::new(min.x.min(pt.x), min.y.min(pt.y));
        max = Point::new(max.x.max(pt.x), max.y.max(pt.y));
    }

    let width = max.x - min.x;
    let height = max.y - min.y;
    if width < MIN_SPAN {
        return MAX_BODY_ASPECT;
    }
    (height / width).min(MAX_BODY_ASPECT)
}
