//! Form-scoring measurements
//!
//! Extends the classification features with the alignment values that
//! form checkpoints score: joint gaps, body-line straightness, limb tilt.

use crate::features::{FeatureExtractor, FeatureVector};
use crate::geometry::{angle_deg, distance, mid, tilt_from_horizontal, tilt_from_vertical, Point};
use crate::landmarks::{Landmark, PoseLandmark as P};
use crate::FeatureError;
use serde::{Deserialize, Serialize};

/// Left/right spans below this are a side view; gap ratios and tilts across
/// the body are not assessed and report neutral values.
pub const MIN_SIDE_SPAN: f64 = 0.03;

/// Measurements consumed by form checkpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseMeasurements {
    /// Classification features of the same frame
    pub features: FeatureVector,
    pub shoulder_width: f64,
    pub hip_width: f64,
    pub knee_gap: f64,
    pub ankle_gap: f64,
    /// Knee gap relative to the narrower of ankle gap and hip width.
    /// 1.0 means knees track over feet; lower values mean inward collapse.
    pub knee_valgus_ratio: f64,
    /// Smaller of the two knee angles (front leg in a lunge)
    pub min_knee_angle: f64,
    /// Larger of the two knee angles (rear leg in a lunge)
    pub max_knee_angle: f64,
    /// Shin angle from vertical on the more bent leg (0-90)
    pub front_shin_tilt: f64,
    /// Shoulder line angle from horizontal (0-90)
    pub shoulder_tilt: f64,
    /// Hip line angle from horizontal (0-90)
    pub hip_tilt: f64,
    /// Angle at the hips between shoulders and ankles (180 = straight body)
    pub body_line_angle: f64,
    /// Distance of the hip midpoint from the shoulder-ankle line
    pub hip_line_deviation: f64,
    /// Angle at the shoulders between nose and hips (180 = neutral neck)
    pub neck_angle: f64,
    /// Forearm angle from vertical, either direction (0-90)
    pub forearm_tilt: f64,
    /// Upper-arm angle from vertical, either direction (0-90)
    pub upper_arm_tilt: f64,
    /// Elbow gap / shoulder width
    pub elbow_flare_ratio: f64,
    /// Horizontal offset between elbow and shoulder midpoints
    pub elbow_shoulder_offset: f64,
    /// Horizontal offset between wrist and shoulder midpoints
    pub wrist_shoulder_offset: f64,
}

impl PoseMeasurements {
    /// Measure a landmark array; fails like [`FeatureExtractor::extract`]
    pub fn from_landmarks(landmarks: &[Landmark]) -> Result<Self, FeatureError> {
        let features = FeatureExtractor::new().extract(landmarks)?;
        let p = |id: P| id.point(landmarks);

        let shoulder_width = distance(p(P::LeftShoulder), p(P::RightShoulder));
        let hip_width = distance(p(P::LeftHip), p(P::RightHip));
        let knee_gap = distance(p(P::LeftKnee), p(P::RightKnee));
        let ankle_gap = distance(p(P::LeftAnkle), p(P::RightAnkle));
        let elbow_gap = distance(p(P::LeftElbow), p(P::RightElbow));

        let shoulder_mid = mid(p(P::LeftShoulder), p(P::RightShoulder));
        let hip_mid = mid(p(P::LeftHip), p(P::RightHip));
        let ankle_mid = mid(p(P::LeftAnkle), p(P::RightAnkle));
        let elbow_mid = mid(p(P::LeftElbow), p(P::RightElbow));
        let wrist_mid = mid(p(P::LeftWrist), p(P::RightWrist));

        let forearm_tilt = (fold_vertical(tilt_from_vertical(p(P::LeftElbow), p(P::LeftWrist)))
            + fold_vertical(tilt_from_vertical(p(P::RightElbow), p(P::RightWrist))))
            / 2.0;
        let upper_arm_tilt = (fold_vertical(tilt_from_vertical(p(P::LeftShoulder), p(P::LeftElbow)))
            + fold_vertical(tilt_from_vertical(p(P::RightShoulder), p(P::RightElbow))))
            / 2.0;

        let front_shin_tilt = if features.left_knee_angle <= features.right_knee_angle {
            tilt_from_vertical(p(P::LeftKnee), p(P::LeftAnkle))
        } else {
            tilt_from_vertical(p(P::RightKnee), p(P::RightAnkle))
        };

        Ok(Self {
            shoulder_width,
            hip_width,
            knee_gap,
            ankle_gap,
            knee_valgus_ratio: valgus_ratio(knee_gap, ankle_gap, hip_width),
            min_knee_angle: features.left_knee_angle.min(features.right_knee_angle),
            max_knee_angle: features.left_knee_angle.max(features.right_knee_angle),
            front_shin_tilt: fold_vertical(front_shin_tilt),
            shoulder_tilt: cross_body_tilt(p(P::LeftShoulder), p(P::RightShoulder)),
            hip_tilt: cross_body_tilt(p(P::LeftHip), p(P::RightHip)),
            body_line_angle: angle_deg(shoulder_mid, hip_mid, ankle_mid),
            hip_line_deviation: line_deviation(hip_mid, shoulder_mid, ankle_mid),
            neck_angle: angle_deg(p(P::Nose), shoulder_mid, hip_mid),
            forearm_tilt,
            upper_arm_tilt,
            elbow_flare_ratio: if shoulder_width < MIN_SIDE_SPAN {
                1.0
            } else {
                elbow_gap / shoulder_width
            },
            elbow_shoulder_offset: (elbow_mid.x - shoulder_mid.x).abs(),
            wrist_shoulder_offset: (wrist_mid.x - shoulder_mid.x).abs(),
            features,
        })
    }
}

fn fold_vertical(tilt: f64) -> f64 {
    tilt.min(180.0 - tilt)
}

fn valgus_ratio(knee_gap: f64, ankle_gap: f64, hip_width: f64) -> f64 {
    [ankle_gap, hip_width]
        .into_iter()
        .filter(|reference| *reference >= MIN_SIDE_SPAN)
        .map(|reference| knee_gap / reference)
        .fold(None, |acc: Option<f64>, r| Some(acc.map_or(r, |a| a.min(r))))
        .unwrap_or(1.0)
}

fn cross_body_tilt(left: Point, right: Point) -> f64 {
    if (left.x - right.x).abs() < MIN_SIDE_SPAN {
        return 0.0;
    }
    tilt_from_horizontal(left, right)
}

/// Perpendicular distance from `point` to the line through `a` and `b`
fn line_deviation(point: Point, a: Point, b: Point) -> f64 {
    let length = distance(a, b);
    if length < 1e-9 {
        return distance(point, a);
    }
    ((b.x - a.x) * (a.y - point.y) - (a.x - point.x) * (b.y - a.y)).abs() / length
}
