//! Body landmark types
//!
//! Index layout follows the BlazePose 33-point topology used by MediaPipe.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Number of landmarks in a full pose
pub const LANDMARK_COUNT: usize = 33;

/// Minimum landmark count needed for feature extraction (through the ankles)
pub const MIN_LANDMARKS: usize = 29;

/// One body-joint observation in normalized image space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position, 0 = left edge, 1 = right edge
    pub x: f64,
    /// Vertical position, 0 = top, 1 = bottom
    pub y: f64,
    /// Relative depth (smaller is closer to the camera)
    #[serde(default)]
    pub z: f64,
    /// Detector confidence (0-1)
    #[serde(default = "default_visibility")]
    pub visibility: f64,
}

fn default_visibility() -> f64 {
    1.0
}

impl Landmark {
    /// Create a fully visible landmark at (x, y)
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0, visibility: 1.0 }
    }

    /// Image-plane position
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Anatomical landmark identities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum PoseLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl PoseLandmark {
    /// Position in the landmark array
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Image-plane position of this joint.
    ///
    /// Callers check the array length against [`MIN_LANDMARKS`] first; a
    /// missing joint yields the origin rather than a panic.
    pub fn point(self, landmarks: &[Landmark]) -> Point {
        landmarks
            .get(self.index())
            .map(Landmark::point)
            .unwrap_or_default()
    }
}

/// Output of the external pose detector for one image or video frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoseDetection {
    /// Detected landmarks (33, or fewer when occluded)
    pub landmarks: Vec<Landmark>,
    /// Detector fell back to degraded or synthetic output
    #[serde(default)]
    pub is_fallback: bool,
}

impl PoseDetection {
    /// Wrap a landmark array from a regular detection
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks, is_fallback: false }
    }

    /// Whether the array is long enough for feature extraction
    pub fn is_complete(&self) -> bool {
        self.landmarks.len() >= MIN_LANDMARKS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_match_detector_layout() {
        assert_eq!(PoseLandmark::Nose.index(), 0);
        assert_eq!(PoseLandmark::LeftShoulder.index(), 11);
        assert_eq!(PoseLandmark::RightShoulder.index(), 12);
        assert_eq!(PoseLandmark::LeftWrist.index(), 15);
        assert_eq!(PoseLandmark::LeftHip.index(), 23);
        assert_eq!(PoseLandmark::RightAnkle.index(), 28);
        assert_eq!(PoseLandmark::RightFootIndex.index(), LANDMARK_COUNT - 1);
    }

    #[test]
    fn test_missing_joint_is_origin() {
        let landmarks = vec![Landmark::new(0.4, 0.6); 5];
        assert_eq!(PoseLandmark::LeftKnee.point(&landmarks), Point::default());
        assert_eq!(PoseLandmark::Nose.point(&landmarks), Point::new(0.4, 0.6));
    }

    #[test]
    fn test_deserialize_tolerates_missing_fields() {
        let lm: Landmark = serde_json::from_str(r#"{"x":0.5,"y":0.25}"#).unwrap();
        assert_eq!(lm.visibility, 1.0);
        assert_eq!(lm.z, 0.0);
    }

    #[test]
    fn test_detection_completeness() {
        let short = PoseDetection::new(vec![Landmark::default(); MIN_LANDMARKS - 1]);
        assert!(!short.is_complete());
        let enough = PoseDetection::new(vec![Landmark::default(); MIN_LANDMARKS]);
        assert!(enough.is_complete());
        assert!(!enough.is_fallback);
    }
}
