//! Synthetic poses for tests and benchmarks
//!
//! Each pose is described by one set of joints per body side; the hands and
//! feet landmarks are placed on the wrists and ankles, the face on the nose.

use crate::landmarks::{Landmark, PoseLandmark as P, LANDMARK_COUNT};

/// Joints of one body side, as (x, y)
#[derive(Debug, Clone, Copy)]
pub struct Side {
    pub shoulder: (f64, f64),
    pub elbow: (f64, f64),
    pub wrist: (f64, f64),
    pub hip: (f64, f64),
    pub knee: (f64, f64),
    pub ankle: (f64, f64),
}

impl Side {
    /// Shift every joint horizontally
    fn shifted(self, dx: f64) -> Self {
        let s = |(x, y): (f64, f64)| (x + dx, y);
        Self {
            shoulder: s(self.shoulder),
            elbow: s(self.elbow),
            wrist: s(self.wrist),
            hip: s(self.hip),
            knee: s(self.knee),
            ankle: s(self.ankle),
        }
    }
}

/// Per-joint half-spacing between the left and right side
#[derive(Debug, Clone, Copy)]
pub struct Spread {
    pub shoulder: f64,
    pub elbow: f64,
    pub wrist: f64,
    pub hip: f64,
    pub knee: f64,
    pub ankle: f64,
}

impl Spread {
    pub const fn uniform(half_width: f64) -> Self {
        Self {
            shoulder: half_width,
            elbow: half_width,
            wrist: half_width,
            hip: half_width,
            knee: half_width,
            ankle: half_width,
        }
    }
}

/// Assemble a 33-point landmark array from explicit sides
pub fn build(nose: (f64, f64), left: Side, right: Side) -> Vec<Landmark> {
    let mut landmarks = vec![Landmark::new(nose.0, nose.1); LANDMARK_COUNT];
    let mut put = |joint: P, (x, y): (f64, f64)| landmarks[joint.index()] = Landmark::new(x, y);

    for (side, shoulder, elbow, wrist, hands, hip, knee, ankle, feet) in [
        (
            left,
            P::LeftShoulder,
            P::LeftElbow,
            P::LeftWrist,
            [P::LeftPinky, P::LeftIndex, P::LeftThumb],
            P::LeftHip,
            P::LeftKnee,
            P::LeftAnkle,
            [P::LeftHeel, P::LeftFootIndex],
        ),
        (
            right,
            P::RightShoulder,
            P::RightElbow,
            P::RightWrist,
            [P::RightPinky, P::RightIndex, P::RightThumb],
            P::RightHip,
            P::RightKnee,
            P::RightAnkle,
            [P::RightHeel, P::RightFootIndex],
        ),
    ] {
        put(shoulder, side.shoulder);
        put(elbow, side.elbow);
        put(wrist, side.wrist);
        for hand in hands {
            put(hand, side.wrist);
        }
        put(hip, side.hip);
        put(knee, side.knee);
        put(ankle, side.ankle);
        for foot in feet {
            put(foot, side.ankle);
        }
    }
    landmarks
}

/// Build a pose from centerline joints, mirrored left/right by `spread`
pub fn mirrored(nose: (f64, f64), center: Side, spread: Spread) -> Vec<Landmark> {
    let offset = |c: Side, sign: f64| Side {
        shoulder: (c.shoulder.0 + sign * spread.shoulder, c.shoulder.1),
        elbow: (c.elbow.0 + sign * spread.elbow, c.elbow.1),
        wrist: (c.wrist.0 + sign * spread.wrist, c.wrist.1),
        hip: (c.hip.0 + sign * spread.hip, c.hip.1),
        knee: (c.knee.0 + sign * spread.knee, c.knee.1),
        ankle: (c.ankle.0 + sign * spread.ankle, c.ankle.1),
    };
    build(nose, offset(center, -1.0), offset(center, 1.0))
}

const SQUAT_CENTER: Side = Side {
    shoulder: (0.544, 0.35),
    elbow: (0.60, 0.47),
    wrist: (0.66, 0.58),
    hip: (0.50, 0.60),
    knee: (0.688, 0.668),
    ankle: (0.620, 0.856),
};

const STANDING_CENTER: Side = Side {
    shoulder: (0.50, 0.25),
    elbow: (0.50, 0.38),
    wrist: (0.50, 0.50),
    hip: (0.50, 0.50),
    knee: (0.50, 0.70),
    ankle: (0.50, 0.90),
};

/// Deep symmetric squat: knee ≈ 90°, hip ≈ 100°, torso lean ≈ 10°,
/// wrists near hip height
pub fn squat() -> Vec<Landmark> {
    mirrored((0.57, 0.26), SQUAT_CENTER, Spread::uniform(0.05))
}

/// [`squat`] with the knee gap at 60% of the ankle gap
pub fn valgus_squat() -> Vec<Landmark> {
    mirrored(
        (0.57, 0.26),
        SQUAT_CENTER,
        Spread { knee: 0.03, ..Spread::uniform(0.05) },
    )
}

/// Top of a push-up, side view
pub fn push_up() -> Vec<Landmark> {
    mirrored(
        (0.28, 0.48),
        Side {
            shoulder: (0.35, 0.50),
            elbow: (0.35, 0.62),
            wrist: (0.35, 0.74),
            hip: (0.60, 0.53),
            knee: (0.75, 0.555),
            ankle: (0.90, 0.58),
        },
        Spread::uniform(0.05),
    )
}

/// Forearm plank, side view
pub fn plank() -> Vec<Landmark> {
    mirrored(
        (0.28, 0.54),
        Side {
            shoulder: (0.35, 0.55),
            elbow: (0.35, 0.70),
            wrist: (0.22, 0.70),
            hip: (0.60, 0.58),
            knee: (0.75, 0.60),
            ankle: (0.90, 0.62),
        },
        Spread::uniform(0.05),
    )
}

/// Standing press with the bar locked out overhead
pub fn overhead_press() -> Vec<Landmark> {
    mirrored(
        (0.50, 0.15),
        Side {
            elbow: (0.50, 0.17),
            wrist: (0.50, 0.06),
            ..STANDING_CENTER
        },
        Spread { elbow: 0.09, wrist: 0.07, ..Spread::uniform(0.05) },
    )
}

/// Arms raised sideways to shoulder height
pub fn lateral_raise() -> Vec<Landmark> {
    mirrored(
        (0.50, 0.15),
        Side {
            elbow: (0.50, 0.26),
            wrist: (0.50, 0.27),
            ..STANDING_CENTER
        },
        Spread { elbow: 0.15, wrist: 0.25, ..Spread::uniform(0.05) },
    )
}

/// Relaxed standing, arms at the sides
pub fn standing() -> Vec<Landmark> {
    mirrored(
        (0.50, 0.15),
        STANDING_CENTER,
        Spread { elbow: 0.07, wrist: 0.07, ..Spread::uniform(0.05) },
    )
}

/// Forward lunge, left leg in front, side view
pub fn lunge() -> Vec<Landmark> {
    let front = Side {
        shoulder: (0.48, 0.32),
        elbow: (0.48, 0.44),
        wrist: (0.48, 0.55),
        hip: (0.48, 0.55),
        knee: (0.66, 0.57),
        ankle: (0.66, 0.77),
    };
    let rear = Side {
        knee: (0.46, 0.75),
        ankle: (0.28, 0.78),
        ..front.shifted(0.08)
    };
    build((0.52, 0.22), front, rear)
}
