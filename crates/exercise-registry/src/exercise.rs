//! Exercise identifiers

use crate::RegistryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every exercise the engine knows about.
///
/// Declaration order is the registration order: classification ties go to
/// the exercise declared first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExerciseId {
    Squat,
    Lunge,
    Deadlift,
    PushUp,
    Plank,
    BenchPress,
    OverheadPress,
    PullUp,
    BicepCurl,
    LateralRaise,
    BentOverRow,
    HipThrust,
    JumpingJack,
    FrontSquat,
    GobletSquat,
    BulgarianSplitSquat,
    RomanianDeadlift,
    InclineBench,
    DeclineBench,
    ChinUp,
    HammerCurl,
    GluteBridge,
    Burpee,
    MountainClimber,
}

impl ExerciseId {
    /// All exercises in registration order
    pub const ALL: [ExerciseId; 24] = [
        ExerciseId::Squat,
        ExerciseId::Lunge,
        ExerciseId::Deadlift,
        ExerciseId::PushUp,
        ExerciseId::Plank,
        ExerciseId::BenchPress,
        ExerciseId::OverheadPress,
        ExerciseId::PullUp,
        ExerciseId::BicepCurl,
        ExerciseId::LateralRaise,
        ExerciseId::BentOverRow,
        ExerciseId::HipThrust,
        ExerciseId::JumpingJack,
        ExerciseId::FrontSquat,
        ExerciseId::GobletSquat,
        ExerciseId::BulgarianSplitSquat,
        ExerciseId::RomanianDeadlift,
        ExerciseId::InclineBench,
        ExerciseId::DeclineBench,
        ExerciseId::ChinUp,
        ExerciseId::HammerCurl,
        ExerciseId::GluteBridge,
        ExerciseId::Burpee,
        ExerciseId::MountainClimber,
    ];

    /// Result reported when a frame cannot be classified
    pub const FALLBACK: ExerciseId = ExerciseId::Squat;

    /// Stable string key (camelCase), as stored in correction history
    pub fn key(self) -> &'static str {
        match self {
            ExerciseId::Squat => "squat",
            ExerciseId::Lunge => "lunge",
            ExerciseId::Deadlift => "deadlift",
            ExerciseId::PushUp => "pushUp",
            ExerciseId::Plank => "plank",
            ExerciseId::BenchPress => "benchPress",
            ExerciseId::OverheadPress => "overheadPress",
            ExerciseId::PullUp => "pullUp",
            ExerciseId::BicepCurl => "bicepCurl",
            ExerciseId::LateralRaise => "lateralRaise",
            ExerciseId::BentOverRow => "bentOverRow",
            ExerciseId::HipThrust => "hipThrust",
            ExerciseId::JumpingJack => "jumpingJack",
            ExerciseId::FrontSquat => "frontSquat",
            ExerciseId::GobletSquat => "gobletSquat",
            ExerciseId::BulgarianSplitSquat => "bulgarianSplitSquat",
            ExerciseId::RomanianDeadlift => "romanianDeadlift",
            ExerciseId::InclineBench => "inclineBench",
            ExerciseId::DeclineBench => "declineBench",
            ExerciseId::ChinUp => "chinUp",
            ExerciseId::HammerCurl => "hammerCurl",
            ExerciseId::GluteBridge => "gluteBridge",
            ExerciseId::Burpee => "burpee",
            ExerciseId::MountainClimber => "mountainClimber",
        }
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ExerciseId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExerciseId::ALL
            .into_iter()
            .find(|id| id.key() == s)
            .ok_or_else(|| RegistryError::UnknownExercise(s.to_string()))
    }
}
