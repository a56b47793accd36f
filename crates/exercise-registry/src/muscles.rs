//! Muscle groups used to color body regions

use serde::{Deserialize, Serialize};

/// Body region a checkpoint or exercise is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MuscleGroup {
    Quadriceps,
    Hamstrings,
    Glutes,
    Calves,
    Adductors,
    HipFlexors,
    Core,
    LowerBack,
    UpperBack,
    Lats,
    Chest,
    Shoulders,
    Biceps,
    Triceps,
    Forearms,
}

impl MuscleGroup {
    /// Stable string key
    pub fn key(self) -> &'static str {
        match self {
            MuscleGroup::Quadriceps => "quadriceps",
            MuscleGroup::Hamstrings => "hamstrings",
            MuscleGroup::Glutes => "glutes",
            MuscleGroup::Calves => "calves",
            MuscleGroup::Adductors => "adductors",
            MuscleGroup::HipFlexors => "hipFlexors",
            MuscleGroup::Core => "core",
            MuscleGroup::LowerBack => "lowerBack",
            MuscleGroup::UpperBack => "upperBack",
            MuscleGroup::Lats => "lats",
            MuscleGroup::Chest => "chest",
            MuscleGroup::Shoulders => "shoulders",
            MuscleGroup::Biceps => "biceps",
            MuscleGroup::Triceps => "triceps",
            MuscleGroup::Forearms => "forearms",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_key_matches() {
        for muscle in [MuscleGroup::Quadriceps, MuscleGroup::HipFlexors, MuscleGroup::LowerBack] {
            let json = serde_json::to_string(&muscle).unwrap();
            assert_eq!(json, format!("\"{}\"", muscle.key()));
        }
    }
}
