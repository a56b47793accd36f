//! Exercise catalog

use crate::criteria::{self, FormCriteria, GENERIC_CRITERIA};
use crate::exercise::ExerciseId;
use crate::muscles::MuscleGroup::{self, *};
use crate::rules::{self, ExerciseRule, GENERIC_RULE};

/// Everything the engine knows about one exercise
#[derive(Debug, Clone, Copy)]
pub struct ExerciseEntry {
    pub id: ExerciseId,
    pub display_name: &'static str,
    /// Heuristic classification rule
    pub rule: &'static ExerciseRule,
    /// Exercise whose form criteria this one borrows
    pub alias_of: Option<ExerciseId>,
    /// Criteria authored for this exercise directly
    pub criteria: Option<&'static FormCriteria>,
    /// Muscles the movement trains
    pub primary_muscles: &'static [MuscleGroup],
}

impl ExerciseEntry {
    /// Criteria to score this exercise with: its own, else its alias
    /// target's, else the generic stability/alignment pair.
    pub fn form_criteria(&self) -> &'static FormCriteria {
        self.criteria
            .or_else(|| self.alias_of.and_then(|target| target.entry().criteria))
            .unwrap_or(&GENERIC_CRITERIA)
    }
}

const fn entry(
    id: ExerciseId,
    display_name: &'static str,
    rule: &'static ExerciseRule,
    criteria: Option<&'static FormCriteria>,
    primary_muscles: &'static [MuscleGroup],
) -> ExerciseEntry {
    ExerciseEntry {
        id,
        display_name,
        rule,
        alias_of: None,
        criteria,
        primary_muscles,
    }
}

const fn alias(
    id: ExerciseId,
    display_name: &'static str,
    target: ExerciseId,
    primary_muscles: &'static [MuscleGroup],
) -> ExerciseEntry {
    ExerciseEntry {
        id,
        display_name,
        rule: &GENERIC_RULE,
        alias_of: Some(target),
        criteria: None,
        primary_muscles,
    }
}

static ENTRIES: [ExerciseEntry; 24] = [
    entry(
        ExerciseId::Squat,
        "Squat",
        &rules::SQUAT,
        Some(&criteria::SQUAT),
        &[Quadriceps, Glutes, Hamstrings, Core],
    ),
    entry(
        ExerciseId::Lunge,
        "Lunge",
        &rules::LUNGE,
        Some(&criteria::LUNGE),
        &[Quadriceps, Glutes, Hamstrings],
    ),
    entry(
        ExerciseId::Deadlift,
        "Deadlift",
        &rules::DEADLIFT,
        Some(&criteria::DEADLIFT),
        &[Hamstrings, Glutes, LowerBack, UpperBack, Forearms],
    ),
    entry(
        ExerciseId::PushUp,
        "Push-up",
        &rules::PUSH_UP,
        Some(&criteria::PUSH_UP),
        &[Chest, Triceps, Shoulders, Core],
    ),
    entry(
        ExerciseId::Plank,
        "Plank",
        &rules::PLANK,
        Some(&criteria::PLANK),
        &[Core, Shoulders, Glutes],
    ),
    entry(
        ExerciseId::BenchPress,
        "Bench Press",
        &rules::BENCH_PRESS,
        Some(&criteria::BENCH_PRESS),
        &[Chest, Triceps, Shoulders],
    ),
    entry(
        ExerciseId::OverheadPress,
        "Overhead Press",
        &rules::OVERHEAD_PRESS,
        Some(&criteria::OVERHEAD_PRESS),
        &[Shoulders, Triceps, Core],
    ),
    entry(
        ExerciseId::PullUp,
        "Pull-up",
        &rules::PULL_UP,
        Some(&criteria::PULL_UP),
        &[Lats, Biceps, UpperBack],
    ),
    entry(
        ExerciseId::BicepCurl,
        "Bicep Curl",
        &rules::BICEP_CURL,
        Some(&criteria::BICEP_CURL),
        &[Biceps, Forearms],
    ),
    entry(
        ExerciseId::LateralRaise,
        "Lateral Raise",
        &rules::LATERAL_RAISE,
        Some(&criteria::LATERAL_RAISE),
        &[Shoulders, UpperBack],
    ),
    entry(
        ExerciseId::BentOverRow,
        "Bent-over Row",
        &rules::BENT_OVER_ROW,
        Some(&criteria::BENT_OVER_ROW),
        &[Lats, UpperBack, Biceps, LowerBack],
    ),
    entry(
        ExerciseId::HipThrust,
        "Hip Thrust",
        &rules::HIP_THRUST,
        Some(&criteria::HIP_THRUST),
        &[Glutes, Hamstrings],
    ),
    entry(
        ExerciseId::JumpingJack,
        "Jumping Jack",
        &rules::JUMPING_JACK,
        None,
        &[Calves, Shoulders, Adductors],
    ),
    alias(
        ExerciseId::FrontSquat,
        "Front Squat",
        ExerciseId::Squat,
        &[Quadriceps, Glutes, Core],
    ),
    alias(
        ExerciseId::GobletSquat,
        "Goblet Squat",
        ExerciseId::Squat,
        &[Quadriceps, Glutes, Core],
    ),
    alias(
        ExerciseId::BulgarianSplitSquat,
        "Bulgarian Split Squat",
        ExerciseId::Lunge,
        &[Quadriceps, Glutes],
    ),
    alias(
        ExerciseId::RomanianDeadlift,
        "Romanian Deadlift",
        ExerciseId::Deadlift,
        &[Hamstrings, Glutes, LowerBack],
    ),
    alias(
        ExerciseId::InclineBench,
        "Incline Bench Press",
        ExerciseId::BenchPress,
        &[Chest, Shoulders, Triceps],
    ),
    alias(
        ExerciseId::DeclineBench,
        "Decline Bench Press",
        ExerciseId::BenchPress,
        &[Chest, Triceps],
    ),
    alias(
        ExerciseId::ChinUp,
        "Chin-up",
        ExerciseId::PullUp,
        &[Lats, Biceps],
    ),
    alias(
        ExerciseId::HammerCurl,
        "Hammer Curl",
        ExerciseId::BicepCurl,
        &[Biceps, Forearms],
    ),
    alias(
        ExerciseId::GluteBridge,
        "Glute Bridge",
        ExerciseId::HipThrust,
        &[Glutes, Hamstrings],
    ),
    entry(
        ExerciseId::Burpee,
        "Burpee",
        &GENERIC_RULE,
        None,
        &[Quadriceps, Chest, Core, Shoulders],
    ),
    entry(
        ExerciseId::MountainClimber,
        "Mountain Climber",
        &GENERIC_RULE,
        None,
        &[Core, HipFlexors, Shoulders],
    ),
];

impl ExerciseId {
    /// Catalog entry for this exercise
    pub fn entry(self) -> &'static ExerciseEntry {
        // ENTRIES follows declaration order
        &ENTRIES[self as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_follow_declaration_order() {
        for (i, id) in ExerciseId::ALL.into_iter().enumerate() {
            assert_eq!(ENTRIES[i].id, id);
            assert_eq!(id.entry().id, id);
        }
    }

    #[test]
    fn test_alias_resolves_to_target_criteria() {
        let incline = ExerciseId::InclineBench.entry().form_criteria();
        let bench = ExerciseId::BenchPress.entry().form_criteria();
        assert!(std::ptr::eq(incline, bench));

        let bridge = ExerciseId::GluteBridge.entry().form_criteria();
        assert!(std::ptr::eq(bridge, &criteria::HIP_THRUST));
    }

    #[test]
    fn test_every_exercise_has_criteria() {
        for id in ExerciseId::ALL {
            let criteria = id.entry().form_criteria();
            assert!(!criteria.checkpoints.is_empty());
            assert!((criteria.total_weight() - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_unmodelled_exercises_use_generic() {
        for id in [ExerciseId::Burpee, ExerciseId::MountainClimber, ExerciseId::JumpingJack] {
            assert!(std::ptr::eq(id.entry().form_criteria(), &GENERIC_CRITERIA));
        }
        assert!(ExerciseId::Burpee.entry().rule.terms.is_empty());
    }

    #[test]
    fn test_every_exercise_lists_muscles() {
        assert!(ExerciseId::ALL
            .iter()
            .all(|id| !id.entry().primary_muscles.is_empty()));
    }
}
