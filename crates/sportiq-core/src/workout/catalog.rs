//! Built-in workout plans, one per workout type.

use uuid::Uuid;

use super::model::{Exercise, MuscleGroup, WorkoutDifficulty, WorkoutPlan, WorkoutType};
use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, Default)]
pub struct WorkoutCatalog;

impl WorkoutCatalog {
    /// A fresh plan for `workout_type`.
    ///
    /// # Errors
    /// Returns `NotFound` when no exercises exist for the type.
    pub fn plan_for(&self, workout_type: WorkoutType) -> Result<WorkoutPlan, CatalogError> {
        let exercises = exercises_for(workout_type);
        if exercises.is_empty() {
            return Err(CatalogError::NotFound {
                kind: "workout",
                key: workout_type.name().to_string(),
            });
        }

        let mut tips: Vec<String> = exercises.iter().flat_map(|e| e.tips.clone()).collect();
        tips.sort();
        tips.dedup();

        Ok(WorkoutPlan {
            id: Uuid::new_v4().to_string(),
            title: format!("{} workout", workout_type.name()),
            description: workout_type.description().to_string(),
            workout_type,
            difficulty: WorkoutDifficulty::Beginner,
            duration_secs: workout_type.recommended_duration_secs(),
            exercises,
            tips,
            recommended_equipment: Vec::new(),
        })
    }

    /// Workout types that currently have a plan.
    pub fn available_types(&self) -> Vec<WorkoutType> {
        WorkoutType::ALL
            .into_iter()
            .filter(|t| !exercises_for(*t).is_empty())
            .collect()
    }
}

fn exercise(
    name: &str,
    description: &str,
    muscle_groups: &[MuscleGroup],
    duration_secs: Option<u32>,
    sets_reps: Option<(u32, u32)>,
    rest_between_sets_secs: u32,
    tips: &[&str],
) -> Exercise {
    Exercise {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        description: description.to_string(),
        muscle_groups: muscle_groups.to_vec(),
        duration_secs,
        sets: sets_reps.map(|(s, _)| s),
        reps: sets_reps.map(|(_, r)| r),
        rest_between_sets_secs,
        tips: tips.iter().map(|t| (*t).to_string()).collect(),
    }
}

fn exercises_for(workout_type: WorkoutType) -> Vec<Exercise> {
    use MuscleGroup::*;
    match workout_type {
        WorkoutType::Cardio => vec![
            exercise(
                "Running",
                "Running at a moderate pace to develop endurance",
                &[Legs],
                Some(900),
                None,
                60,
                &["Watch your breathing", "Keep a good posture"],
            ),
            exercise(
                "Jump rope",
                "Steady skipping to raise the heart rate",
                &[Legs, Shoulders],
                Some(300),
                None,
                30,
                &["Stay on the balls of your feet"],
            ),
        ],
        WorkoutType::Strength => vec![
            exercise(
                "Push-ups",
                "Classic push-ups",
                &[Chest, Arms, Core],
                None,
                Some((3, 15)),
                60,
                &["Keep your elbows close to your body", "Get down to parallel"],
            ),
            exercise(
                "Squats",
                "Bodyweight squats",
                &[Legs, Core],
                None,
                Some((3, 20)),
                60,
                &["Push your hips back", "Keep your heels down"],
            ),
            exercise(
                "Plank",
                "Hold a straight plank",
                &[Core, Shoulders],
                Some(60),
                None,
                0,
                &["Do not let your hips sag"],
            ),
        ],
        WorkoutType::Flexibility => vec![exercise(
            "Yoga",
            "Flexibility workout",
            &[Core, Back],
            Some(1800),
            None,
            0,
            &["Breathe deeply", "Don't overexert yourself"],
        )],
        WorkoutType::Recovery => vec![exercise(
            "Meditation",
            "Relaxing meditation",
            &[],
            Some(900),
            None,
            0,
            &["Focus on your breathing", "Relax all your muscles"],
        )],
        WorkoutType::Sport => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardio_plan_is_timed() {
        let plan = WorkoutCatalog.plan_for(WorkoutType::Cardio).unwrap();
        assert_eq!(plan.workout_type, WorkoutType::Cardio);
        assert!(plan.exercises.iter().all(Exercise::is_timed));
        assert_eq!(plan.exercises[0].duration_secs, Some(900));
    }

    #[test]
    fn strength_plan_mixes_sets_and_holds() {
        let plan = WorkoutCatalog.plan_for(WorkoutType::Strength).unwrap();
        assert_eq!(plan.exercises[0].sets, Some(3));
        assert_eq!(plan.exercises[0].reps, Some(15));
        assert!(!plan.exercises[0].is_timed());
        assert!(plan.exercises[2].is_timed());
    }

    #[test]
    fn sport_plan_is_unavailable() {
        let err = WorkoutCatalog.plan_for(WorkoutType::Sport).unwrap_err();
        assert!(err.is_retryable());
        assert!(!WorkoutCatalog.available_types().contains(&WorkoutType::Sport));
    }

    #[test]
    fn plan_tips_are_deduplicated() {
        let plan = WorkoutCatalog.plan_for(WorkoutType::Strength).unwrap();
        let mut sorted = plan.tips.clone();
        sorted.dedup();
        assert_eq!(sorted, plan.tips);
    }
}
