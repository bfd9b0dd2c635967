//! Workout catalog types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Cardio,
    Strength,
    Flexibility,
    Sport,
    Recovery,
}

impl WorkoutType {
    pub const ALL: [WorkoutType; 5] = [
        WorkoutType::Cardio,
        WorkoutType::Strength,
        WorkoutType::Flexibility,
        WorkoutType::Sport,
        WorkoutType::Recovery,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WorkoutType::Cardio => "Cardio",
            WorkoutType::Strength => "Power",
            WorkoutType::Flexibility => "Flexibility",
            WorkoutType::Sport => "Sport",
            WorkoutType::Recovery => "Recovery",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WorkoutType::Cardio => "Training to improve endurance and cardiovascular fitness",
            WorkoutType::Strength => "Exercises to build strength and muscle mass",
            WorkoutType::Flexibility => "Exercises to improve flexibility and mobility",
            WorkoutType::Sport => "Sports training and game exercises",
            WorkoutType::Recovery => "Light exercises for recovery",
        }
    }

    pub fn recommended_duration_secs(self) -> u32 {
        match self {
            WorkoutType::Cardio => 1800,
            WorkoutType::Strength => 2700,
            WorkoutType::Flexibility => 1200,
            WorkoutType::Sport => 3600,
            WorkoutType::Recovery => 900,
        }
    }

    pub fn default_calories_burn(self) -> u32 {
        match self {
            WorkoutType::Cardio => 300,
            WorkoutType::Strength => 250,
            WorkoutType::Flexibility => 150,
            WorkoutType::Sport => 400,
            WorkoutType::Recovery => 100,
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WorkoutType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cardio" => Ok(WorkoutType::Cardio),
            "strength" | "power" => Ok(WorkoutType::Strength),
            "flexibility" => Ok(WorkoutType::Flexibility),
            "sport" => Ok(WorkoutType::Sport),
            "recovery" => Ok(WorkoutType::Recovery),
            _ => Err(CatalogError::NotFound {
                kind: "workout type",
                key: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutDifficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl WorkoutDifficulty {
    pub fn recommended_experience(self) -> &'static str {
        match self {
            WorkoutDifficulty::Beginner => "0-3 months",
            WorkoutDifficulty::Intermediate => "3-12 months",
            WorkoutDifficulty::Advanced => "More than 1 year",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MuscleGroup {
    Legs,
    Core,
    Chest,
    Back,
    Shoulders,
    Arms,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub name: String,
    pub is_required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub muscle_groups: Vec<MuscleGroup>,
    /// Fixed duration; `None` for set/rep exercises the user advances by hand.
    pub duration_secs: Option<u32>,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    #[serde(default)]
    pub rest_between_sets_secs: u32,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl Exercise {
    pub fn is_timed(&self) -> bool {
        self.duration_secs.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    pub difficulty: WorkoutDifficulty,
    pub duration_secs: u32,
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub recommended_equipment: Vec<Equipment>,
}
