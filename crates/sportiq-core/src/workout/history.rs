use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::WorkoutType;
use crate::error::StoreError;
use crate::storage::{keys, Store};

/// A finalized workout. Stored append-only under `workout_history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: Uuid,
    pub plan_id: String,
    pub workout_type: WorkoutType,
    pub title: String,
    pub exercises_visited: usize,
    pub total_exercises: usize,
    pub total_elapsed_secs: u64,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl WorkoutRecord {
    pub fn finished_all(&self) -> bool {
        self.exercises_visited >= self.total_exercises
    }

    /// The type's default calorie burn, scaled by time spent against the
    /// recommended duration.
    pub fn estimated_calories(&self) -> u32 {
        let full = u64::from(self.workout_type.recommended_duration_secs().max(1));
        let burn = u64::from(self.workout_type.default_calories_burn());
        u32::try_from(burn * self.total_elapsed_secs / full).unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone)]
pub struct WorkoutHistory {
    store: Store,
}

impl WorkoutHistory {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Vec<WorkoutRecord> {
        match self.store.get::<Vec<WorkoutRecord>>(keys::WORKOUT_HISTORY) {
            Ok(records) => records.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read workout history");
                Vec::new()
            }
        }
    }

    /// # Errors
    /// Returns an error if the updated history cannot be written.
    pub fn append(&self, record: &WorkoutRecord) -> Result<(), StoreError> {
        let mut records = self.load();
        records.push(record.clone());
        self.store.set(keys::WORKOUT_HISTORY, &records)
    }
}
