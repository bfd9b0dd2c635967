//! Workout session engine.
//!
//! Caller-ticked like the quiz engine. Only exercises with a fixed duration
//! count down; set/rep exercises wait for [`WorkoutSession::next_exercise`].
//!
//! ## State Transitions
//!
//! ```text
//! NotStarted -> Active(0) -> Active(1) -> ... -> Completed
//!                  \______________________________-> Aborted
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::coach;
use super::history::{WorkoutHistory, WorkoutRecord};
use super::model::{Exercise, WorkoutPlan};
use crate::clock::Clock;
use crate::events::Event;
use crate::storage::Store;
use crate::ticker::Tickable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutPhase {
    NotStarted,
    Active,
    Completed,
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSnapshot {
    pub phase: WorkoutPhase,
    pub plan_id: Option<String>,
    pub exercise_index: usize,
    pub total_exercises: usize,
    pub exercise_name: Option<String>,
    pub remaining_secs: Option<u32>,
    pub total_elapsed_secs: u64,
    pub progress: f64,
}

pub struct WorkoutSession {
    history: WorkoutHistory,
    clock: Arc<dyn Clock>,
    rng: StdRng,
    plan: Option<WorkoutPlan>,
    phase: WorkoutPhase,
    current_exercise_index: usize,
    furthest_index: usize,
    remaining_secs: Option<u32>,
    total_elapsed_secs: u64,
    started_at: Option<DateTime<Utc>>,
    record: Option<WorkoutRecord>,
}

impl WorkoutSession {
    pub fn new(store: Store, clock: Arc<dyn Clock>) -> Self {
        Self {
            history: WorkoutHistory::new(store),
            clock,
            rng: StdRng::from_entropy(),
            plan: None,
            phase: WorkoutPhase::NotStarted,
            current_exercise_index: 0,
            furthest_index: 0,
            remaining_secs: None,
            total_elapsed_secs: 0,
            started_at: None,
            record: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> WorkoutPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == WorkoutPhase::Active
    }

    pub fn plan(&self) -> Option<&WorkoutPlan> {
        self.plan.as_ref()
    }

    pub fn current_exercise_index(&self) -> usize {
        self.current_exercise_index
    }

    pub fn current_exercise(&self) -> Option<&Exercise> {
        self.plan.as_ref()?.exercises.get(self.current_exercise_index)
    }

    pub fn remaining_secs(&self) -> Option<u32> {
        self.remaining_secs
    }

    pub fn total_elapsed_secs(&self) -> u64 {
        self.total_elapsed_secs
    }

    /// The record written when the session completed.
    pub fn record(&self) -> Option<&WorkoutRecord> {
        self.record.as_ref()
    }

    pub fn progress(&self) -> f64 {
        match &self.plan {
            Some(plan) if !plan.exercises.is_empty() => {
                if self.phase == WorkoutPhase::Completed {
                    1.0
                } else {
                    self.current_exercise_index as f64 / plan.exercises.len() as f64
                }
            }
            _ => 0.0,
        }
    }

    pub fn snapshot(&self) -> WorkoutSnapshot {
        WorkoutSnapshot {
            phase: self.phase,
            plan_id: self.plan.as_ref().map(|p| p.id.clone()),
            exercise_index: self.current_exercise_index,
            total_exercises: self.plan.as_ref().map_or(0, |p| p.exercises.len()),
            exercise_name: self.current_exercise().map(|e| e.name.clone()),
            remaining_secs: self.remaining_secs,
            total_elapsed_secs: self.total_elapsed_secs,
            progress: self.progress(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin `plan` at its first exercise. A plan without exercises is
    /// refused and the session stays `NotStarted`.
    pub fn start(&mut self, plan: WorkoutPlan) -> Vec<Event> {
        self.reset();
        if plan.exercises.is_empty() {
            tracing::warn!(plan_id = %plan.id, "workout plan has no exercises");
            return Vec::new();
        }

        let now = self.clock.now();
        let started = Event::WorkoutStarted {
            plan_id: plan.id.clone(),
            workout_type: plan.workout_type,
            exercises: plan.exercises.len(),
            at: now,
        };
        tracing::debug!(plan_id = %plan.id, exercises = plan.exercises.len(), "workout started");
        self.plan = Some(plan);
        self.phase = WorkoutPhase::Active;
        self.started_at = Some(now);

        let mut events = vec![started];
        events.extend(self.enter_exercise(0));
        events
    }

    /// Advance manually; past the last exercise the workout completes.
    pub fn next_exercise(&mut self) -> Option<Event> {
        if !self.is_active() {
            return None;
        }
        let total = self.plan.as_ref()?.exercises.len();
        if self.current_exercise_index + 1 < total {
            self.enter_exercise(self.current_exercise_index + 1)
        } else {
            self.complete()
        }
    }

    /// Step back one exercise. Its timer restarts from the full duration.
    pub fn previous_exercise(&mut self) -> Option<Event> {
        if !self.is_active() || self.current_exercise_index == 0 {
            return None;
        }
        self.enter_exercise(self.current_exercise_index - 1)
    }

    /// Finish now, whatever the current exercise, and write the record.
    pub fn complete(&mut self) -> Option<Event> {
        if !self.is_active() {
            return None;
        }
        let plan = self.plan.as_ref()?;
        let now = self.clock.now();
        let record = WorkoutRecord {
            id: Uuid::new_v4(),
            plan_id: plan.id.clone(),
            workout_type: plan.workout_type,
            title: plan.title.clone(),
            exercises_visited: self.furthest_index + 1,
            total_exercises: plan.exercises.len(),
            total_elapsed_secs: self.total_elapsed_secs,
            started_at: self.started_at.unwrap_or(now),
            completed_at: now,
        };

        self.phase = WorkoutPhase::Completed;
        self.remaining_secs = None;

        if let Err(e) = self.history.append(&record) {
            tracing::warn!(error = %e, plan_id = %record.plan_id, "failed to save workout record");
        }
        tracing::debug!(elapsed = record.total_elapsed_secs, "workout completed");

        self.record = Some(record.clone());
        Some(Event::WorkoutCompleted { record, at: now })
    }

    /// Stop without writing a record.
    pub fn abort(&mut self) -> Option<Event> {
        if !self.is_active() {
            return None;
        }
        self.phase = WorkoutPhase::Aborted;
        self.remaining_secs = None;
        tracing::debug!(exercise = self.current_exercise_index, "workout aborted");
        Some(Event::WorkoutAborted {
            exercise_index: self.current_exercise_index,
            total_elapsed_secs: self.total_elapsed_secs,
            at: self.clock.now(),
        })
    }

    /// Call once per second. A timed exercise that runs out moves on to the
    /// next exercise, or completes the workout after the last one.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_ticking() {
            return None;
        }
        let remaining = self.remaining_secs?.saturating_sub(1);
        self.remaining_secs = Some(remaining);
        self.total_elapsed_secs += 1;
        if remaining == 0 {
            return self.next_exercise();
        }
        None
    }

    /// Only a running timed exercise wants ticks.
    pub fn is_ticking(&self) -> bool {
        self.is_active() && self.remaining_secs.is_some()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn enter_exercise(&mut self, index: usize) -> Option<Event> {
        let exercise = self.plan.as_ref()?.exercises.get(index)?;
        let tip = coach::random_tip(exercise, &mut self.rng);
        let event = Event::ExerciseStarted {
            exercise_index: index,
            name: exercise.name.clone(),
            duration_secs: exercise.duration_secs,
            tip,
            at: self.clock.now(),
        };
        // A zero duration has nothing to count down; it is advanced by hand.
        self.remaining_secs = exercise.duration_secs.filter(|secs| *secs > 0);
        self.current_exercise_index = index;
        self.furthest_index = self.furthest_index.max(index);
        Some(event)
    }

    fn reset(&mut self) {
        self.plan = None;
        self.phase = WorkoutPhase::NotStarted;
        self.current_exercise_index = 0;
        self.furthest_index = 0;
        self.remaining_secs = None;
        self.total_elapsed_secs = 0;
        self.started_at = None;
        self.record = None;
    }
}

impl Tickable for WorkoutSession {
    fn tick(&mut self) -> Option<Event> {
        WorkoutSession::tick(self)
    }

    fn is_ticking(&self) -> bool {
        WorkoutSession::is_ticking(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::workout::{WorkoutDifficulty, WorkoutType};

    fn exercise(name: &str, duration_secs: Option<u32>) -> Exercise {
        Exercise {
            id: name.to_lowercase(),
            name: name.into(),
            description: String::new(),
            muscle_groups: vec![],
            duration_secs,
            sets: duration_secs.is_none().then_some(3),
            reps: duration_secs.is_none().then_some(12),
            rest_between_sets_secs: 30,
            tips: vec![],
        }
    }

    fn plan(exercises: Vec<Exercise>) -> WorkoutPlan {
        WorkoutPlan {
            id: "plan-1".into(),
            title: "Test plan".into(),
            description: String::new(),
            workout_type: WorkoutType::Strength,
            difficulty: WorkoutDifficulty::Beginner,
            duration_secs: 600,
            exercises,
            tips: vec![],
            recommended_equipment: vec![],
        }
    }

    fn session() -> (WorkoutSession, ManualClock, Store) {
        let clock = ManualClock::at_unix(1_750_000_000);
        let store = Store::in_memory();
        (
            WorkoutSession::new(store.clone(), Arc::new(clock.clone())),
            clock,
            store,
        )
    }

    #[test]
    fn timed_exercises_count_down_to_completion() {
        let (mut s, _, store) = session();
        let events = s.start(plan(vec![
            exercise("Jumping jacks", Some(30)),
            exercise("Plank", Some(45)),
        ]));
        assert_eq!(events.len(), 2);

        let mut visited = vec![s.current_exercise_index()];
        let mut completions = 0;
        while s.is_ticking() {
            match s.tick() {
                Some(Event::ExerciseStarted { exercise_index, .. }) => visited.push(exercise_index),
                Some(Event::WorkoutCompleted { .. }) => completions += 1,
                _ => {}
            }
        }

        assert_eq!(visited, vec![0, 1]);
        assert_eq!(completions, 1);
        assert_eq!(s.phase(), WorkoutPhase::Completed);
        assert_eq!(s.total_elapsed_secs(), 75);
        assert_eq!(WorkoutHistory::new(store).load().len(), 1);
    }

    #[test]
    fn zero_duration_exercise_waits_for_user() {
        let (mut s, _, _) = session();
        s.start(plan(vec![exercise("Stretch", Some(0)), exercise("Plank", Some(10))]));
        assert!(!s.is_ticking());
        assert!(s.tick().is_none());
        assert_eq!(s.total_elapsed_secs(), 0);
        assert_eq!(s.current_exercise_index(), 0);

        s.next_exercise();
        assert_eq!(s.remaining_secs(), Some(10));
    }

    #[test]
    fn next_past_last_completes_exactly_once() {
        let (mut s, _, _) = session();
        s.start(plan(vec![
            exercise("Push-ups", None),
            exercise("Squats", None),
            exercise("Lunges", None),
        ]));
        let mut completed = 0;
        for _ in 0..3 {
            if let Some(Event::WorkoutCompleted { .. }) = s.next_exercise() {
                completed += 1;
            }
            assert!(s.current_exercise_index() < 3);
        }
        assert_eq!(completed, 1);
        assert!(s.next_exercise().is_none());
        assert_eq!(s.record().unwrap().exercises_visited, 3);
    }

    #[test]
    fn rep_exercise_does_not_tick() {
        let (mut s, _, _) = session();
        s.start(plan(vec![exercise("Push-ups", None), exercise("Plank", Some(10))]));
        assert!(!s.is_ticking());
        assert!(s.tick().is_none());
        assert_eq!(s.total_elapsed_secs(), 0);
        s.next_exercise();
        assert!(s.is_ticking());
        assert_eq!(s.remaining_secs(), Some(10));
    }

    #[test]
    fn navigation_restarts_timer() {
        let (mut s, _, _) = session();
        s.start(plan(vec![exercise("Run", Some(60)), exercise("Walk", Some(30))]));
        for _ in 0..20 {
            s.tick();
        }
        s.next_exercise();
        s.tick();
        s.previous_exercise();
        assert_eq!(s.current_exercise_index(), 0);
        assert_eq!(s.remaining_secs(), Some(60));
        assert_eq!(s.total_elapsed_secs(), 21);
    }

    #[test]
    fn previous_on_first_is_noop() {
        let (mut s, _, _) = session();
        s.start(plan(vec![exercise("Run", Some(60))]));
        assert!(s.previous_exercise().is_none());
        assert_eq!(s.current_exercise_index(), 0);
    }

    #[test]
    fn complete_early_records_partial_workout() {
        let (mut s, clock, store) = session();
        s.start(plan(vec![
            exercise("Run", Some(60)),
            exercise("Walk", Some(30)),
            exercise("Stretch", Some(30)),
        ]));
        clock.advance_secs(5);
        for _ in 0..5 {
            s.tick();
        }
        let event = s.complete().unwrap();
        assert!(matches!(event, Event::WorkoutCompleted { .. }));
        assert!(!s.is_active());
        assert!(!s.is_ticking());
        let record = WorkoutHistory::new(store).load().pop().unwrap();
        assert_eq!(record.exercises_visited, 1);
        assert_eq!(record.total_elapsed_secs, 5);
        assert!(!record.finished_all());
        assert!(s.complete().is_none());
    }

    #[test]
    fn abort_stops_without_record() {
        let (mut s, _, store) = session();
        s.start(plan(vec![exercise("Run", Some(60))]));
        s.tick();
        let event = s.abort().unwrap();
        assert!(matches!(event, Event::WorkoutAborted { total_elapsed_secs: 1, .. }));
        assert_eq!(s.phase(), WorkoutPhase::Aborted);
        assert!(s.tick().is_none());
        assert!(WorkoutHistory::new(store).load().is_empty());
    }

    #[test]
    fn empty_plan_is_refused() {
        let (mut s, _, _) = session();
        assert!(s.start(plan(vec![])).is_empty());
        assert_eq!(s.phase(), WorkoutPhase::NotStarted);
        assert!(s.next_exercise().is_none());
    }
}
