//! Periodic driver for caller-ticked engines.
//!
//! Engines never own threads or timers. Tests call `tick()` directly; the
//! CLI uses [`Ticker`] or [`drive`] to call it once per second on the same
//! task that handles user input, so ticks and commands never interleave.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior};

use crate::events::Event;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// An engine advanced by periodic ticks.
pub trait Tickable {
    fn tick(&mut self) -> Option<Event>;

    /// Whether the engine still wants ticks.
    fn is_ticking(&self) -> bool;
}

/// A fixed-period tick source. The first tick fires one period after
/// creation; late ticks are delayed rather than bunched up.
#[derive(Debug)]
pub struct Ticker {
    interval: Interval,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    pub fn every_second() -> Self {
        Self::new(TICK_PERIOD)
    }

    pub async fn next(&mut self) {
        self.interval.tick().await;
    }

    /// Restart the period from now, dropping any overdue tick. Call when a new
    /// countdown begins so its first second is a full period.
    pub fn reset(&mut self) {
        self.interval.reset();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveOutcome {
    /// The engine stopped ticking on its own.
    Finished,
    /// The shutdown future resolved first.
    Shutdown,
}

/// Tick `engine` every `period` until it stops ticking or `shutdown`
/// resolves. Events produced by ticks are handed to `on_event`.
pub async fn drive<T, S, F>(engine: &mut T, period: Duration, shutdown: S, mut on_event: F) -> DriveOutcome
where
    T: Tickable,
    S: Future<Output = ()>,
    F: FnMut(&Event),
{
    let mut ticker = Ticker::new(period);
    tokio::pin!(shutdown);
    while engine.is_ticking() {
        tokio::select! {
            () = &mut shutdown => return DriveOutcome::Shutdown,
            () = ticker.next() => {
                if let Some(event) = engine.tick() {
                    on_event(&event);
                }
            }
        }
    }
    DriveOutcome::Finished
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::clock::ManualClock;
    use crate::quiz::{Quiz, QuizDifficulty, QuizQuestion, QuizSession, SportCategory};
    use crate::storage::Store;
    use crate::workout::{Exercise, WorkoutDifficulty, WorkoutPlan, WorkoutSession, WorkoutType};

    fn timed_quiz(limit: u32) -> Quiz {
        Quiz {
            id: "timed".into(),
            category: SportCategory::Boxing,
            difficulty: QuizDifficulty::Easy,
            questions: vec![QuizQuestion {
                id: "q".into(),
                prompt: "?".into(),
                options: vec!["a".into(), "b".into()],
                correct_option_index: 0,
                explanation: String::new(),
                points: 5,
                media_ref: None,
            }],
            time_limit_secs: Some(limit),
        }
    }

    fn session() -> QuizSession {
        QuizSession::new(Store::in_memory(), Arc::new(ManualClock::at_unix(0)))
    }

    #[tokio::test(start_paused = true)]
    async fn drives_until_engine_finishes() {
        let mut quiz = session();
        quiz.start(timed_quiz(3));
        let mut events = Vec::new();
        let outcome = drive(&mut quiz, TICK_PERIOD, std::future::pending(), |e| {
            events.push(e.name())
        })
        .await;
        assert_eq!(outcome, DriveOutcome::Finished);
        assert_eq!(events, vec!["quiz_completed"]);
        assert_eq!(quiz.elapsed_secs(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_ticking() {
        let mut quiz = session();
        quiz.start(timed_quiz(60));
        let shutdown = tokio::time::sleep(Duration::from_millis(10_500));
        let outcome = drive(&mut quiz, TICK_PERIOD, shutdown, |_| {}).await;
        assert_eq!(outcome, DriveOutcome::Shutdown);
        assert_eq!(quiz.elapsed_secs(), 10);
        assert!(!quiz.is_completed());
    }

    #[tokio::test(start_paused = true)]
    async fn idle_engine_returns_immediately() {
        let mut quiz = session();
        let outcome = drive(&mut quiz, TICK_PERIOD, std::future::pending(), |_| {}).await;
        assert_eq!(outcome, DriveOutcome::Finished);
    }

    fn exercise(name: &str, duration_secs: Option<u32>) -> Exercise {
        Exercise {
            id: name.to_lowercase(),
            name: name.into(),
            description: String::new(),
            muscle_groups: vec![],
            duration_secs,
            sets: duration_secs.is_none().then_some(3),
            reps: duration_secs.is_none().then_some(10),
            rest_between_sets_secs: 0,
            tips: vec![],
        }
    }

    #[tokio::test(start_paused = true)]
    async fn reset_gives_next_countdown_a_full_period() {
        let mut workout = WorkoutSession::new(Store::in_memory(), Arc::new(ManualClock::at_unix(0)));
        workout.start(WorkoutPlan {
            id: "mixed".into(),
            title: "Mixed".into(),
            description: String::new(),
            workout_type: WorkoutType::Strength,
            difficulty: WorkoutDifficulty::Beginner,
            duration_secs: 60,
            exercises: vec![exercise("Push-ups", None), exercise("Plank", Some(5))],
            tips: vec![],
            recommended_equipment: vec![],
        });
        let mut ticker = Ticker::every_second();

        // Set/rep exercise: nobody polls the ticker while the user works.
        assert!(!workout.is_ticking());
        tokio::time::sleep(Duration::from_millis(5_300)).await;

        let started = workout.next_exercise();
        assert!(matches!(started, Some(Event::ExerciseStarted { exercise_index: 1, .. })));
        ticker.reset();

        let before = Instant::now();
        ticker.next().await;
        assert_eq!(before.elapsed(), TICK_PERIOD);
        assert!(workout.tick().is_none());
        assert_eq!(workout.remaining_secs(), Some(4));
    }
}
