//! Integration tests for workout runs.
//!
//! Drives catalog plans with the tick driver under a paused tokio clock.

use std::sync::Arc;
use std::time::Duration;

use sportiq_core::ticker::TICK_PERIOD;
use sportiq_core::workout::{WorkoutHistory, WorkoutPhase};
use sportiq_core::{
    drive, DriveOutcome, Event, ManualClock, ProfileService, Store, WorkoutCatalog,
    WorkoutSession, WorkoutType,
};

fn session(store: &Store) -> WorkoutSession {
    WorkoutSession::new(store.clone(), Arc::new(ManualClock::at_unix(1_750_000_000)))
}

#[tokio::test(start_paused = true)]
async fn test_recovery_workout_runs_to_completion() {
    let store = Store::in_memory();
    let plan = WorkoutCatalog.plan_for(WorkoutType::Recovery).unwrap();
    let duration = u64::from(plan.exercises[0].duration_secs.unwrap());

    let mut workout = session(&store);
    let started = workout.start(plan);
    assert_eq!(started.len(), 2);
    assert!(matches!(started[1], Event::ExerciseStarted { tip: Some(_), .. }));

    let mut events = Vec::new();
    let outcome = drive(&mut workout, TICK_PERIOD, std::future::pending(), |e| {
        events.push(e.clone())
    })
    .await;

    assert_eq!(outcome, DriveOutcome::Finished);
    assert_eq!(workout.phase(), WorkoutPhase::Completed);
    assert_eq!(workout.total_elapsed_secs(), duration);
    let [Event::WorkoutCompleted { record, .. }] = events.as_slice() else {
        panic!("expected a single completion, got {events:?}");
    };
    assert!(record.finished_all());
    assert_eq!(WorkoutHistory::new(store.clone()).load(), vec![record.clone()]);

    let profile = ProfileService::new(store, Arc::new(ManualClock::at_unix(1_750_000_000)));
    profile.record_workout(record);
    assert_eq!(profile.load_or_default().statistics.workout_minutes, 15);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_then_abort_writes_nothing() {
    let store = Store::in_memory();
    let plan = WorkoutCatalog.plan_for(WorkoutType::Cardio).unwrap();

    let mut workout = session(&store);
    workout.start(plan);
    let outcome = drive(
        &mut workout,
        TICK_PERIOD,
        tokio::time::sleep(Duration::from_millis(30_500)),
        |_| {},
    )
    .await;

    assert_eq!(outcome, DriveOutcome::Shutdown);
    assert_eq!(workout.total_elapsed_secs(), 30);
    assert!(workout.abort().is_some());
    assert!(WorkoutHistory::new(store).load().is_empty());
}

#[test]
fn test_strength_plan_waits_for_manual_advance() {
    let store = Store::in_memory();
    let plan = WorkoutCatalog.plan_for(WorkoutType::Strength).unwrap();
    let len = plan.exercises.len();

    let mut workout = session(&store);
    workout.start(plan);
    assert!(!workout.is_ticking());

    let completions = (0..len)
        .filter_map(|_| workout.next_exercise())
        .filter(|e| matches!(e, Event::WorkoutCompleted { .. }))
        .count();
    assert_eq!(completions, 1);
    assert_eq!(WorkoutHistory::new(store).load().len(), 1);
}
