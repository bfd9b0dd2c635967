use clap::Subcommand;
use sportiq_core::workout::{coach, WorkoutHistory};
use sportiq_core::{Event, ProfileService, Ticker, WorkoutCatalog, WorkoutSession, WorkoutType};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{clock, emit, open_store, print_json, runtime, CmdResult};

#[derive(Subcommand)]
pub enum WorkoutAction {
    /// Print the plan for a workout type as JSON
    Plan {
        /// Workout type (cardio, strength, flexibility, sport, recovery)
        workout_type: String,
    },
    /// Run a workout
    Run {
        /// Workout type
        workout_type: String,
        /// Step through every exercise without waiting for timers
        #[arg(long)]
        auto: bool,
    },
    /// Print stored workout records
    History,
}

pub fn run(action: WorkoutAction) -> CmdResult {
    match action {
        WorkoutAction::Plan { workout_type } => {
            let workout_type: WorkoutType = workout_type.parse()?;
            print_json(&WorkoutCatalog.plan_for(workout_type)?)
        }
        WorkoutAction::Run { workout_type, auto } => run_workout(&workout_type, auto),
        WorkoutAction::History => print_json(&WorkoutHistory::new(open_store()?).load()),
    }
}

fn run_workout(workout_type: &str, auto: bool) -> CmdResult {
    let workout_type: WorkoutType = workout_type.parse()?;
    let plan = WorkoutCatalog.plan_for(workout_type)?;

    let store = open_store()?;
    let mut session = WorkoutSession::new(store.clone(), clock());
    let started = session.start(plan);
    if started.is_empty() {
        return Err(format!("no exercises for {workout_type}").into());
    }
    started.iter().for_each(emit);

    let finished = if auto {
        let mut last = None;
        while session.is_active() {
            last = session.next_exercise();
            if let Some(event) = &last {
                emit(event);
            }
        }
        last
    } else {
        describe(&session);
        runtime()?.block_on(run_interactive(&mut session))?
    };

    if let Some(Event::WorkoutCompleted { record, .. }) = finished {
        eprintln!(
            "{} done in {}:{:02}, about {} kcal",
            record.title,
            record.total_elapsed_secs / 60,
            record.total_elapsed_secs % 60,
            record.estimated_calories()
        );
        for event in ProfileService::new(store, clock()).record_workout(&record) {
            emit(&event);
        }
    }
    Ok(())
}

async fn run_interactive(
    session: &mut WorkoutSession,
) -> Result<Option<Event>, Box<dyn std::error::Error>> {
    let mut ticker = Ticker::every_second();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    eprintln!("commands: n = next, p = previous, c = complete, q = abort");

    while session.is_active() {
        let ticking = session.is_ticking();
        let event = tokio::select! {
            () = ticker.next(), if ticking => session.tick(),
            line = lines.next_line() => match line? {
                Some(line) => match line.trim() {
                    "n" | "" => session.next_exercise(),
                    "p" => session.previous_exercise(),
                    "c" => session.complete(),
                    "q" => session.abort(),
                    other => {
                        eprintln!("unknown command: {other}");
                        None
                    }
                },
                None => session.abort(),
            },
        };

        let Some(event) = event else { continue };
        emit(&event);
        match event {
            Event::WorkoutCompleted { .. } | Event::WorkoutAborted { .. } => return Ok(Some(event)),
            Event::ExerciseStarted { .. } => {
                ticker.reset();
                describe(session);
            }
            _ => {}
        }
    }
    Ok(None)
}

fn describe(session: &WorkoutSession) {
    let Some(exercise) = session.current_exercise() else {
        return;
    };
    match (exercise.duration_secs, exercise.sets, exercise.reps) {
        (Some(secs), _, _) => eprintln!("\n{} for {}:{:02}", exercise.name, secs / 60, secs % 60),
        (None, Some(sets), Some(reps)) => eprintln!("\n{}: {sets} x {reps}", exercise.name),
        _ => eprintln!("\n{}", exercise.name),
    }
    for tip in coach::tips_for(exercise) {
        eprintln!("  - {tip}");
    }
}
