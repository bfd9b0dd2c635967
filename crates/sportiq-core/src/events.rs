use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gate::Screen;
use crate::quiz::{QuizResult, SportCategory};
use crate::remote_config::ResolutionSource;
use crate::workout::{WorkoutRecord, WorkoutType};

/// Every state change in the system produces an Event.
/// The UI renders from them; the analytics sink records them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Cold-start decision made.
    LaunchResolved {
        screen: Screen,
        source: ResolutionSource,
        fetched: bool,
        at: DateTime<Utc>,
    },
    OnboardingPageChanged {
        page: usize,
        total: usize,
        at: DateTime<Utc>,
    },
    OnboardingCompleted {
        skipped: bool,
        at: DateTime<Utc>,
    },
    QuizStarted {
        quiz_id: String,
        category: SportCategory,
        questions: usize,
        time_limit_secs: Option<u32>,
        at: DateTime<Utc>,
    },
    AnswerSelected {
        question_index: usize,
        option_index: usize,
        correct: bool,
        points_awarded: u32,
        score: u32,
        at: DateTime<Utc>,
    },
    QuestionAdvanced {
        question_index: usize,
        at: DateTime<Utc>,
    },
    QuizCompleted {
        result: QuizResult,
        /// The session time limit ran out before the last answer.
        timed_out: bool,
        at: DateTime<Utc>,
    },
    QuizAbandoned {
        question_index: usize,
        at: DateTime<Utc>,
    },
    WorkoutStarted {
        plan_id: String,
        workout_type: WorkoutType,
        exercises: usize,
        at: DateTime<Utc>,
    },
    ExerciseStarted {
        exercise_index: usize,
        name: String,
        duration_secs: Option<u32>,
        tip: Option<String>,
        at: DateTime<Utc>,
    },
    WorkoutCompleted {
        record: WorkoutRecord,
        at: DateTime<Utc>,
    },
    WorkoutAborted {
        exercise_index: usize,
        total_elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    AchievementUnlocked {
        achievement_id: String,
        title: String,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Analytics event name.
    pub fn name(&self) -> &'static str {
        match self {
            Event::LaunchResolved { .. } => "launch_resolved",
            Event::OnboardingPageChanged { .. } => "onboarding_page_changed",
            Event::OnboardingCompleted { .. } => "onboarding_completed",
            Event::QuizStarted { .. } => "quiz_started",
            Event::AnswerSelected { .. } => "answer_selected",
            Event::QuestionAdvanced { .. } => "question_advanced",
            Event::QuizCompleted { .. } => "quiz_completed",
            Event::QuizAbandoned { .. } => "quiz_abandoned",
            Event::WorkoutStarted { .. } => "workout_started",
            Event::ExerciseStarted { .. } => "exercise_started",
            Event::WorkoutCompleted { .. } => "workout_completed",
            Event::WorkoutAborted { .. } => "workout_aborted",
            Event::AchievementUnlocked { .. } => "achievement_unlocked",
        }
    }
}
