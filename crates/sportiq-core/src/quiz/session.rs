//! Quiz session engine.
//!
//! A caller-driven state machine for one quiz attempt. There is no internal
//! thread: the caller invokes [`QuizSession::tick`] once per second while
//! [`QuizSession::is_ticking`] is true.
//!
//! ## State Transitions
//!
//! ```text
//! NotStarted -> InProgress(i) -> AnswerRevealed(i) -> InProgress(i+1) -> ... -> Completed
//! ```
//!
//! A session time limit bounds the whole attempt: when it runs out the quiz
//! completes no matter which question is showing.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::history::QuizHistory;
use super::model::{Quiz, QuizQuestion, QuizResult, SportCategory};
use crate::clock::Clock;
use crate::events::Event;
use crate::storage::Store;
use crate::ticker::Tickable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizPhase {
    NotStarted,
    InProgress,
    AnswerRevealed,
    Completed,
}

/// Serializable view of a session for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSnapshot {
    pub phase: QuizPhase,
    pub quiz_id: Option<String>,
    pub category: Option<SportCategory>,
    pub question_index: usize,
    pub total_questions: usize,
    pub score: u32,
    pub selected_option: Option<usize>,
    pub answer_revealed: bool,
    pub remaining_secs: Option<u32>,
    pub elapsed_secs: u64,
    pub progress: f64,
}

pub struct QuizSession {
    history: QuizHistory,
    clock: Arc<dyn Clock>,
    quiz: Option<Quiz>,
    phase: QuizPhase,
    current_index: usize,
    score: u32,
    correct_answers: u32,
    selected_option: Option<usize>,
    remaining_secs: Option<u32>,
    elapsed_secs: u64,
    started_at: Option<DateTime<Utc>>,
    result: Option<QuizResult>,
}

impl QuizSession {
    pub fn new(store: Store, clock: Arc<dyn Clock>) -> Self {
        Self {
            history: QuizHistory::new(store),
            clock,
            quiz: None,
            phase: QuizPhase::NotStarted,
            current_index: 0,
            score: 0,
            correct_answers: 0,
            selected_option: None,
            remaining_secs: None,
            elapsed_secs: 0,
            started_at: None,
            result: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    pub fn answer_revealed(&self) -> bool {
        self.phase == QuizPhase::AnswerRevealed
    }

    pub fn is_completed(&self) -> bool {
        self.phase == QuizPhase::Completed
    }

    pub fn remaining_secs(&self) -> Option<u32> {
        self.remaining_secs
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// The result written when the session completed.
    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.quiz.as_ref()?.questions.get(self.current_index)
    }

    /// Whether the revealed answer was right.
    pub fn is_answer_correct(&self) -> Option<bool> {
        let selected = self.selected_option?;
        Some(self.current_question()?.is_correct(selected))
    }

    /// 0.0 ..= 1.0; reaches 1.0 exactly at completion.
    pub fn progress(&self) -> f64 {
        match &self.quiz {
            Some(quiz) if !quiz.questions.is_empty() => {
                self.current_index as f64 / quiz.questions.len() as f64
            }
            _ => 0.0,
        }
    }

    pub fn snapshot(&self) -> QuizSnapshot {
        QuizSnapshot {
            phase: self.phase,
            quiz_id: self.quiz.as_ref().map(|q| q.id.clone()),
            category: self.quiz.as_ref().map(|q| q.category),
            question_index: self.current_index,
            total_questions: self.quiz.as_ref().map_or(0, |q| q.questions.len()),
            score: self.score,
            selected_option: self.selected_option,
            answer_revealed: self.answer_revealed(),
            remaining_secs: self.remaining_secs,
            elapsed_secs: self.elapsed_secs,
            progress: self.progress(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a fresh attempt, discarding any previous session state.
    ///
    /// A quiz without questions leaves the session empty and returns `None`.
    pub fn start(&mut self, quiz: Quiz) -> Option<Event> {
        self.reset();
        if quiz.questions.is_empty() {
            tracing::warn!(quiz_id = %quiz.id, "quiz has no questions, session left empty");
            return None;
        }

        // A zero limit means no limit.
        let time_limit_secs = quiz.time_limit_secs.filter(|secs| *secs > 0);
        let now = self.clock.now();
        self.remaining_secs = time_limit_secs;
        self.started_at = Some(now);
        self.phase = QuizPhase::InProgress;
        tracing::debug!(quiz_id = %quiz.id, questions = quiz.questions.len(), "quiz started");

        let event = Event::QuizStarted {
            quiz_id: quiz.id.clone(),
            category: quiz.category,
            questions: quiz.questions.len(),
            time_limit_secs,
            at: now,
        };
        self.quiz = Some(quiz);
        Some(event)
    }

    /// Answer the current question. One shot per question: anything other
    /// than the first valid answer is ignored.
    pub fn select_answer(&mut self, option_index: usize) -> Option<Event> {
        if self.phase != QuizPhase::InProgress {
            tracing::debug!(phase = ?self.phase, "answer ignored outside an open question");
            return None;
        }
        let question = self.current_question()?;
        if option_index >= question.options.len() {
            tracing::warn!(
                option_index,
                options = question.options.len(),
                "rejected out-of-range answer"
            );
            return None;
        }

        let correct = question.is_correct(option_index);
        let points_awarded = if correct { question.points } else { 0 };
        self.score += points_awarded;
        self.correct_answers += u32::from(correct);
        self.selected_option = Some(option_index);
        self.phase = QuizPhase::AnswerRevealed;

        Some(Event::AnswerSelected {
            question_index: self.current_index,
            option_index,
            correct,
            points_awarded,
            score: self.score,
            at: self.clock.now(),
        })
    }

    /// Move past a revealed answer; after the last question the quiz
    /// completes and its result is written to history.
    pub fn next_question(&mut self) -> Option<Event> {
        if self.phase != QuizPhase::AnswerRevealed {
            tracing::debug!(phase = ?self.phase, "next question ignored before an answer");
            return None;
        }
        let total = self.quiz.as_ref()?.questions.len();
        if self.current_index + 1 < total {
            self.current_index += 1;
            self.selected_option = None;
            self.phase = QuizPhase::InProgress;
            Some(Event::QuestionAdvanced {
                question_index: self.current_index,
                at: self.clock.now(),
            })
        } else {
            self.complete(false)
        }
    }

    /// Stop the session without recording a result.
    pub fn abandon(&mut self) -> Option<Event> {
        if !self.is_ticking() {
            return None;
        }
        let event = Event::QuizAbandoned {
            question_index: self.current_index,
            at: self.clock.now(),
        };
        self.reset();
        Some(event)
    }

    /// Call once per second. Returns `Some(Event::QuizCompleted)` when the
    /// time limit runs out.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_ticking() {
            return None;
        }
        self.elapsed_secs += 1;
        let remaining = self.remaining_secs?.saturating_sub(1);
        self.remaining_secs = Some(remaining);
        if remaining == 0 {
            tracing::debug!("quiz time limit reached");
            return self.complete(true);
        }
        None
    }

    pub fn is_ticking(&self) -> bool {
        matches!(self.phase, QuizPhase::InProgress | QuizPhase::AnswerRevealed)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete(&mut self, timed_out: bool) -> Option<Event> {
        let quiz = self.quiz.as_ref()?;
        let now = self.clock.now();
        let time_spent_secs = self
            .started_at
            .map(|start| (now - start).num_seconds().max(0) as u64)
            .unwrap_or(self.elapsed_secs);

        let result = QuizResult {
            id: Uuid::new_v4(),
            quiz_id: quiz.id.clone(),
            category: quiz.category,
            score: self.score,
            total_possible: quiz.total_points(),
            correct_answers: self.correct_answers,
            completed_at: now,
            time_spent_secs,
        };

        self.current_index = quiz.questions.len();
        self.phase = QuizPhase::Completed;

        if let Err(e) = self.history.append(&result) {
            tracing::warn!(error = %e, quiz_id = %result.quiz_id, "failed to save quiz result");
        }
        tracing::debug!(score = result.score, total = result.total_possible, "quiz completed");

        self.result = Some(result.clone());
        Some(Event::QuizCompleted {
            result,
            timed_out,
            at: now,
        })
    }

    fn reset(&mut self) {
        self.quiz = None;
        self.phase = QuizPhase::NotStarted;
        self.current_index = 0;
        self.score = 0;
        self.correct_answers = 0;
        self.selected_option = None;
        self.remaining_secs = None;
        self.elapsed_secs = 0;
        self.started_at = None;
        self.result = None;
    }
}

impl Tickable for QuizSession {
    fn tick(&mut self) -> Option<Event> {
        QuizSession::tick(self)
    }

    fn is_ticking(&self) -> bool {
        QuizSession::is_ticking(self)
    }
}
