//! User profile, statistics and achievements.
//!
//! The profile lives under `current_user`. Completed quizzes and workouts
//! feed its statistics; achievements unlock from those statistics.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::StoreError;
use crate::events::Event;
use crate::quiz::QuizResult;
use crate::storage::{keys, Store};
use crate::workout::{WorkoutRecord, WorkoutType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyGoals {
    pub workout_count: u32,
    pub quiz_count: u32,
    pub learning_minutes: u32,
}

impl Default for WeeklyGoals {
    fn default() -> Self {
        Self {
            workout_count: 3,
            quiz_count: 5,
            learning_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub favorite_workout_types: Vec<WorkoutType>,
    #[serde(default)]
    pub weekly_goals: WeeklyGoals,
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            favorite_workout_types: Vec::new(),
            weekly_goals: WeeklyGoals::default(),
            notifications_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatistics {
    pub total_workouts: u32,
    pub total_quizzes: u32,
    pub correct_answers: u32,
    pub workout_minutes: u32,
    pub streak_days: u32,
    /// Day of the most recent quiz or workout, for the streak.
    #[serde(default)]
    pub last_active_on: Option<NaiveDate>,
}

impl UserStatistics {
    /// Count activity on `day` towards the streak.
    fn mark_active(&mut self, day: NaiveDate) {
        self.streak_days = match self.last_active_on {
            Some(last) if last == day => self.streak_days.max(1),
            Some(last) if last.succ_opt() == Some(day) => self.streak_days + 1,
            _ => 1,
        };
        self.last_active_on = Some(day);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon_name: String,
    pub is_unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// Unlock rule for one achievement.
struct AchievementRule {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    icon_name: &'static str,
    reached: fn(&UserStatistics) -> bool,
}

const RULES: [AchievementRule; 6] = [
    AchievementRule {
        id: "first_quiz",
        title: "First Quiz",
        description: "Complete your first quiz",
        icon_name: "questionmark.circle",
        reached: |s| s.total_quizzes >= 1,
    },
    AchievementRule {
        id: "quiz_master",
        title: "Quiz Master",
        description: "Complete 10 quizzes",
        icon_name: "star.circle",
        reached: |s| s.total_quizzes >= 10,
    },
    AchievementRule {
        id: "sharp_mind",
        title: "Sharp Mind",
        description: "Answer 50 questions correctly",
        icon_name: "brain.head.profile",
        reached: |s| s.correct_answers >= 50,
    },
    AchievementRule {
        id: "first_workout",
        title: "First Workout",
        description: "Complete your first workout",
        icon_name: "figure.run",
        reached: |s| s.total_workouts >= 1,
    },
    AchievementRule {
        id: "hour_of_power",
        title: "Hour of Power",
        description: "Train for 60 minutes in total",
        icon_name: "flame",
        reached: |s| s.workout_minutes >= 60,
    },
    AchievementRule {
        id: "on_a_roll",
        title: "On a Roll",
        description: "Stay active 7 days in a row",
        icon_name: "calendar",
        reached: |s| s.streak_days >= 7,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub fitness_level: FitnessLevel,
    pub preferences: UserPreferences,
    pub achievements: Vec<Achievement>,
    pub statistics: UserStatistics,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.into(),
            email: String::new(),
            fitness_level: FitnessLevel::default(),
            preferences: UserPreferences::default(),
            achievements: RULES
                .iter()
                .map(|rule| Achievement {
                    id: rule.id.to_string(),
                    title: rule.title.to_string(),
                    description: rule.description.to_string(),
                    icon_name: rule.icon_name.to_string(),
                    is_unlocked: false,
                    unlocked_at: None,
                })
                .collect(),
            statistics: UserStatistics::default(),
        }
    }

    pub fn unlocked(&self) -> impl Iterator<Item = &Achievement> {
        self.achievements.iter().filter(|a| a.is_unlocked)
    }

    /// Unlock every achievement whose rule now holds. Returns the newly
    /// unlocked ones.
    fn unlock_reached(&mut self, at: DateTime<Utc>) -> Vec<Achievement> {
        let mut unlocked = Vec::new();
        for rule in RULES.iter().filter(|r| (r.reached)(&self.statistics)) {
            match self.achievements.iter_mut().find(|a| a.id == rule.id) {
                Some(a) if a.is_unlocked => {}
                Some(a) => {
                    a.is_unlocked = true;
                    a.unlocked_at = Some(at);
                    unlocked.push(a.clone());
                }
                None => {
                    let a = Achievement {
                        id: rule.id.to_string(),
                        title: rule.title.to_string(),
                        description: rule.description.to_string(),
                        icon_name: rule.icon_name.to_string(),
                        is_unlocked: true,
                        unlocked_at: Some(at),
                    };
                    self.achievements.push(a.clone());
                    unlocked.push(a);
                }
            }
        }
        unlocked
    }
}

impl Default for User {
    fn default() -> Self {
        Self::new("athlete")
    }
}

pub struct ProfileService {
    store: Store,
    clock: Arc<dyn Clock>,
}

impl ProfileService {
    pub fn new(store: Store, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// The stored profile, or a fresh one if none is stored or it cannot
    /// be read.
    pub fn load_or_default(&self) -> User {
        match self.store.get::<User>(keys::CURRENT_USER) {
            Ok(Some(user)) => user,
            Ok(None) => User::default(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read profile, using a fresh one");
                User::default()
            }
        }
    }

    /// # Errors
    /// Returns an error if the profile cannot be written.
    pub fn save(&self, user: &User) -> Result<(), StoreError> {
        self.store.set(keys::CURRENT_USER, user)
    }

    pub fn record_quiz(&self, result: &QuizResult) -> Vec<Event> {
        self.update(|stats| {
            stats.total_quizzes += 1;
            stats.correct_answers += result.correct_answers;
        })
    }

    pub fn record_workout(&self, record: &WorkoutRecord) -> Vec<Event> {
        let minutes = u32::try_from(record.total_elapsed_secs / 60).unwrap_or(u32::MAX);
        self.update(|stats| {
            stats.total_workouts += 1;
            stats.workout_minutes = stats.workout_minutes.saturating_add(minutes);
        })
    }

    fn update(&self, apply: impl FnOnce(&mut UserStatistics)) -> Vec<Event> {
        let now = self.clock.now();
        let mut user = self.load_or_default();
        apply(&mut user.statistics);
        user.statistics.mark_active(now.date_naive());
        let unlocked = user.unlock_reached(now);

        if let Err(e) = self.save(&user) {
            tracing::warn!(error = %e, "failed to save profile");
        }

        unlocked
            .into_iter()
            .map(|a| {
                tracing::debug!(achievement = %a.id, "achievement unlocked");
                Event::AchievementUnlocked {
                    achievement_id: a.id,
                    title: a.title,
                    at: now,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::quiz::SportCategory;

    fn quiz_result(correct_answers: u32) -> QuizResult {
        QuizResult {
            id: Uuid::new_v4(),
            quiz_id: "q".into(),
            category: SportCategory::Football,
            score: correct_answers * 10,
            total_possible: 50,
            correct_answers,
            completed_at: Utc::now(),
            time_spent_secs: 60,
        }
    }

    fn workout_record(total_elapsed_secs: u64) -> WorkoutRecord {
        WorkoutRecord {
            id: Uuid::new_v4(),
            plan_id: "p".into(),
            workout_type: WorkoutType::Cardio,
            title: "Cardio workout".into(),
            exercises_visited: 2,
            total_exercises: 2,
            total_elapsed_secs,
            started_at: Utc::now(),
            completed_at: Utc::now(),
        }
    }

    fn service() -> (ProfileService, ManualClock) {
        let clock = ManualClock::at_unix(1_750_000_000);
        (
            ProfileService::new(Store::in_memory(), Arc::new(clock.clone())),
            clock,
        )
    }

    #[test]
    fn fresh_profile_has_locked_achievements() {
        let user = User::default();
        assert_eq!(user.achievements.len(), RULES.len());
        assert_eq!(user.unlocked().count(), 0);
    }

    #[test]
    fn first_quiz_unlocks_once() {
        let (svc, _) = service();
        let events = svc.record_quiz(&quiz_result(3));
        assert!(matches!(
            events.as_slice(),
            [Event::AchievementUnlocked { achievement_id, .. }] if achievement_id == "first_quiz"
        ));
        assert!(svc.record_quiz(&quiz_result(3)).is_empty());

        let user = svc.load_or_default();
        assert_eq!(user.statistics.total_quizzes, 2);
        assert_eq!(user.statistics.correct_answers, 6);
    }

    #[test]
    fn workout_minutes_accumulate() {
        let (svc, _) = service();
        let events = svc.record_workout(&workout_record(3600));
        let ids: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                Event::AchievementUnlocked { achievement_id, .. } => Some(achievement_id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(ids, ["first_workout", "hour_of_power"]);
        assert_eq!(svc.load_or_default().statistics.workout_minutes, 60);
    }

    #[test]
    fn streak_counts_consecutive_days() {
        let (svc, clock) = service();
        svc.record_quiz(&quiz_result(1));
        svc.record_quiz(&quiz_result(1));
        assert_eq!(svc.load_or_default().statistics.streak_days, 1);

        clock.advance_secs(86_400);
        svc.record_workout(&workout_record(600));
        assert_eq!(svc.load_or_default().statistics.streak_days, 2);

        clock.advance_secs(3 * 86_400);
        svc.record_workout(&workout_record(600));
        assert_eq!(svc.load_or_default().statistics.streak_days, 1);
    }

    #[test]
    fn profile_round_trips() {
        let (svc, _) = service();
        let mut user = User::new("sam");
        user.fitness_level = FitnessLevel::Advanced;
        user.preferences.favorite_workout_types = vec![WorkoutType::Recovery];
        svc.save(&user).unwrap();
        assert_eq!(svc.load_or_default(), user);
    }
}
