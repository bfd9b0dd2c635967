//! Quiz domain types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CatalogError;
use crate::workout::WorkoutType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SportCategory {
    Football,
    Basketball,
    Volleyball,
    Tennis,
    Swimming,
    Athletics,
    Gymnastics,
    Boxing,
    MartialArts,
    Yoga,
}

impl SportCategory {
    pub const ALL: [SportCategory; 10] = [
        SportCategory::Football,
        SportCategory::Basketball,
        SportCategory::Volleyball,
        SportCategory::Tennis,
        SportCategory::Swimming,
        SportCategory::Athletics,
        SportCategory::Gymnastics,
        SportCategory::Boxing,
        SportCategory::MartialArts,
        SportCategory::Yoga,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SportCategory::Football => "Football",
            SportCategory::Basketball => "Basketball",
            SportCategory::Volleyball => "Volleyball",
            SportCategory::Tennis => "Tennis",
            SportCategory::Swimming => "Swimming",
            SportCategory::Athletics => "Athletics",
            SportCategory::Gymnastics => "Gymnastics",
            SportCategory::Boxing => "Boxing",
            SportCategory::MartialArts => "Martial Arts",
            SportCategory::Yoga => "Yoga",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SportCategory::Football => "⚽️",
            SportCategory::Basketball => "🏀",
            SportCategory::Volleyball => "🏐",
            SportCategory::Tennis => "🎾",
            SportCategory::Swimming => "🏊",
            SportCategory::Athletics => "🏃",
            SportCategory::Gymnastics => "🤸",
            SportCategory::Boxing => "🥊",
            SportCategory::MartialArts => "🥋",
            SportCategory::Yoga => "🧘",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SportCategory::Football => "Rules, tactics and history of football",
            SportCategory::Basketball => "Techniques, strategies and stars of basketball",
            SportCategory::Volleyball => "The world of volleyball and its specifics",
            SportCategory::Tennis => "Tennis fundamentals and rules",
            SportCategory::Swimming => "Swimming styles and techniques",
            SportCategory::Athletics => "The disciplines of track and field",
            SportCategory::Gymnastics => "Kinds of gymnastics and their exercises",
            SportCategory::Boxing => "Boxing technique and competition rules",
            SportCategory::MartialArts => "Martial arts and their philosophy",
            SportCategory::Yoga => "Asanas and the principles of yoga",
        }
    }

    pub fn recommended_workouts(self) -> &'static [WorkoutType] {
        use WorkoutType::*;
        match self {
            SportCategory::Football | SportCategory::Basketball | SportCategory::Volleyball => {
                &[Cardio, Strength]
            }
            SportCategory::Tennis => &[Strength, Flexibility],
            SportCategory::Swimming => &[Cardio, Recovery],
            SportCategory::Athletics => &[Cardio, Strength, Flexibility],
            SportCategory::Gymnastics => &[Flexibility, Strength],
            SportCategory::Boxing | SportCategory::MartialArts => &[Strength, Cardio],
            SportCategory::Yoga => &[Flexibility, Recovery],
        }
    }
}

impl fmt::Display for SportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SportCategory {
    type Err = CatalogError;

    /// Accepts the display name or the snake_case id, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', '-'], " ");
        SportCategory::ALL
            .into_iter()
            .find(|c| c.name().to_lowercase() == wanted)
            .ok_or_else(|| CatalogError::NotFound {
                kind: "sport category",
                key: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuizDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    #[serde(alias = "question")]
    pub prompt: String,
    pub options: Vec<String>,
    #[serde(alias = "correctAnswer")]
    pub correct_option_index: usize,
    #[serde(default)]
    pub explanation: String,
    pub points: u32,
    #[serde(default, alias = "imageName")]
    pub media_ref: Option<String>,
}

impl QuizQuestion {
    /// # Errors
    /// Fails when there are fewer than two options or the correct index is
    /// out of range.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |message: String| CatalogError::InvalidEntry {
            id: self.id.clone(),
            message,
        };
        if self.options.len() < 2 {
            return Err(invalid(format!(
                "needs at least two options, has {}",
                self.options.len()
            )));
        }
        if self.correct_option_index >= self.options.len() {
            return Err(invalid(format!(
                "correct option {} out of range for {} options",
                self.correct_option_index,
                self.options.len()
            )));
        }
        Ok(())
    }

    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_option_index
    }
}

/// An immutable quiz as loaded from a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub category: SportCategory,
    #[serde(default)]
    pub difficulty: QuizDifficulty,
    pub questions: Vec<QuizQuestion>,
    /// Bounds the whole session, not each question.
    #[serde(default)]
    pub time_limit_secs: Option<u32>,
}

impl Quiz {
    pub fn total_points(&self) -> u32 {
        self.questions.iter().map(|q| q.points).sum()
    }

    /// # Errors
    /// Returns the first invalid question.
    pub fn validate(&self) -> Result<(), CatalogError> {
        self.questions.iter().try_for_each(QuizQuestion::validate)
    }
}

/// One completed attempt. Stored append-only under `quiz_results`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: Uuid,
    pub quiz_id: String,
    pub category: SportCategory,
    pub score: u32,
    pub total_possible: u32,
    #[serde(default)]
    pub correct_answers: u32,
    pub completed_at: DateTime<Utc>,
    pub time_spent_secs: u64,
}

impl QuizResult {
    /// 0.0 ..= 100.0; 0 when nothing was possible.
    pub fn percentage(&self) -> f64 {
        if self.total_possible == 0 {
            return 0.0;
        }
        f64::from(self.score) / f64::from(self.total_possible) * 100.0
    }

    pub fn grade(&self) -> &'static str {
        match self.percentage() {
            p if p >= 90.0 => "Excellent!",
            p if p >= 70.0 => "Good!",
            p if p >= 50.0 => "Not bad!",
            _ => "It could be better!",
        }
    }
}
