//! Quiz question bank.
//!
//! The bank is a single JSON document listing questions per sport category:
//!
//! ```json
//! { "quizzes": [ { "category": "Football", "questions": [ ... ] } ] }
//! ```
//!
//! Every category becomes one [`Quiz`]. Unknown categories are skipped with a
//! warning; a structurally invalid question makes the whole bank unavailable.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::model::{Quiz, QuizDifficulty, QuizQuestion, SportCategory};
use crate::error::CatalogError;

const BUNDLED: &str = include_str!("../../data/quizzes.json");

#[derive(Deserialize)]
struct BankFile {
    quizzes: Vec<BankCategory>,
}

#[derive(Deserialize)]
struct BankCategory {
    category: String,
    #[serde(default)]
    difficulty: Option<QuizDifficulty>,
    questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Default)]
pub struct QuizCatalog {
    quizzes: BTreeMap<SportCategory, Quiz>,
}

impl QuizCatalog {
    /// The question bank shipped with the crate.
    ///
    /// # Errors
    /// Returns an error if the bundled bank is invalid.
    pub fn bundled(time_limit_secs: Option<u32>) -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED, time_limit_secs)
    }

    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path, time_limit_secs: Option<u32>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Unavailable(format!("{}: {e}", path.display())))?;
        Self::from_json(&raw, time_limit_secs)
    }

    /// Build a catalog from a bank document. Every quiz gets a fresh id and
    /// the given session time limit.
    ///
    /// # Errors
    /// Returns an error if the document does not parse or a question is
    /// invalid.
    pub fn from_json(raw: &str, time_limit_secs: Option<u32>) -> Result<Self, CatalogError> {
        let bank: BankFile =
            serde_json::from_str(raw).map_err(|e| CatalogError::Unavailable(e.to_string()))?;

        let mut quizzes = BTreeMap::new();
        for entry in bank.quizzes {
            let Ok(category) = entry.category.parse::<SportCategory>() else {
                tracing::warn!(category = %entry.category, "skipping unknown quiz category");
                continue;
            };
            let quiz = Quiz {
                id: uuid::Uuid::new_v4().to_string(),
                category,
                difficulty: entry.difficulty.unwrap_or_default(),
                questions: entry.questions,
                time_limit_secs,
            };
            quiz.validate()?;
            quizzes.insert(category, quiz);
        }
        tracing::debug!(categories = quizzes.len(), "quiz catalog loaded");
        Ok(Self { quizzes })
    }

    /// # Errors
    /// Returns `NotFound` if the category has no quiz.
    pub fn quiz_for(&self, category: SportCategory) -> Result<&Quiz, CatalogError> {
        self.quizzes
            .get(&category)
            .ok_or_else(|| CatalogError::NotFound {
                kind: "quiz",
                key: category.name().to_string(),
            })
    }

    pub fn categories(&self) -> impl Iterator<Item = SportCategory> + '_ {
        self.quizzes.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_bank_is_valid() {
        let catalog = QuizCatalog::bundled(Some(120)).unwrap();
        assert!(!catalog.is_empty());
        let quiz = catalog.quiz_for(SportCategory::Football).unwrap();
        assert_eq!(quiz.time_limit_secs, Some(120));
        assert!(quiz.total_points() > 0);
    }

    #[test]
    fn missing_category_is_not_found() {
        let catalog = QuizCatalog::from_json(r#"{"quizzes": []}"#, None).unwrap();
        let err = catalog.quiz_for(SportCategory::Boxing).unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn unknown_category_is_skipped() {
        let catalog = QuizCatalog::from_json(
            r#"{"quizzes": [{"category": "Curling", "questions": []}]}"#,
            None,
        )
        .unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn malformed_bank_is_unavailable() {
        let err = QuizCatalog::from_json("{\"quizzes\": 3}", None).unwrap_err();
        assert!(matches!(err, CatalogError::Unavailable(_)));
    }

    #[test]
    fn out_of_range_answer_rejects_bank() {
        let raw = r#"{"quizzes": [{"category": "Tennis", "questions": [
            {"id": "t1", "question": "?", "options": ["a", "b"], "correctAnswer": 2,
             "explanation": "", "points": 10}
        ]}]}"#;
        let err = QuizCatalog::from_json(raw, None).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidEntry { .. }));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let err = QuizCatalog::from_path(Path::new("/nonexistent/bank.json"), None).unwrap_err();
        assert!(matches!(err, CatalogError::Unavailable(_)));
    }
}
