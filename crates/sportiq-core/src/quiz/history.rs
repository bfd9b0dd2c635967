//! Append-only quiz result history.

use std::collections::BTreeMap;

use super::model::{QuizResult, SportCategory};
use crate::error::StoreError;
use crate::storage::{keys, Store};

#[derive(Debug, Clone)]
pub struct QuizHistory {
    store: Store,
}

impl QuizHistory {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// All stored results, oldest first. Unreadable history reads as empty.
    pub fn load(&self) -> Vec<QuizResult> {
        match self.store.get::<Vec<QuizResult>>(keys::QUIZ_RESULTS) {
            Ok(results) => results.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read quiz history");
                Vec::new()
            }
        }
    }

    /// # Errors
    /// Returns an error if the updated history cannot be written.
    pub fn append(&self, result: &QuizResult) -> Result<(), StoreError> {
        let mut results = self.load();
        results.push(result.clone());
        self.store.set(keys::QUIZ_RESULTS, &results)
    }

    /// Highest-scoring result per category, best first.
    pub fn best_by_category(&self) -> Vec<QuizResult> {
        let mut best: BTreeMap<SportCategory, QuizResult> = BTreeMap::new();
        for result in self.load() {
            match best.get(&result.category) {
                Some(current) if current.score >= result.score => {}
                _ => {
                    best.insert(result.category, result);
                }
            }
        }
        let mut results: Vec<_> = best.into_values().collect();
        results.sort_by(|a, b| b.score.cmp(&a.score));
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn result(category: SportCategory, score: u32) -> QuizResult {
        QuizResult {
            id: Uuid::new_v4(),
            quiz_id: format!("{category:?}"),
            category,
            score,
            total_possible: 60,
            correct_answers: 2,
            completed_at: Utc::now(),
            time_spent_secs: 42,
        }
    }

    #[test]
    fn stored_result_reloads_equal() {
        let history = QuizHistory::new(Store::in_memory());
        let original = result(SportCategory::Football, 40);
        history.append(&original).unwrap();
        assert_eq!(history.load(), vec![original]);
    }

    #[test]
    fn append_keeps_order() {
        let history = QuizHistory::new(Store::in_memory());
        let first = result(SportCategory::Football, 10);
        let second = result(SportCategory::Tennis, 20);
        history.append(&first).unwrap();
        history.append(&second).unwrap();
        assert_eq!(history.load(), vec![first, second]);
    }

    #[test]
    fn best_keeps_top_score_per_category() {
        let history = QuizHistory::new(Store::in_memory());
        for (category, score) in [
            (SportCategory::Football, 10),
            (SportCategory::Football, 50),
            (SportCategory::Yoga, 30),
            (SportCategory::Football, 20),
        ] {
            history.append(&result(category, score)).unwrap();
        }
        let best: Vec<_> = history
            .best_by_category()
            .into_iter()
            .map(|r| (r.category, r.score))
            .collect();
        assert_eq!(
            best,
            vec![(SportCategory::Football, 50), (SportCategory::Yoga, 30)]
        );
    }
}
