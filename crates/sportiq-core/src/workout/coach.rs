//! Exercise tips.

use rand::seq::SliceRandom;
use rand::Rng;

use super::model::Exercise;

const GENERAL_TIPS: [&str; 2] = [
    "Watch your breathing throughout the movement",
    "Keep a correct posture",
];

/// The exercise's own tips followed by general technique reminders.
pub fn tips_for(exercise: &Exercise) -> Vec<String> {
    exercise
        .tips
        .iter()
        .cloned()
        .chain(GENERAL_TIPS.iter().map(|t| (*t).to_string()))
        .collect()
}

/// One tip picked at random from [`tips_for`].
pub fn random_tip<R: Rng + ?Sized>(exercise: &Exercise, rng: &mut R) -> Option<String> {
    tips_for(exercise).choose(rng).cloned()
}
