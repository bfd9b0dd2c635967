//! Persisted key namespace.
//!
//! The launch gate, quiz history, workout history and profile each own a
//! disjoint set of keys.

pub const IS_ONBOARDING_COMPLETED: &str = "isOnboardingCompleted";
pub const CACHED_START_INFO: &str = "cachedStartInfo";
pub const CACHED_CONFIG_LOADED: &str = "cachedConfigLoaded";
pub const CACHED_SHOW_ONBOARDING: &str = "cachedShowOnboarding";
pub const LAST_CONFIG_FETCH_TIME: &str = "lastConfigFetchTime";

pub const QUIZ_RESULTS: &str = "quiz_results";
pub const WORKOUT_HISTORY: &str = "workout_history";
pub const CURRENT_USER: &str = "current_user";
