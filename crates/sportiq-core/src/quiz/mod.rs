mod catalog;
mod history;
mod model;
mod session;

pub use catalog::QuizCatalog;
pub use history::QuizHistory;
pub use model::{Quiz, QuizDifficulty, QuizQuestion, QuizResult, SportCategory};
pub use session::{QuizPhase, QuizSession, QuizSnapshot};
