mod catalog;
pub mod coach;
mod history;
mod model;
mod session;

pub use catalog::WorkoutCatalog;
pub use history::{WorkoutHistory, WorkoutRecord};
pub use model::{
    Equipment, Exercise, MuscleGroup, WorkoutDifficulty, WorkoutPlan, WorkoutType,
};
pub use session::{WorkoutPhase, WorkoutSession, WorkoutSnapshot};
