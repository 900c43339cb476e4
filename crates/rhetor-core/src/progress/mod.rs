//! User progress tracking.

mod model;
mod repository;

pub use model::{UserProgress, session_score};
pub use repository::ProgressRepository;
