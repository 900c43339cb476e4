//! Progress repository trait.

use super::model::UserProgress;
use crate::error::Result;
use async_trait::async_trait;

/// Repository trait for user progress persistence.
///
/// Best-effort: callers log and swallow failures, and the application must
/// keep working in memory when every call fails.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Loads the stored progress record, if one exists.
    async fn load(&self) -> Result<Option<UserProgress>>;

    /// Saves the progress record, replacing any previous one.
    async fn save(&self, progress: &UserProgress) -> Result<()>;
}
