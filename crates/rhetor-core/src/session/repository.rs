//! Session archive repository trait.
//!
//! Defines the interface for persisting terminal session snapshots.

use super::model::PracticeSession;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for archived practice sessions.
///
/// Persistence is best-effort from the controller's point of view: the
/// session flow works entirely in memory and callers log and swallow
/// archive failures rather than surfacing them.
#[async_trait]
pub trait SessionArchiveRepository: Send + Sync {
    /// Finds an archived session by its ID.
    async fn find_by_id(&self, session_id: &str) -> Result<Option<PracticeSession>>;

    /// Saves a session snapshot.
    async fn save(&self, session: &PracticeSession) -> Result<()>;

    /// Deletes an archived session. Deleting a missing session is not an error.
    async fn delete(&self, session_id: &str) -> Result<()>;

    /// Lists all archived sessions, most recently updated first.
    async fn list_all(&self) -> Result<Vec<PracticeSession>>;
}
