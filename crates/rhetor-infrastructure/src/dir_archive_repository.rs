//! Directory-backed SessionArchiveRepository implementation.
//!
//! Completed practice sessions are stored one JSON file per session under
//! the archive directory. Writes go through a temporary file plus atomic
//! rename so a crash never leaves a half-written transcript behind.

use async_trait::async_trait;
use rhetor_core::error::{Result, RhetorError};
use rhetor_core::session::{PracticeSession, SessionArchiveRepository};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::paths::RhetorPaths;

/// Session archive stored as one JSON file per session.
///
/// Directory structure:
/// ```text
/// archive/
/// ├── <session-id-1>.json
/// └── <session-id-2>.json
/// ```
pub struct DirArchiveRepository {
    archive_dir: PathBuf,
}

impl DirArchiveRepository {
    /// Creates a repository at the default location
    /// (~/.config/rhetor/archive).
    pub async fn default_location() -> Result<Self> {
        let archive_dir = RhetorPaths::archive_dir()
            .map_err(|e| RhetorError::configuration(format!("Failed to get archive dir: {e}")))?;
        Self::new(archive_dir).await
    }

    /// Creates a repository rooted at the given directory, creating it if
    /// needed.
    pub async fn new(archive_dir: impl AsRef<Path>) -> Result<Self> {
        let archive_dir = archive_dir.as_ref().to_path_buf();
        fs::create_dir_all(&archive_dir).await?;
        Ok(Self { archive_dir })
    }

    /// The directory session files are stored in.
    pub fn archive_dir(&self) -> &Path {
        &self.archive_dir
    }

    fn session_path(&self, session_id: &str) -> PathBuf {
        self.archive_dir.join(format!("{session_id}.json"))
    }

    async fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "session.json".to_string());
        let tmp_path = self.archive_dir.join(format!(".{file_name}.tmp"));

        let mut tmp_file = fs::File::create(&tmp_path).await?;
        tmp_file.write_all(content.as_bytes()).await?;

        // Ensure data is written to disk before the rename
        tmp_file.sync_all().await?;
        drop(tmp_file);

        fs::rename(&tmp_path, path).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionArchiveRepository for DirArchiveRepository {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<PracticeSession>> {
        let path = self.session_path(session_id);

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let session = serde_json::from_str(&content)?;
        Ok(Some(session))
    }

    async fn save(&self, session: &PracticeSession) -> Result<()> {
        let content = serde_json::to_string_pretty(session)?;
        self.write_atomic(&self.session_path(&session.id), &content)
            .await
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        match fs::remove_file(self.session_path(session_id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_all(&self) -> Result<Vec<PracticeSession>> {
        let mut sessions = Vec::new();
        let mut entries = fs::read_dir(&self.archive_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let content = fs::read_to_string(&path).await?;
            match serde_json::from_str::<PracticeSession>(&content) {
                Ok(session) => sessions.push(session),
                Err(e) => {
                    // Skip corrupt files so one bad transcript does not hide
                    // the rest of the archive
                    tracing::warn!("Failed to parse archived session {}: {}", path.display(), e);
                }
            }
        }

        // Sort by updated_at descending (most recent first)
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_session(topic: &str) -> PracticeSession {
        let stages = vec!["Opening Statement".to_string(), "Rebuttal".to_string()];
        PracticeSession::new(topic, "Practice", &stages).unwrap()
    }

    #[tokio::test]
    async fn test_save_and_find_by_id() {
        let temp_dir = TempDir::new().unwrap();
        let repository = DirArchiveRepository::new(temp_dir.path()).await.unwrap();

        let session = sample_session("Should AI be regulated?");
        repository.save(&session).await.unwrap();

        let loaded = repository.find_by_id(&session.id).await.unwrap();
        assert_eq!(loaded, Some(session));
    }

    #[tokio::test]
    async fn test_find_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let repository = DirArchiveRepository::new(temp_dir.path()).await.unwrap();

        let result = repository.find_by_id("nonexistent-session").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let temp_dir = TempDir::new().unwrap();
        let repository = DirArchiveRepository::new(temp_dir.path()).await.unwrap();

        let session = sample_session("Remote work");
        repository.save(&session).await.unwrap();
        assert!(repository.find_by_id(&session.id).await.unwrap().is_some());

        repository.delete(&session.id).await.unwrap();
        assert!(repository.find_by_id(&session.id).await.unwrap().is_none());

        // Deleting a missing session is not an error
        repository.delete(&session.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_all_sorts_most_recent_first() {
        let temp_dir = TempDir::new().unwrap();
        let repository = DirArchiveRepository::new(temp_dir.path()).await.unwrap();

        let mut older = sample_session("Older");
        older.updated_at = "2026-01-01T00:00:00+00:00".to_string();
        let mut newer = sample_session("Newer");
        newer.updated_at = "2026-02-01T00:00:00+00:00".to_string();

        repository.save(&older).await.unwrap();
        repository.save(&newer).await.unwrap();

        let sessions = repository.list_all().await.unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].topic, "Newer");
        assert_eq!(sessions[1].topic, "Older");
    }

    #[tokio::test]
    async fn test_list_all_skips_corrupt_files() {
        let temp_dir = TempDir::new().unwrap();
        let repository = DirArchiveRepository::new(temp_dir.path()).await.unwrap();

        repository.save(&sample_session("Valid")).await.unwrap();
        std::fs::write(temp_dir.path().join("broken.json"), "{ not json").unwrap();

        let sessions = repository.list_all().await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].topic, "Valid");
    }

    #[tokio::test]
    async fn test_atomic_save_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let repository = DirArchiveRepository::new(temp_dir.path()).await.unwrap();

        let session = sample_session("Atomicity");
        repository.save(&session).await.unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
