//! File-backed ProgressRepository implementation.
//!
//! The whole progress record lives in a single JSON file. Saves replace the
//! file atomically via a temporary file plus rename.

use async_trait::async_trait;
use rhetor_core::error::{Result, RhetorError};
use rhetor_core::progress::{ProgressRepository, UserProgress};
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::paths::RhetorPaths;

/// Progress record stored as a single JSON file.
pub struct FileProgressRepository {
    path: PathBuf,
}

impl FileProgressRepository {
    /// Creates a repository at the default location
    /// (~/.config/rhetor/progress.json).
    pub fn default_location() -> Result<Self> {
        let path = RhetorPaths::progress_file()
            .map_err(|e| RhetorError::configuration(format!("Failed to get progress path: {e}")))?;
        Ok(Self::new(path))
    }

    /// Creates a repository backed by the given file.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The file the progress record is stored in.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl ProgressRepository for FileProgressRepository {
    async fn load(&self) -> Result<Option<UserProgress>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let progress = serde_json::from_str(&content)?;
        Ok(Some(progress))
    }

    async fn save(&self, progress: &UserProgress) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(progress)?;

        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "progress.json".to_string());
        let tmp_path = self
            .path
            .parent()
            .map(|parent| parent.join(format!(".{file_name}.tmp")))
            .unwrap_or_else(|| PathBuf::from(format!(".{file_name}.tmp")));

        let mut tmp_file = fs::File::create(&tmp_path).await?;
        tmp_file.write_all(content.as_bytes()).await?;
        tmp_file.sync_all().await?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}
