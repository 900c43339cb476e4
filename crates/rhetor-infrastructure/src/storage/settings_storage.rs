//! Settings file storage with ACID guarantees.
//!
//! Stores the typed [`Settings`] model as TOML, using a temporary file plus
//! atomic rename for writes and an exclusive lock file for updates.

use rhetor_core::config::Settings;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use crate::paths::RhetorPaths;

/// Errors that can occur during settings storage operations.
#[derive(Debug)]
pub enum SettingsStorageError {
    /// File I/O error.
    IoError(std::io::Error),
    /// TOML parsing error.
    TomlParseError(toml::de::Error),
    /// TOML serialization error.
    TomlSerError(toml::ser::Error),
    /// File locking error.
    LockError(String),
    /// Config directory not found.
    ConfigDirNotFound,
}

impl std::fmt::Display for SettingsStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            SettingsStorageError::TomlParseError(e) => write!(f, "TOML parse error: {}", e),
            SettingsStorageError::TomlSerError(e) => write!(f, "TOML serialization error: {}", e),
            SettingsStorageError::LockError(e) => write!(f, "Lock error: {}", e),
            SettingsStorageError::ConfigDirNotFound => {
                write!(f, "Could not determine home directory")
            }
        }
    }
}

impl std::error::Error for SettingsStorageError {}

impl From<std::io::Error> for SettingsStorageError {
    fn from(e: std::io::Error) -> Self {
        SettingsStorageError::IoError(e)
    }
}

impl From<toml::de::Error> for SettingsStorageError {
    fn from(e: toml::de::Error) -> Self {
        SettingsStorageError::TomlParseError(e)
    }
}

impl From<toml::ser::Error> for SettingsStorageError {
    fn from(e: toml::ser::Error) -> Self {
        SettingsStorageError::TomlSerError(e)
    }
}

/// Storage for the settings file (config.toml).
///
/// Provides:
/// - **Atomicity**: Updates are all-or-nothing via tmp file + atomic rename
/// - **Consistency**: TOML syntax validation on load/save
/// - **Isolation**: File locking prevents concurrent modifications
/// - **Durability**: Explicit fsync before rename
pub struct SettingsStorage {
    path: PathBuf,
}

impl SettingsStorage {
    /// Creates a settings storage handle for the given file.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Creates a settings storage handle at the default location
    /// (~/.config/rhetor/config.toml).
    pub fn default_location() -> Result<Self, SettingsStorageError> {
        let path =
            RhetorPaths::config_file().map_err(|_| SettingsStorageError::ConfigDirNotFound)?;
        Ok(Self::new(path))
    }

    /// Loads the settings file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Settings))`: Successfully loaded and parsed
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<Settings>, SettingsStorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let settings = toml::from_str(&content)?;
        Ok(Some(settings))
    }

    /// Loads the settings file, substituting defaults when it is absent.
    pub fn load_or_default(&self) -> Result<Settings, SettingsStorageError> {
        Ok(self.load()?.unwrap_or_default())
    }

    /// Saves settings atomically via a temporary file and rename.
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsStorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(settings)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;

        // Ensure data is written to disk before the rename
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Performs a transactional update with file locking.
    ///
    /// The update function receives the current settings (or defaults when
    /// the file is absent) and can modify them; the result is atomically
    /// written back.
    pub fn update<F>(&self, f: F) -> Result<Settings, SettingsStorageError>
    where
        F: FnOnce(&mut Settings),
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut settings = self.load_or_default()?;
        f(&mut settings);
        self.save(&settings)?;

        Ok(settings)
    }

    fn temp_path(&self) -> Result<PathBuf, SettingsStorageError> {
        let parent = self.path.parent().ok_or_else(|| {
            SettingsStorageError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        })?;

        let file_name = self.path.file_name().ok_or_else(|| {
            SettingsStorageError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

/// A file lock guard that automatically releases the lock when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, SettingsStorageError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive().map_err(|e| {
                SettingsStorageError::LockError(format!("Failed to acquire lock: {}", e))
            })?;
        }

        #[cfg(not(unix))]
        {
            // No file locking on non-Unix systems; acceptable for a
            // single-user CLI
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock is automatic when the file handle is dropped.
        // Removing the lock file is best effort.
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SettingsStorage::new(temp_dir.path().join("config.toml"));

        let settings = Settings {
            default_model: Some("microsoft/DialoGPT-medium".to_string()),
            fallacy_rate: 0.5,
            show_coaching: false,
        };

        storage.save(&settings).unwrap();

        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SettingsStorage::new(temp_dir.path().join("missing.toml"));

        assert!(storage.load().unwrap().is_none());
        assert_eq!(storage.load_or_default().unwrap(), Settings::default());
    }

    #[test]
    fn test_update_creates_file_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SettingsStorage::new(temp_dir.path().join("config.toml"));

        let updated = storage
            .update(|settings| {
                settings.fallacy_rate = 0.1;
            })
            .unwrap();

        assert!((updated.fallacy_rate - 0.1).abs() < f64::EPSILON);
        assert!(updated.show_coaching, "untouched fields keep their defaults");

        let loaded = storage.load().unwrap().unwrap();
        assert!((loaded.fallacy_rate - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("config.toml");
        let storage = SettingsStorage::new(file_path.clone());

        storage.save(&Settings::default()).unwrap();

        let tmp_path = temp_dir.path().join(".config.toml.tmp");
        assert!(!tmp_path.exists());
        assert!(file_path.exists());
    }

    #[test]
    fn test_update_releases_lock_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("config.toml");
        let storage = SettingsStorage::new(file_path.clone());

        storage.update(|_| {}).unwrap();

        assert!(!file_path.with_extension("lock").exists());
    }
}
