//! Unified path management for rhetor configuration files.
//!
//! All configuration, secrets, and practice data live under a single
//! platform-appropriate config directory so every storage component agrees
//! on locations.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for rhetor.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/rhetor/            # Config directory
/// ├── config.toml              # Application settings
/// ├── secret.json              # API token
/// ├── progress.json            # Skill and fallacy-accuracy record
/// └── archive/                 # Completed practice transcripts
///     └── <session-id>.json
/// ```
pub struct RhetorPaths;

impl RhetorPaths {
    /// Returns the rhetor configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/rhetor/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("rhetor"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }

    /// Returns the path to the progress record.
    pub fn progress_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("progress.json"))
    }

    /// Returns the path to the completed-session archive directory.
    pub fn archive_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("archive"))
    }

    /// Ensures the secret file exists, creating it with a template if it
    /// doesn't.
    ///
    /// # Security Note
    ///
    /// Sets file permissions to 600 (user read/write only) on Unix systems.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to the secret file (existing or newly created)
    /// - `Err(std::io::Error)`: If file creation or permission setting fails
    pub fn ensure_secret_file() -> Result<PathBuf, std::io::Error> {
        let secret_path = Self::secret_file()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;

        // If file already exists, return the path
        if secret_path.exists() {
            return Ok(secret_path);
        }

        // Ensure parent directory exists
        if let Some(parent) = secret_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        use rhetor_core::config::{HuggingFaceSecret, SecretConfig};

        let template_config = SecretConfig {
            hugging_face: Some(HuggingFaceSecret {
                api_token: String::new(),
            }),
        };

        let template_json = serde_json::to_string_pretty(&template_config)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(&secret_path, template_json)?;

        // Set file permissions to 600 (user read/write only) on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&secret_path, permissions)?;
        }

        Ok(secret_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let config_dir = RhetorPaths::config_dir().unwrap();
        assert!(config_dir.ends_with("rhetor"));
    }

    #[test]
    fn test_config_file() {
        let config_file = RhetorPaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        let config_dir = RhetorPaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
    }

    #[test]
    fn test_secret_file() {
        let secret_file = RhetorPaths::secret_file().unwrap();
        assert!(secret_file.ends_with("secret.json"));
        let config_dir = RhetorPaths::config_dir().unwrap();
        assert!(secret_file.starts_with(&config_dir));
    }

    #[test]
    fn test_progress_file() {
        let progress_file = RhetorPaths::progress_file().unwrap();
        assert!(progress_file.ends_with("progress.json"));
    }

    #[test]
    fn test_archive_dir() {
        let archive_dir = RhetorPaths::archive_dir().unwrap();
        assert!(archive_dir.ends_with("archive"));
        let config_dir = RhetorPaths::config_dir().unwrap();
        assert!(archive_dir.starts_with(&config_dir));
    }
}
