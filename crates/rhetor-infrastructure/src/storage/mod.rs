//! Storage layer for configuration and secret files.

mod secret_storage;
mod settings_storage;

pub use secret_storage::{SecretStorage, SecretStorageError};
pub use settings_storage::{SettingsStorage, SettingsStorageError};
