//! Error types for the Rhetor application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reason a turn operation was rejected.
///
/// These are recoverable: the session is left untouched and the caller
/// can re-prompt the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidTurnReason {
    /// The current stage belongs to the opponent.
    #[error("it is not the user's turn to speak")]
    NotUserTurn,

    /// The submission was empty after trimming whitespace.
    #[error("submission is empty")]
    BlankSubmission,

    /// The stage timer has run out.
    #[error("no speaking time remains in this stage")]
    TimeExpired,

    /// The session has already reached its final stage.
    #[error("the session is complete")]
    SessionComplete,

    /// A submitted turn is still waiting for the opponent's reply.
    #[error("an opponent reply is still pending")]
    ReplyPending,

    /// A reply was offered but no user turn is awaiting one.
    #[error("no opponent reply is pending")]
    NoPendingReply,
}

/// A shared error type for the entire Rhetor application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum RhetorError {
    /// Malformed session configuration (e.g. a format with no stages).
    /// The only fatal condition, raised once at session creation.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A turn operation was rejected without mutating the session.
    #[error("Invalid turn: {0}")]
    InvalidTurn(InvalidTurnReason),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Data access error (repository/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RhetorError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates an InvalidTurn error
    pub fn invalid_turn(reason: InvalidTurnReason) -> Self {
        Self::InvalidTurn(reason)
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Check if this is an InvalidTurn error
    pub fn is_invalid_turn(&self) -> bool {
        matches!(self, Self::InvalidTurn(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Returns the rejection reason if this is an InvalidTurn error.
    pub fn invalid_turn_reason(&self) -> Option<InvalidTurnReason> {
        match self {
            Self::InvalidTurn(reason) => Some(*reason),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for RhetorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for RhetorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RhetorError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for RhetorError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (used at infrastructure edges)
impl From<anyhow::Error> for RhetorError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, RhetorError>`.
pub type Result<T> = std::result::Result<T, RhetorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_helpers() {
        let err = RhetorError::configuration("format has no stages");
        assert!(err.is_configuration());
        assert!(!err.is_invalid_turn());

        let err = RhetorError::not_found("session", "abc-123");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Entity not found: session 'abc-123'");
    }

    #[test]
    fn test_invalid_turn_reason_accessor() {
        let err = RhetorError::invalid_turn(InvalidTurnReason::BlankSubmission);
        assert!(err.is_invalid_turn());
        assert_eq!(
            err.invalid_turn_reason(),
            Some(InvalidTurnReason::BlankSubmission)
        );

        let err = RhetorError::internal("oops");
        assert_eq!(err.invalid_turn_reason(), None);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: RhetorError = io_err.into();
        assert!(err.is_io());
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: RhetorError = json_err.into();
        assert!(err.is_serialization());
        assert!(err.to_string().contains("JSON"));
    }
}
