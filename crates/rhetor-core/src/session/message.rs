//! Transcript message types.

use super::stage::SpeakerRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single entry in a session transcript.
///
/// Records are append-only; they are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechRecord {
    /// Unique message identifier (UUID format).
    pub id: String,
    /// Who produced this message.
    pub speaker: SpeakerRole,
    /// The argument text.
    pub content: String,
    /// Speaking time consumed to produce it, in seconds. Only recorded for
    /// user submissions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_secs: Option<u32>,
    /// Timestamp when the message was created (ISO 8601 format).
    pub created_at: String,
    /// Name of the stage this message was spoken in, denormalized for display.
    pub stage_name: String,
}

impl SpeechRecord {
    /// Creates a user submission record with its consumed speaking time.
    pub fn user(content: impl Into<String>, elapsed_secs: u32, stage_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            speaker: SpeakerRole::User,
            content: content.into(),
            elapsed_secs: Some(elapsed_secs),
            created_at: chrono::Utc::now().to_rfc3339(),
            stage_name: stage_name.into(),
        }
    }

    /// Creates an opponent reply record.
    pub fn opponent(content: impl Into<String>, stage_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            speaker: SpeakerRole::Opponent,
            content: content.into(),
            elapsed_secs: None,
            created_at: chrono::Utc::now().to_rfc3339(),
            stage_name: stage_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_record_carries_elapsed_time() {
        let record = SpeechRecord::user("my argument", 42, "Opening");
        assert_eq!(record.speaker, SpeakerRole::User);
        assert_eq!(record.elapsed_secs, Some(42));
        assert_eq!(record.stage_name, "Opening");
        assert!(!record.id.is_empty());
    }

    #[test]
    fn test_opponent_record_has_no_elapsed_time() {
        let record = SpeechRecord::opponent("counterpoint", "Opening");
        assert_eq!(record.speaker, SpeakerRole::Opponent);
        assert_eq!(record.elapsed_secs, None);
    }

    #[test]
    fn test_records_get_unique_ids() {
        let a = SpeechRecord::user("one", 1, "Opening");
        let b = SpeechRecord::user("two", 2, "Opening");
        assert_ne!(a.id, b.id);
    }
}
