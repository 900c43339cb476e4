//! Stage types and stage-list construction.
//!
//! A stage is a named, timed segment of a practice session with a fixed
//! speaking role. Stage lists are built from a format's stage-name template;
//! durations come from a name-based lookup rule and roles alternate by
//! position starting with the user.

use serde::{Deserialize, Serialize};

/// Seconds allocated to cross-examination stages.
pub const CROSS_EXAM_SECS: u32 = 180;
/// Seconds allocated to rebuttal stages.
pub const REBUTTAL_SECS: u32 = 240;
/// Seconds allocated to all other stages.
pub const DEFAULT_STAGE_SECS: u32 = 360;

/// Who speaks during a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeakerRole {
    /// The practicing user.
    User,
    /// The AI sparring partner.
    Opponent,
}

impl SpeakerRole {
    /// Whether this role is the user's.
    pub fn is_user(self) -> bool {
        matches!(self, Self::User)
    }

    /// The other role.
    pub fn opposite(self) -> Self {
        match self {
            Self::User => Self::Opponent,
            Self::Opponent => Self::User,
        }
    }
}

impl std::fmt::Display for SpeakerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Opponent => write!(f, "opponent"),
        }
    }
}

/// A named, timed segment of a practice session.
///
/// Immutable once the session's stage list is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Stage name from the format template (e.g. "Affirmative Rebuttal (4 min)").
    pub name: String,
    /// Speaking time allocated to this stage, in seconds. Always positive.
    pub allocated_secs: u32,
    /// Who speaks during this stage.
    pub speaker: SpeakerRole,
    /// Guidance text shown while this stage is active.
    pub prompt: String,
}

impl Stage {
    /// Builds a stage with the duration and prompt derived from its name.
    pub fn new(name: impl Into<String>, speaker: SpeakerRole) -> Self {
        let name = name.into();
        let allocated_secs = duration_for_stage(&name);
        let prompt = stage_prompt(&name, speaker);
        Self {
            name,
            allocated_secs,
            speaker,
            prompt,
        }
    }

    /// Builds a stage with an explicit duration, for formats that override
    /// the name-based rule.
    pub fn with_duration(name: impl Into<String>, allocated_secs: u32, speaker: SpeakerRole) -> Self {
        let name = name.into();
        let prompt = stage_prompt(&name, speaker);
        Self {
            name,
            allocated_secs,
            speaker,
            prompt,
        }
    }
}

/// Duration lookup rule: cross-examination stages are short, rebuttals
/// medium, everything else gets the long default.
pub fn duration_for_stage(name: &str) -> u32 {
    if name.contains("Cross") {
        CROSS_EXAM_SECS
    } else if name.contains("Rebuttal") {
        REBUTTAL_SECS
    } else {
        DEFAULT_STAGE_SECS
    }
}

/// Guidance text for a stage, keyed on the stage kind and speaker.
pub fn stage_prompt(name: &str, speaker: SpeakerRole) -> String {
    if speaker.is_user() {
        if name.contains("Constructive") {
            "Present your main arguments clearly and support them with evidence.".to_string()
        } else if name.contains("Rebuttal") {
            "Address your opponent's arguments and strengthen your position.".to_string()
        } else if name.contains("Cross") {
            "Ask strategic questions to expose weaknesses in your opponent's case.".to_string()
        } else {
            "Make your best argument for this stage.".to_string()
        }
    } else {
        "Your opponent will respond based on the debate context and format rules.".to_string()
    }
}

/// Builds a stage list from a format's stage-name template, assigning
/// speaker roles by position parity starting with the user.
///
/// Roles are a per-stage property; formats constructed through
/// [`crate::session::PracticeSession::with_stages`] may assign consecutive
/// stages to the same role.
pub fn build_stages(stage_names: &[String]) -> Vec<Stage> {
    stage_names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let speaker = if index % 2 == 0 {
                SpeakerRole::User
            } else {
                SpeakerRole::Opponent
            };
            Stage::new(name.clone(), speaker)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_rule() {
        assert_eq!(duration_for_stage("Negative Cross-Examination (3 min)"), 180);
        assert_eq!(duration_for_stage("Affirmative Rebuttal (4 min)"), 240);
        assert_eq!(duration_for_stage("Opening Statement - Pro (6 min)"), 360);
        assert_eq!(duration_for_stage("Grand Crossfire (3 min)"), 180);
    }

    #[test]
    fn test_roles_alternate_starting_with_user() {
        let names: Vec<String> = ["Opening", "Reply", "Closing"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let stages = build_stages(&names);

        assert_eq!(stages.len(), 3);
        assert_eq!(stages[0].speaker, SpeakerRole::User);
        assert_eq!(stages[1].speaker, SpeakerRole::Opponent);
        assert_eq!(stages[2].speaker, SpeakerRole::User);
    }

    #[test]
    fn test_stage_carries_prompt_for_role() {
        let user_stage = Stage::new("Affirmative Constructive (6 min)", SpeakerRole::User);
        assert!(user_stage.prompt.contains("main arguments"));

        let opponent_stage = Stage::new("Negative Constructive (7 min)", SpeakerRole::Opponent);
        assert!(opponent_stage.prompt.contains("opponent will respond"));
    }

    #[test]
    fn test_explicit_duration_override() {
        let stage = Stage::with_duration("Lightning Round", 60, SpeakerRole::User);
        assert_eq!(stage.allocated_secs, 60);
        assert_eq!(stage.prompt, "Make your best argument for this stage.");
    }

    #[test]
    fn test_speaker_role_helpers() {
        assert!(SpeakerRole::User.is_user());
        assert!(!SpeakerRole::Opponent.is_user());
        assert_eq!(SpeakerRole::User.opposite(), SpeakerRole::Opponent);
        assert_eq!(SpeakerRole::User.to_string(), "user");
        assert_eq!(SpeakerRole::Opponent.to_string(), "opponent");
    }
}
