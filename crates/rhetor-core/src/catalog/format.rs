//! Debate format presets.
//!
//! Each format names the ordered stages a session walks through. Stage
//! durations and speaker roles are derived when the session is created, not
//! stored here.

use serde::{Deserialize, Serialize};

/// Experience tier a format is pitched at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatTier {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for FormatTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Beginner => write!(f, "Beginner"),
            Self::Intermediate => write!(f, "Intermediate"),
            Self::Advanced => write!(f, "Advanced"),
        }
    }
}

/// A named debate format with its stage-name template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateFormat {
    /// Unique identifier (slug format).
    pub id: String,
    /// Display name of the format.
    pub name: String,
    /// Description of this format's purpose and style.
    pub description: String,
    /// Rough total running time, for display.
    pub duration_label: String,
    /// Ordered stage names that a session of this format walks through.
    pub structure: Vec<String>,
    /// Experience tier.
    pub tier: FormatTier,
    /// Who takes part (e.g. "1v1", "2v2").
    pub participants: String,
}

/// Returns the built-in debate format presets.
///
/// These cover the classic competitive formats:
/// - Lincoln-Douglas (one-on-one value debate)
/// - Public Forum (team debate on current events)
/// - Parliamentary (impromptu topics, quick preparation)
/// - Oxford Style (formal openings and rebuttals)
pub fn get_default_formats() -> Vec<DebateFormat> {
    vec![
        DebateFormat {
            id: "lincoln-douglas".to_string(),
            name: "Lincoln-Douglas".to_string(),
            description: "One-on-one value debate focusing on philosophical and ethical issues"
                .to_string(),
            duration_label: "45 minutes".to_string(),
            structure: vec![
                "Affirmative Constructive (6 min)".to_string(),
                "Negative Cross-Examination (3 min)".to_string(),
                "Negative Constructive (7 min)".to_string(),
                "Affirmative Cross-Examination (3 min)".to_string(),
                "Affirmative Rebuttal (4 min)".to_string(),
                "Negative Rebuttal (6 min)".to_string(),
                "Affirmative Rebuttal (3 min)".to_string(),
            ],
            tier: FormatTier::Advanced,
            participants: "1v1".to_string(),
        },
        DebateFormat {
            id: "public-forum".to_string(),
            name: "Public Forum".to_string(),
            description: "Team debate on current events and policy issues for general audiences"
                .to_string(),
            duration_label: "30 minutes".to_string(),
            structure: vec![
                "Team A Constructive (4 min)".to_string(),
                "Team B Constructive (4 min)".to_string(),
                "Crossfire (3 min)".to_string(),
                "Team A Rebuttal (4 min)".to_string(),
                "Team B Rebuttal (4 min)".to_string(),
                "Crossfire (3 min)".to_string(),
                "Team A Summary (3 min)".to_string(),
                "Team B Summary (3 min)".to_string(),
                "Grand Crossfire (3 min)".to_string(),
                "Team A Final Focus (2 min)".to_string(),
                "Team B Final Focus (2 min)".to_string(),
            ],
            tier: FormatTier::Intermediate,
            participants: "2v2".to_string(),
        },
        DebateFormat {
            id: "parliamentary".to_string(),
            name: "Parliamentary".to_string(),
            description: "Quick preparation debate with impromptu topics and flexible structure"
                .to_string(),
            duration_label: "35 minutes".to_string(),
            structure: vec![
                "Prime Minister Constructive (7 min)".to_string(),
                "Leader of Opposition Constructive (8 min)".to_string(),
                "Member of Government (8 min)".to_string(),
                "Member of Opposition (8 min)".to_string(),
                "Leader of Opposition Rebuttal (4 min)".to_string(),
                "Prime Minister Rebuttal (5 min)".to_string(),
            ],
            tier: FormatTier::Advanced,
            participants: "2v2".to_string(),
        },
        DebateFormat {
            id: "oxford".to_string(),
            name: "Oxford Style".to_string(),
            description: "Traditional formal debate with opening statements and rebuttals"
                .to_string(),
            duration_label: "60 minutes".to_string(),
            structure: vec![
                "Opening Statement - Pro (6 min)".to_string(),
                "Opening Statement - Con (6 min)".to_string(),
                "First Rebuttal - Pro (4 min)".to_string(),
                "First Rebuttal - Con (4 min)".to_string(),
                "Second Rebuttal - Pro (4 min)".to_string(),
                "Second Rebuttal - Con (4 min)".to_string(),
                "Closing Statement - Con (5 min)".to_string(),
                "Closing Statement - Pro (5 min)".to_string(),
            ],
            tier: FormatTier::Beginner,
            participants: "1v1 or Teams".to_string(),
        },
    ]
}

/// Looks up a format preset by its ID.
pub fn find_format(id: &str) -> Option<DebateFormat> {
    get_default_formats()
        .into_iter()
        .find(|format| format.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_formats_count() {
        let formats = get_default_formats();
        assert_eq!(formats.len(), 4, "Expected 4 built-in formats");
    }

    #[test]
    fn test_default_formats_have_unique_ids() {
        let formats = get_default_formats();
        let mut ids = std::collections::HashSet::new();
        for format in formats {
            assert!(
                ids.insert(format.id.clone()),
                "Format IDs must be unique, found duplicate: {}",
                format.id
            );
        }
    }

    #[test]
    fn test_every_format_names_at_least_one_stage() {
        for format in get_default_formats() {
            assert!(
                !format.structure.is_empty(),
                "Format '{}' has an empty stage template",
                format.id
            );
        }
    }

    #[test]
    fn test_lincoln_douglas_configuration() {
        let ld = find_format("lincoln-douglas").expect("Lincoln-Douglas preset should exist");

        assert_eq!(ld.name, "Lincoln-Douglas");
        assert_eq!(ld.structure.len(), 7);
        assert_eq!(ld.tier, FormatTier::Advanced);
        assert_eq!(ld.structure[0], "Affirmative Constructive (6 min)");
        assert_eq!(ld.structure[6], "Affirmative Rebuttal (3 min)");
    }

    #[test]
    fn test_public_forum_configuration() {
        let pf = find_format("public-forum").expect("Public Forum preset should exist");

        assert_eq!(pf.structure.len(), 11);
        assert_eq!(pf.tier, FormatTier::Intermediate);
        assert_eq!(pf.participants, "2v2");
    }

    #[test]
    fn test_oxford_is_the_beginner_format() {
        let oxford = find_format("oxford").expect("Oxford preset should exist");
        assert_eq!(oxford.tier, FormatTier::Beginner);
        assert_eq!(oxford.structure.len(), 8);
    }

    #[test]
    fn test_find_format_unknown_id() {
        assert!(find_format("karl-popper").is_none());
    }
}
