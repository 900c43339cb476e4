//! Debate topic catalog and selection.
//!
//! Topics span difficulty levels 1 (clear-cut) through 5 (expert). Random
//! selection goes through the seedable [`SelectionStrategy`] so callers can
//! force determinism.

use crate::selector::{SelectionStrategy, pick_from};
use serde::{Deserialize, Serialize};

/// Which side of a topic is being argued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    For,
    Against,
}

impl Side {
    /// The opposing side.
    pub fn opposite(self) -> Self {
        match self {
            Self::For => Self::Against,
            Self::Against => Self::For,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::For => write!(f, "for"),
            Self::Against => write!(f, "against"),
        }
    }
}

/// A debate topic with its two canonical positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateTopic {
    /// Unique identifier (slug format).
    pub id: String,
    /// Short display title.
    pub title: String,
    /// The resolution as a question.
    pub description: String,
    /// Difficulty level, 1-5.
    pub difficulty: u8,
    /// The affirmative position statement.
    pub for_position: String,
    /// The negative position statement.
    pub against_position: String,
    /// Topic category (e.g. "technology", "ethics").
    pub category: String,
}

impl DebateTopic {
    /// The position statement for a given side.
    pub fn position_for(&self, side: Side) -> &str {
        match side {
            Side::For => &self.for_position,
            Side::Against => &self.against_position,
        }
    }
}

/// Returns the built-in topic catalog.
pub fn get_default_topics() -> Vec<DebateTopic> {
    vec![
        // Difficulty Level 1 (Simple, clear-cut topics)
        DebateTopic {
            id: "social-media-1".to_string(),
            title: "Social Media and Privacy".to_string(),
            description: "Should social media companies be required to protect user privacy more strictly?".to_string(),
            difficulty: 1,
            for_position: "Companies should implement stricter privacy protections".to_string(),
            against_position: "Current privacy measures are sufficient for user protection".to_string(),
            category: "technology".to_string(),
        },
        DebateTopic {
            id: "remote-work-1".to_string(),
            title: "Remote Work Policies".to_string(),
            description: "Should companies allow employees to work from home permanently?".to_string(),
            difficulty: 1,
            for_position: "Permanent remote work should be standard option".to_string(),
            against_position: "In-office work is essential for productivity and collaboration".to_string(),
            category: "society".to_string(),
        },
        // Difficulty Level 2 (Moderate complexity)
        DebateTopic {
            id: "ai-education-2".to_string(),
            title: "AI in Education".to_string(),
            description: "Should artificial intelligence tools be integrated into classroom learning?".to_string(),
            difficulty: 2,
            for_position: "AI tools enhance learning and prepare students for the future".to_string(),
            against_position: "AI tools reduce critical thinking and create dependency".to_string(),
            category: "technology".to_string(),
        },
        DebateTopic {
            id: "universal-income-2".to_string(),
            title: "Universal Basic Income".to_string(),
            description: "Should governments implement a universal basic income program?".to_string(),
            difficulty: 2,
            for_position: "UBI reduces poverty and provides economic security".to_string(),
            against_position: "UBI creates dependency and is economically unsustainable".to_string(),
            category: "policy".to_string(),
        },
        // Difficulty Level 3 (Complex topics)
        DebateTopic {
            id: "gene-editing-3".to_string(),
            title: "Genetic Engineering Ethics".to_string(),
            description: "Should genetic editing be allowed for human enhancement beyond medical treatment?".to_string(),
            difficulty: 3,
            for_position: "Genetic enhancement can improve human capabilities and quality of life".to_string(),
            against_position: "Genetic enhancement raises ethical concerns and increases inequality".to_string(),
            category: "ethics".to_string(),
        },
        DebateTopic {
            id: "space-exploration-3".to_string(),
            title: "Space Exploration Funding".to_string(),
            description: "Should governments prioritize space exploration over addressing earthly problems?".to_string(),
            difficulty: 3,
            for_position: "Space exploration drives innovation and ensures human survival".to_string(),
            against_position: "Resources should focus on immediate terrestrial challenges".to_string(),
            category: "science".to_string(),
        },
        // Difficulty Level 4 (Very complex)
        DebateTopic {
            id: "consciousness-ai-4".to_string(),
            title: "AI Consciousness and Rights".to_string(),
            description: "If AI systems develop consciousness, should they be granted legal rights?".to_string(),
            difficulty: 4,
            for_position: "Conscious AI deserves protection and rights like any sentient being".to_string(),
            against_position: "AI consciousness is uncertain and rights would create legal complications".to_string(),
            category: "ethics".to_string(),
        },
        DebateTopic {
            id: "democracy-tech-4".to_string(),
            title: "Democracy in the Digital Age".to_string(),
            description: "Should democratic participation be enhanced through digital technology and algorithms?".to_string(),
            difficulty: 4,
            for_position: "Technology can make democracy more inclusive and informed".to_string(),
            against_position: "Digital democracy threatens traditional democratic values and privacy".to_string(),
            category: "politics".to_string(),
        },
        // Difficulty Level 5 (Expert level)
        DebateTopic {
            id: "posthuman-ethics-5".to_string(),
            title: "Posthuman Transformation".to_string(),
            description: "Should humanity actively pursue technological enhancement to become posthuman?".to_string(),
            difficulty: 5,
            for_position: "Posthuman enhancement is the natural next step in human evolution".to_string(),
            against_position: "Posthuman transformation threatens human identity and natural values".to_string(),
            category: "philosophy".to_string(),
        },
    ]
}

/// Topics at exactly the given difficulty level.
pub fn topics_by_difficulty(difficulty: u8) -> Vec<DebateTopic> {
    get_default_topics()
        .into_iter()
        .filter(|topic| topic.difficulty == difficulty)
        .collect()
}

/// Topics in the given category (case-insensitive).
pub fn topics_in_category(category: &str) -> Vec<DebateTopic> {
    get_default_topics()
        .into_iter()
        .filter(|topic| topic.category.eq_ignore_ascii_case(category))
        .collect()
}

/// A random topic at or below the difficulty cap.
pub fn random_topic(selector: &dyn SelectionStrategy, max_difficulty: u8) -> Option<DebateTopic> {
    let suitable: Vec<DebateTopic> = get_default_topics()
        .into_iter()
        .filter(|topic| topic.difficulty <= max_difficulty)
        .collect();
    pick_from(selector, &suitable).cloned()
}

/// A topic targeted slightly at or above the user's skill band for an
/// appropriate challenge.
///
/// The target difficulty is `skill_band` plus a random stretch of 0 or 1,
/// clamped to `[1, 5]`. Falls back to any topic at or below the target when
/// no topic sits exactly on it.
pub fn personalized_topic(selector: &dyn SelectionStrategy, skill_band: u8) -> Option<DebateTopic> {
    let stretch = selector.pick_index(2) as i32;
    let target = (i32::from(skill_band) + stretch).clamp(1, 5) as u8;

    let candidates = topics_by_difficulty(target);
    if candidates.is_empty() {
        return random_topic(selector, target);
    }
    pick_from(selector, &candidates).cloned()
}
