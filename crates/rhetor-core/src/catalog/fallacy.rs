//! Logical fallacy example catalog and selection.

use crate::selector::{SelectionStrategy, pick_from};
use serde::{Deserialize, Serialize};

/// Byte span of the fallacious passage within the argument text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallacySpan {
    pub start: usize,
    pub end: usize,
}

/// A practice argument that may contain a logical fallacy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallacyExample {
    /// Unique identifier (slug format).
    pub id: String,
    /// Fallacy kind (e.g. "Ad Hominem"), or "No Fallacy" for valid arguments.
    pub kind: String,
    /// The argument text to analyze.
    pub argument: String,
    /// Why the argument is (or is not) fallacious.
    pub explanation: String,
    /// Difficulty level, 1-5.
    pub difficulty: u8,
    /// Whether the argument actually contains a fallacy.
    pub has_fallacy: bool,
    /// Location of the fallacious passage, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<FallacySpan>,
}

/// Returns the built-in fallacy example catalog.
pub fn get_default_fallacies() -> Vec<FallacyExample> {
    vec![
        // Difficulty Level 1 (Beginner)
        FallacyExample {
            id: "ad-hominem-1".to_string(),
            kind: "Ad Hominem".to_string(),
            argument: "We shouldn't listen to John's argument about climate change because he's just a college dropout.".to_string(),
            explanation: "This attacks John's character rather than addressing his actual argument about climate change.".to_string(),
            difficulty: 1,
            has_fallacy: true,
            span: Some(FallacySpan { start: 40, end: 85 }),
        },
        FallacyExample {
            id: "strawman-1".to_string(),
            kind: "Straw Man".to_string(),
            argument: "People who support renewable energy want to destroy all industry and send us back to the Stone Age.".to_string(),
            explanation: "This misrepresents the renewable energy position, which doesn't advocate for destroying all industry.".to_string(),
            difficulty: 1,
            has_fallacy: true,
            span: Some(FallacySpan { start: 40, end: 95 }),
        },
        FallacyExample {
            id: "false-dilemma-1".to_string(),
            kind: "False Dilemma".to_string(),
            argument: "You're either with us completely or you're against us. There's no middle ground in this war.".to_string(),
            explanation: "This presents only two options when there are likely more nuanced positions available.".to_string(),
            difficulty: 1,
            has_fallacy: true,
            span: Some(FallacySpan { start: 0, end: 50 }),
        },
        // Difficulty Level 2 (Novice)
        FallacyExample {
            id: "appeal-authority-2".to_string(),
            kind: "Appeal to Authority".to_string(),
            argument: "This investment strategy must be good because my wealthy neighbor recommended it to me.".to_string(),
            explanation: "Being wealthy doesn't necessarily make someone an expert on investment strategies.".to_string(),
            difficulty: 2,
            has_fallacy: true,
            span: Some(FallacySpan { start: 55, end: 90 }),
        },
        FallacyExample {
            id: "slippery-slope-2".to_string(),
            kind: "Slippery Slope".to_string(),
            argument: "If we allow students to retake one exam, soon they'll expect to retake all exams, and eventually, grades will become meaningless.".to_string(),
            explanation: "This assumes a chain of events without justification for why one change leads to extreme consequences.".to_string(),
            difficulty: 2,
            has_fallacy: true,
            span: Some(FallacySpan { start: 45, end: 130 }),
        },
        // Difficulty Level 3 (Intermediate)
        FallacyExample {
            id: "red-herring-3".to_string(),
            kind: "Red Herring".to_string(),
            argument: "While we're discussing the budget deficit, we should remember that our veterans have sacrificed so much for our freedom.".to_string(),
            explanation: "This shifts the discussion away from the budget deficit to an unrelated topic about veterans.".to_string(),
            difficulty: 3,
            has_fallacy: true,
            span: Some(FallacySpan { start: 50, end: 120 }),
        },
        FallacyExample {
            id: "bandwagon-3".to_string(),
            kind: "Bandwagon".to_string(),
            argument: "Everyone's switching to this new social media platform, so it must be better than the alternatives.".to_string(),
            explanation: "Popularity doesn't necessarily indicate quality or superiority.".to_string(),
            difficulty: 3,
            has_fallacy: true,
            span: Some(FallacySpan { start: 0, end: 85 }),
        },
        // Difficulty Level 4 (Advanced)
        FallacyExample {
            id: "equivocation-4".to_string(),
            kind: "Equivocation".to_string(),
            argument: "The sign said 'fine for parking here,' so I thought it was a good place to park and got a ticket.".to_string(),
            explanation: "This uses 'fine' in two different meanings - 'good' and 'monetary penalty'.".to_string(),
            difficulty: 4,
            has_fallacy: true,
            span: Some(FallacySpan { start: 15, end: 45 }),
        },
        FallacyExample {
            id: "circular-reasoning-4".to_string(),
            kind: "Circular Reasoning".to_string(),
            argument: "We know the Bible is true because it says so in the Bible, and the Bible never lies.".to_string(),
            explanation: "This uses the Bible's content to prove the Bible's truthfulness, which is circular logic.".to_string(),
            difficulty: 4,
            has_fallacy: true,
            span: Some(FallacySpan { start: 25, end: 80 }),
        },
        // Difficulty Level 5 (Expert)
        FallacyExample {
            id: "composition-5".to_string(),
            kind: "Fallacy of Composition".to_string(),
            argument: "Each player on the team is excellent, so the team must be excellent at working together.".to_string(),
            explanation: "Individual excellence doesn't guarantee collective excellence or teamwork.".to_string(),
            difficulty: 5,
            has_fallacy: true,
            span: Some(FallacySpan { start: 40, end: 95 }),
        },
        FallacyExample {
            id: "no-fallacy-valid".to_string(),
            kind: "No Fallacy".to_string(),
            argument: "Studies show that regular exercise improves cardiovascular health, reduces stress, and increases longevity in most adults.".to_string(),
            explanation: "This is a valid argument based on empirical evidence without logical fallacies.".to_string(),
            difficulty: 3,
            has_fallacy: false,
            span: None,
        },
    ]
}

/// Examples at exactly the given difficulty level.
pub fn fallacies_by_difficulty(difficulty: u8) -> Vec<FallacyExample> {
    get_default_fallacies()
        .into_iter()
        .filter(|example| example.difficulty == difficulty)
        .collect()
}

/// A random example at or below the difficulty cap.
pub fn random_fallacy(selector: &dyn SelectionStrategy, max_difficulty: u8) -> Option<FallacyExample> {
    let suitable: Vec<FallacyExample> = get_default_fallacies()
        .into_iter()
        .filter(|example| example.difficulty <= max_difficulty)
        .collect();
    pick_from(selector, &suitable).cloned()
}

/// An example matched to the user's skill band, biased toward their weak
/// fallacy kinds when any are known.
///
/// The target difficulty is `skill_band` minus one or plus zero (a random
/// step of -1 or 0), clamped to `[1, 5]`.
pub fn personalized_fallacy(
    selector: &dyn SelectionStrategy,
    skill_band: u8,
    weak_areas: &[String],
) -> Option<FallacyExample> {
    let step = selector.pick_index(2) as i32 - 1;
    let target = (i32::from(skill_band) + step).clamp(1, 5) as u8;

    let mut candidates = fallacies_by_difficulty(target);
    if candidates.is_empty() {
        return random_fallacy(selector, target);
    }

    if !weak_areas.is_empty() {
        let weak_candidates: Vec<FallacyExample> = candidates
            .iter()
            .filter(|example| weak_areas.contains(&example.kind))
            .cloned()
            .collect();
        if !weak_candidates.is_empty() {
            candidates = weak_candidates;
        }
    }

    pick_from(selector, &candidates).cloned()
}
