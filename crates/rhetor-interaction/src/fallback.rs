//! Canned replies, coaching tips, and fallacy injection.
//!
//! The practice flow must never stall on a failed inference call, so every
//! generated artifact has a canned counterpart here. Selection goes through
//! [`SelectionStrategy`] so offline runs can be seeded.

use rhetor_core::catalog::Side;
use rhetor_core::selector::{SelectionStrategy, pick_from};

use crate::personas::DebaterPersona;

/// Probability that a sparring reply carries a deliberately flawed argument.
pub const DEFAULT_FALLACY_RATE: f64 = 0.3;

/// Fallacy kinds the sparring partner may deliberately commit.
pub const INJECTABLE_FALLACIES: [&str; 6] = [
    "Ad Hominem",
    "Straw Man",
    "False Dilemma",
    "Slippery Slope",
    "Appeal to Authority",
    "Red Herring",
];

const FOR_REPLIES: [&str; 4] = [
    "That's interesting, but consider the broader economic implications of this approach.",
    "While I see your point, the evidence suggests a different conclusion entirely.",
    "Your argument overlooks key factors that significantly impact the outcome.",
    "That perspective ignores the fundamental principles underlying this issue completely.",
];

const AGAINST_REPLIES: [&str; 4] = [
    "Actually, recent studies support the opposite view with compelling evidence.",
    "Your reasoning contains flaws that undermine the entire argument's validity.",
    "The benefits clearly outweigh any potential drawbacks you've mentioned here.",
    "Historical precedent shows that approach leads to unintended negative consequences.",
];

/// Coach Maya's feedback bank.
pub const COACHING_TIPS: [&str; 8] = [
    "Great start! Try adding some data.",
    "Nice point! Counter their objections next.",
    "Good logic! Connect it to real impact.",
    "Strong! Avoid absolutes like 'always' though.",
    "Love the passion! What's the evidence?",
    "Excellent! Quote an expert to strengthen this.",
    "You're onto something! Add a real example.",
    "Great passion! Show them the proof.",
];

/// Canned counter-arguments for the side the reply argues.
pub fn canned_counter_arguments(side: Side) -> &'static [&'static str] {
    match side {
        Side::For => &FOR_REPLIES,
        Side::Against => &AGAINST_REPLIES,
    }
}

/// Builds a persona-voiced canned reply arguing `side`.
pub fn fallback_reply(
    selector: &dyn SelectionStrategy,
    side: Side,
    persona: &DebaterPersona,
) -> String {
    let opener = pick_from(selector, persona.openers).copied().unwrap_or("");
    let body = pick_from(selector, canned_counter_arguments(side))
        .copied()
        .unwrap_or("I disagree with your point.");

    if opener.is_empty() {
        body.to_string()
    } else {
        format!("{opener} {body}")
    }
}

/// Picks a coaching tip for the turn that was just submitted.
pub fn coaching_tip(selector: &dyn SelectionStrategy) -> &'static str {
    pick_from(selector, &COACHING_TIPS)
        .copied()
        .unwrap_or(COACHING_TIPS[0])
}

/// Coach mood for the given zero-based stage index.
///
/// Early stages get encouragement, the middle gets analysis, the endgame
/// gets warmth.
pub fn coach_mood(stage_index: usize) -> &'static str {
    match stage_index {
        0 | 1 => "encouraging",
        2 | 3 => "analytical",
        _ => "warm",
    }
}

/// Rolls for a deliberately flawed argument; returns the fallacy kind the
/// reply is meant to exhibit.
pub fn maybe_inject_fallacy(
    selector: &dyn SelectionStrategy,
    rate: f64,
) -> Option<&'static str> {
    if selector.chance(rate) {
        pick_from(selector, &INJECTABLE_FALLACIES).copied()
    } else {
        None
    }
}

/// Grades a fallacy-identification answer without calling the endpoint.
pub fn mock_identification_feedback(user_answer: &str, correct_answer: &str) -> String {
    if user_answer.trim().eq_ignore_ascii_case(correct_answer.trim()) {
        "Excellent identification! Your reasoning shows strong critical thinking skills.".to_string()
    } else {
        format!("Good attempt! The correct answer was {correct_answer}. Review the argument structure.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::personas::{ALEX_PERSONA, JORDAN_PERSONA};
    use rhetor_core::selector::SeededSelector;

    #[test]
    fn test_each_side_has_four_canned_replies() {
        assert_eq!(canned_counter_arguments(Side::For).len(), 4);
        assert_eq!(canned_counter_arguments(Side::Against).len(), 4);
    }

    #[test]
    fn test_fallback_reply_opens_with_persona_signature() {
        let selector = SeededSelector::from_seed(3);
        let reply = fallback_reply(&selector, Side::Against, &ALEX_PERSONA);

        let opened = ALEX_PERSONA
            .openers
            .iter()
            .any(|opener| reply.starts_with(opener));
        assert!(opened, "reply did not start with an Alex opener: {reply}");

        let body = AGAINST_REPLIES
            .iter()
            .any(|canned| reply.ends_with(canned));
        assert!(body, "reply did not end with a canned counter: {reply}");
    }

    #[test]
    fn test_fallback_reply_is_deterministic_with_seed() {
        let a = fallback_reply(&SeededSelector::from_seed(11), Side::For, &JORDAN_PERSONA);
        let b = fallback_reply(&SeededSelector::from_seed(11), Side::For, &JORDAN_PERSONA);
        assert_eq!(a, b);
    }

    #[test]
    fn test_coaching_tip_comes_from_bank() {
        let selector = SeededSelector::from_seed(5);
        for _ in 0..20 {
            let tip = coaching_tip(&selector);
            assert!(COACHING_TIPS.contains(&tip));
        }
    }

    #[test]
    fn test_coach_mood_progression() {
        assert_eq!(coach_mood(0), "encouraging");
        assert_eq!(coach_mood(1), "encouraging");
        assert_eq!(coach_mood(2), "analytical");
        assert_eq!(coach_mood(3), "analytical");
        assert_eq!(coach_mood(4), "warm");
        assert_eq!(coach_mood(10), "warm");
    }

    #[test]
    fn test_fallacy_injection_rate_extremes() {
        let selector = SeededSelector::from_seed(9);

        for _ in 0..20 {
            assert!(maybe_inject_fallacy(&selector, 0.0).is_none());
        }
        for _ in 0..20 {
            let injected = maybe_inject_fallacy(&selector, 1.0);
            assert!(INJECTABLE_FALLACIES.contains(&injected.unwrap()));
        }
    }

    #[test]
    fn test_mock_feedback_matches_case_insensitively() {
        let praise = mock_identification_feedback("straw man", "Straw Man");
        assert!(praise.starts_with("Excellent identification!"));

        let correction = mock_identification_feedback("Ad Hominem", "Straw Man");
        assert!(correction.contains("Straw Man"));
        assert!(correction.starts_with("Good attempt!"));
    }
}
