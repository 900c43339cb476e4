//! Sparring partner and coach personas.
//!
//! Each debater persona shapes both the inference prompt and the canned
//! fallback voice used when the endpoint is unavailable.

use rhetor_core::selector::SelectionStrategy;

/// A debater persona with a distinct argumentative voice.
#[derive(Debug)]
pub struct DebaterPersona {
    pub name: &'static str,
    /// Short style label shown when the session starts.
    pub style: &'static str,
    /// Voice directive embedded in the inference prompt.
    pub voice: &'static str,
    /// Signature openers used by canned fallback replies.
    pub openers: &'static [&'static str],
}

pub static ALEX_PERSONA: DebaterPersona = DebaterPersona {
    name: "Alex",
    style: "passionate and data-driven",
    voice: "You argue with urgency and back every claim with studies, statistics, and hard evidence.",
    openers: &[
        "Hold up! The data completely contradicts that claim.",
        "Let's look at the numbers, because they tell a very different story.",
        "I have to stop you right there. The evidence points the other way.",
    ],
};

pub static SAM_PERSONA: DebaterPersona = DebaterPersona {
    name: "Sam",
    style: "analytical and methodical",
    voice: "You dismantle arguments step by step, calmly exposing each logical gap.",
    openers: &[
        "Let me break down why that logic doesn't hold.",
        "There are at least two problems with that reasoning.",
        "Walk through that argument with me, step by step.",
    ],
};

pub static JORDAN_PERSONA: DebaterPersona = DebaterPersona {
    name: "Jordan",
    style: "witty, argues through analogies",
    voice: "You disarm opponents with humor and land your points through vivid, unexpected analogies.",
    openers: &[
        "That's like saying umbrellas cause rain!",
        "By that logic we should ban ovens because toast sometimes burns.",
        "That argument is a rowboat in a hurricane.",
    ],
};

/// All debater personas, in selection order.
pub static DEBATER_PERSONAS: [&DebaterPersona; 3] =
    [&ALEX_PERSONA, &SAM_PERSONA, &JORDAN_PERSONA];

/// The coaching persona that delivers tips between turns.
#[derive(Debug)]
pub struct CoachPersona {
    pub name: &'static str,
    pub style: &'static str,
}

pub static COACH_MAYA: CoachPersona = CoachPersona {
    name: "Maya",
    style: "supportive and direct",
};

/// Picks the persona for a new session.
pub fn pick_persona(selector: &dyn SelectionStrategy) -> &'static DebaterPersona {
    DEBATER_PERSONAS[selector.pick_index(DEBATER_PERSONAS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhetor_core::selector::SeededSelector;

    #[test]
    fn test_three_personas_with_unique_names() {
        let mut names: Vec<&str> = DEBATER_PERSONAS.iter().map(|p| p.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn test_every_persona_has_openers() {
        for persona in DEBATER_PERSONAS {
            assert!(
                !persona.openers.is_empty(),
                "persona {} has no openers",
                persona.name
            );
            assert!(!persona.voice.is_empty());
        }
    }

    #[test]
    fn test_pick_persona_is_deterministic_with_seed() {
        let selector = SeededSelector::from_seed(7);
        let first = pick_persona(&selector);

        let selector = SeededSelector::from_seed(7);
        let second = pick_persona(&selector);

        assert_eq!(first.name, second.name);
    }

    #[test]
    fn test_coach_is_maya() {
        assert_eq!(COACH_MAYA.name, "Maya");
    }
}
