//! Deterministic offline sparring agent.

use async_trait::async_trait;
use rhetor_core::selector::{SeededSelector, SelectionStrategy};
use std::sync::Arc;

use crate::agent::{ReplyRequest, SparringAgent};
use crate::error::InferenceError;
use crate::fallback;

/// Sparring agent that answers from the canned banks without touching the
/// network. Used by `--offline` runs and by tests that need predictable
/// replies.
pub struct ScriptedAgent {
    selector: Arc<dyn SelectionStrategy>,
}

impl ScriptedAgent {
    pub fn new(selector: Arc<dyn SelectionStrategy>) -> Self {
        Self { selector }
    }

    /// Seeded constructor for reproducible transcripts.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(Arc::new(SeededSelector::from_seed(seed)))
    }
}

impl Default for ScriptedAgent {
    fn default() -> Self {
        Self::new(Arc::new(SeededSelector::from_entropy()))
    }
}

#[async_trait]
impl SparringAgent for ScriptedAgent {
    fn describe(&self) -> &str {
        "scripted offline sparring partner"
    }

    async fn counter_argument(&self, request: &ReplyRequest) -> Result<String, InferenceError> {
        Ok(fallback::fallback_reply(
            self.selector.as_ref(),
            request.side,
            request.persona,
        ))
    }

    async fn identification_feedback(
        &self,
        user_answer: &str,
        correct_answer: &str,
    ) -> Result<String, InferenceError> {
        Ok(fallback::mock_identification_feedback(
            user_answer,
            correct_answer,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::personas::JORDAN_PERSONA;
    use rhetor_core::catalog::Side;

    #[tokio::test]
    async fn test_counter_argument_is_voiced_and_never_fails() {
        let agent = ScriptedAgent::from_seed(42);
        let request = ReplyRequest::new(
            "Should companies allow permanent remote work?",
            "Remote work boosts productivity.",
            Side::Against,
            &JORDAN_PERSONA,
        );

        let reply = agent.counter_argument(&request).await.unwrap();
        assert!(!reply.is_empty());

        let opened = JORDAN_PERSONA
            .openers
            .iter()
            .any(|opener| reply.starts_with(opener));
        assert!(opened, "reply did not use a Jordan opener: {reply}");
    }

    #[tokio::test]
    async fn test_same_seed_gives_same_transcript() {
        let request = ReplyRequest::new(
            "Should AI be regulated?",
            "Yes, for safety.",
            Side::Against,
            &JORDAN_PERSONA,
        );

        let first = ScriptedAgent::from_seed(7)
            .counter_argument(&request)
            .await
            .unwrap();
        let second = ScriptedAgent::from_seed(7)
            .counter_argument(&request)
            .await
            .unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_identification_feedback_grades_locally() {
        let agent = ScriptedAgent::from_seed(1);

        let praise = agent
            .identification_feedback("Red Herring", "red herring")
            .await
            .unwrap();
        assert!(praise.starts_with("Excellent identification!"));

        let correction = agent
            .identification_feedback("Straw Man", "Red Herring")
            .await
            .unwrap();
        assert!(correction.contains("Red Herring"));
    }
}
