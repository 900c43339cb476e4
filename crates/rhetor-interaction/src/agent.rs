//! Sparring agent abstraction.
//!
//! A [`SparringAgent`] produces the opposing side of a practice debate. The
//! hosted-inference implementation lives in [`crate::hf_agent`]; a
//! deterministic offline implementation lives in [`crate::scripted`].

use async_trait::async_trait;
use rhetor_core::catalog::Side;

use crate::error::InferenceError;
use crate::personas::DebaterPersona;

/// Everything an agent needs to argue one opposing turn.
#[derive(Debug, Clone)]
pub struct ReplyRequest {
    /// The motion under debate.
    pub topic: String,
    /// The user's most recent argument.
    pub prior_argument: String,
    /// The side the agent argues. Always the opposite of the user's side.
    pub side: Side,
    /// The persona voicing the reply.
    pub persona: &'static DebaterPersona,
}

impl ReplyRequest {
    pub fn new(
        topic: impl Into<String>,
        prior_argument: impl Into<String>,
        side: Side,
        persona: &'static DebaterPersona,
    ) -> Self {
        Self {
            topic: topic.into(),
            prior_argument: prior_argument.into(),
            side,
            persona,
        }
    }
}

/// Produces opposing arguments and grading feedback for practice flows.
#[async_trait]
pub trait SparringAgent: Send + Sync {
    /// Short human-readable description for logs and the `check` command.
    fn describe(&self) -> &str;

    /// Produces a counter-argument against `request.prior_argument`, voiced
    /// by `request.persona` and arguing `request.side`.
    async fn counter_argument(&self, request: &ReplyRequest) -> Result<String, InferenceError>;

    /// Grades a fallacy-identification answer in one or two short sentences.
    async fn identification_feedback(
        &self,
        user_answer: &str,
        correct_answer: &str,
    ) -> Result<String, InferenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::personas::ALEX_PERSONA;

    #[test]
    fn test_reply_request_new() {
        let request = ReplyRequest::new(
            "Should AI be regulated by governments?",
            "Regulation prevents misuse.",
            Side::Against,
            &ALEX_PERSONA,
        );

        assert_eq!(request.topic, "Should AI be regulated by governments?");
        assert_eq!(request.side, Side::Against);
        assert_eq!(request.persona.name, "Alex");
    }
}
