//! Fallacy-identification drill use case.
//!
//! Picks catalog arguments for the user to analyze, grades their answers,
//! and folds every attempt into the stored progress record.

use std::sync::Arc;
use std::time::Duration;

use rhetor_core::catalog::{FallacyExample, personalized_fallacy, random_fallacy};
use rhetor_core::progress::{ProgressRepository, UserProgress};
use rhetor_core::selector::SelectionStrategy;
use rhetor_core::{Result, RhetorError};
use rhetor_interaction::SparringAgent;
use rhetor_interaction::fallback::mock_identification_feedback;

/// Ceiling on one feedback round trip before the local grader answers
/// instead.
const FEEDBACK_TIMEOUT: Duration = Duration::from_secs(15);

/// Outcome of grading one identification attempt.
#[derive(Debug, Clone)]
pub struct DrillReport {
    /// Whether the answer named the right fallacy.
    pub correct: bool,
    /// Coaching feedback on the attempt.
    pub feedback: String,
    /// Whether the local grader produced the feedback.
    pub used_fallback: bool,
    /// The progress record after this attempt was folded in.
    pub progress: UserProgress,
}

/// Runs fallacy-identification exercises over the catalog.
///
/// # Responsibilities
/// - Pick exercises matched to the stored skill level, biased toward the
///   user's weak fallacy kinds
/// - Grade free-text answers and fetch short coaching feedback, with a
///   local grader when inference is unavailable
/// - Record every attempt's accuracy in the progress record
pub struct DrillUseCase {
    /// Produces grading feedback.
    agent: Arc<dyn SparringAgent>,
    /// Progress record persistence port.
    progress_repository: Arc<dyn ProgressRepository>,
    /// Randomness source for exercise selection.
    selector: Arc<dyn SelectionStrategy>,
}

impl DrillUseCase {
    /// Creates a use case over the given agent and progress port.
    pub fn new(
        agent: Arc<dyn SparringAgent>,
        progress_repository: Arc<dyn ProgressRepository>,
        selector: Arc<dyn SelectionStrategy>,
    ) -> Self {
        Self {
            agent,
            progress_repository,
            selector,
        }
    }

    /// Picks the next exercise.
    ///
    /// With a difficulty cap the pick is uniform over the catalog at or
    /// below the cap. Without one the pick follows the stored skill level,
    /// biased toward fallacy kinds the user keeps missing.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no catalog example satisfies the
    /// requested difficulty.
    pub async fn next_exercise(&self, max_difficulty: Option<u8>) -> Result<FallacyExample> {
        let picked = match max_difficulty {
            Some(cap) => random_fallacy(self.selector.as_ref(), cap),
            None => {
                let progress = self.load_progress_or_default().await;
                personalized_fallacy(
                    self.selector.as_ref(),
                    progress.skill_band(),
                    &progress.weak_areas(),
                )
            }
        };
        picked.ok_or_else(|| {
            RhetorError::configuration("no practice examples available at the requested difficulty")
        })
    }

    /// Grades an identification attempt and updates the progress record.
    ///
    /// Matching is case-insensitive on the trimmed answer. The attempt is
    /// recorded against the example's fallacy kind even when feedback or the
    /// progress write fails; persistence problems are logged, not surfaced.
    pub async fn grade(&self, example: &FallacyExample, user_answer: &str) -> DrillReport {
        let answer = user_answer.trim();
        let correct = answer.eq_ignore_ascii_case(&example.kind);

        let (feedback, used_fallback) = self.feedback(answer, &example.kind).await;

        let mut progress = self.load_progress_or_default().await;
        progress.record_practice(&example.kind, correct);
        if let Err(e) = self.progress_repository.save(&progress).await {
            tracing::warn!("[DrillUseCase] Failed to save progress: {}", e);
        }

        tracing::info!(
            "[DrillUseCase] Graded '{}' attempt: {}",
            example.kind,
            if correct { "correct" } else { "incorrect" }
        );

        DrillReport {
            correct,
            feedback,
            used_fallback,
            progress,
        }
    }

    /// Asks the agent for grading feedback, answering with the local grader
    /// on failure or timeout.
    async fn feedback(&self, answer: &str, correct_kind: &str) -> (String, bool) {
        match tokio::time::timeout(
            FEEDBACK_TIMEOUT,
            self.agent.identification_feedback(answer, correct_kind),
        )
        .await
        {
            Ok(Ok(text)) => (text, false),
            Ok(Err(e)) => {
                tracing::warn!(
                    "[DrillUseCase] Feedback inference failed ({}), using local grader: {}",
                    e.kind(),
                    e
                );
                (mock_identification_feedback(answer, correct_kind), true)
            }
            Err(_) => {
                tracing::warn!(
                    "[DrillUseCase] Feedback inference timed out after {}s, using local grader",
                    FEEDBACK_TIMEOUT.as_secs()
                );
                (mock_identification_feedback(answer, correct_kind), true)
            }
        }
    }

    async fn load_progress_or_default(&self) -> UserProgress {
        match self.progress_repository.load().await {
            Ok(progress) => progress.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(
                    "[DrillUseCase] Failed to load progress, starting fresh: {}",
                    e
                );
                UserProgress::default()
            }
        }
    }
}
