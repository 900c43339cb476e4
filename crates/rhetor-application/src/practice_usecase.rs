//! Sparring session use case.
//!
//! Coordinates the domain session state machine, the sparring agent, and the
//! persistence ports to run one practice debate from the first argument to
//! the final score.

use std::sync::Arc;
use std::time::Duration;

use rhetor_core::catalog::{DebateFormat, DebateTopic, Side, personalized_topic, random_topic};
use rhetor_core::config::Settings;
use rhetor_core::progress::{ProgressRepository, UserProgress, session_score};
use rhetor_core::selector::SelectionStrategy;
use rhetor_core::session::{PracticeSession, SessionArchiveRepository};
use rhetor_core::{InvalidTurnReason, Result, RhetorError};
use rhetor_interaction::fallback;
use rhetor_interaction::{DebaterPersona, ReplyRequest, SparringAgent, pick_persona};

/// Ceiling on one inference round trip before the canned reply bank answers
/// instead.
const REPLY_TIMEOUT: Duration = Duration::from_secs(30);

/// A live practice debate together with the context the agent needs on every
/// turn.
#[derive(Debug, Clone)]
pub struct PracticeRun {
    /// The domain session state machine.
    pub session: PracticeSession,
    /// The catalog topic the session was started from.
    pub topic: DebateTopic,
    /// The side the user argues.
    pub user_side: Side,
    /// The opponent persona voicing replies for this session.
    pub persona: &'static DebaterPersona,
}

impl PracticeRun {
    /// The side the opponent argues.
    pub fn agent_side(&self) -> Side {
        self.user_side.opposite()
    }

    /// The opponent's self-introduction that opens the session.
    pub fn opening_announcement(&self) -> String {
        format!(
            "I'm {}, {}. I'll be arguing {} on this one. The floor is yours.",
            self.persona.name,
            self.persona.style,
            self.agent_side()
        )
    }
}

/// A single coach remark with its delivery mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoachingNote {
    /// The tip text.
    pub tip: &'static str,
    /// Delivery mood matched to how far the session has progressed.
    pub mood: &'static str,
}

/// Everything produced by resolving one submitted argument.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The opponent's counter-argument.
    pub reply: String,
    /// Whether the canned bank answered because inference failed or timed
    /// out.
    pub used_fallback: bool,
    /// Fallacy kind the reply deliberately exhibits, when one was injected.
    pub injected_fallacy: Option<&'static str>,
    /// Coach note for the submitted argument, when coaching is enabled.
    pub coaching: Option<CoachingNote>,
    /// Final 0-100 score, present when this turn completed the session.
    pub final_score: Option<u8>,
}

/// Runs practice debates against a sparring agent.
///
/// # Responsibilities
/// - Start sessions from a catalog topic, a format, and the user's chosen
///   side
/// - Resolve each submitted argument into an opponent reply, with a canned
///   fallback when inference fails or times out
/// - Attach coaching tips and deliberate-fallacy flags to resolved turns
/// - Score finished sessions, archive the transcript, and fold the result
///   into the progress record
pub struct PracticeUseCase {
    /// Produces opposing arguments.
    agent: Arc<dyn SparringAgent>,
    /// Progress record persistence port.
    progress_repository: Arc<dyn ProgressRepository>,
    /// Finished-transcript persistence port.
    archive_repository: Arc<dyn SessionArchiveRepository>,
    /// Randomness source for persona, tip, and fallacy selection.
    selector: Arc<dyn SelectionStrategy>,
    /// User-tunable behavior knobs.
    settings: Settings,
}

impl PracticeUseCase {
    /// Creates a use case over the given agent and persistence ports.
    pub fn new(
        agent: Arc<dyn SparringAgent>,
        progress_repository: Arc<dyn ProgressRepository>,
        archive_repository: Arc<dyn SessionArchiveRepository>,
        selector: Arc<dyn SelectionStrategy>,
        settings: Settings,
    ) -> Self {
        Self {
            agent,
            progress_repository,
            archive_repository,
            selector,
            settings,
        }
    }

    /// Suggests a topic for the next session.
    ///
    /// With a difficulty cap the pick is uniform over the catalog at or below
    /// the cap. Without one the pick follows the stored skill level; a
    /// missing or unreadable progress record falls back to level one.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no catalog topic satisfies the
    /// requested difficulty.
    pub async fn suggest_topic(&self, max_difficulty: Option<u8>) -> Result<DebateTopic> {
        let picked = match max_difficulty {
            Some(cap) => random_topic(self.selector.as_ref(), cap),
            None => {
                let band = self.load_progress_or_default().await.skill_band();
                personalized_topic(self.selector.as_ref(), band)
            }
        };
        picked.ok_or_else(|| {
            RhetorError::configuration("no debate topics available at the requested difficulty")
        })
    }

    /// Starts a session on `topic` with the user arguing `user_side`.
    ///
    /// The topic's question text becomes the motion the agent debates. The
    /// opponent persona is drawn at random and stays fixed for the whole
    /// session.
    pub fn start_session(
        &self,
        topic: &DebateTopic,
        user_side: Side,
        format: &DebateFormat,
    ) -> Result<PracticeRun> {
        let session =
            PracticeSession::new(topic.description.clone(), format.name.clone(), &format.structure)?;
        let persona = pick_persona(self.selector.as_ref());
        tracing::info!(
            "[PracticeUseCase] Started session {} on '{}' ({}, user arguing {})",
            session.id,
            topic.title,
            format.name,
            user_side
        );
        Ok(PracticeRun {
            session,
            topic: topic.clone(),
            user_side,
            persona,
        })
    }

    /// Resolves one submitted argument into an opponent reply.
    ///
    /// The submission is validated by the domain session first; an invalid
    /// turn leaves the session untouched. Inference failures and timeouts
    /// never surface here: the canned reply bank answers instead and the
    /// outcome is flagged accordingly. When the resolved turn closes the
    /// final stage, the session is scored, archived, and folded into the
    /// progress record.
    ///
    /// # Errors
    ///
    /// Returns an invalid-turn error when the session rejects the submission
    /// (wrong turn, expired clock, blank text, already complete).
    pub async fn submit_user_turn(
        &self,
        run: &mut PracticeRun,
        argument: &str,
    ) -> Result<TurnOutcome> {
        // 1. Validate and record the user's argument.
        run.session.record_user_speech(argument)?;
        let stage_index = run.session.current_stage_index;

        // 2. Generate the opposing reply.
        let request = ReplyRequest::new(
            run.session.topic.clone(),
            argument.trim(),
            run.agent_side(),
            run.persona,
        );
        let (reply, used_fallback) = self.opponent_reply(&request).await;

        // 3. Roll for a deliberately flawed argument to spot.
        let injected_fallacy =
            fallback::maybe_inject_fallacy(self.selector.as_ref(), self.settings.fallacy_rate);

        // 4. Resolve the pending reply; this advances or completes the
        //    session.
        run.session.record_opponent_reply(&reply)?;

        let coaching = self.settings.show_coaching.then(|| CoachingNote {
            tip: fallback::coaching_tip(self.selector.as_ref()),
            mood: fallback::coach_mood(stage_index),
        });

        // 5. Score and persist when this turn closed the final stage.
        let final_score = if run.session.is_complete() {
            Some(self.finalize(run, true).await)
        } else {
            None
        };

        Ok(TurnOutcome {
            reply,
            used_fallback,
            injected_fallacy,
            coaching,
            final_score,
        })
    }

    /// Skips the current stage without a submission.
    ///
    /// Follows the domain rules for operator advances. Returns the final
    /// score when the skip closed the last stage.
    pub async fn advance_stage(&self, run: &mut PracticeRun) -> Result<Option<u8>> {
        run.session.advance_stage()?;
        tracing::debug!(
            "[PracticeUseCase] Session {} advanced to stage {}/{}",
            run.session.id,
            run.session.current_stage_index + 1,
            run.session.stage_count()
        );
        if run.session.is_complete() {
            Ok(Some(self.finalize(run, true).await))
        } else {
            Ok(None)
        }
    }

    /// Ends the session early, scoring it without the completion bonus.
    ///
    /// The partial transcript is archived and the score still counts toward
    /// the progress record.
    ///
    /// # Errors
    ///
    /// Returns an invalid-turn error when the session already completed.
    pub async fn abandon_session(&self, run: &mut PracticeRun) -> Result<u8> {
        if run.session.is_complete() {
            return Err(RhetorError::invalid_turn(InvalidTurnReason::SessionComplete));
        }
        run.session.pause_timer();
        Ok(self.finalize(run, false).await)
    }

    /// Scores the session and persists the transcript and progress record.
    ///
    /// Persistence is best-effort: a failed write is logged and the score is
    /// still returned, so a full disk never swallows the session result.
    async fn finalize(&self, run: &PracticeRun, completed: bool) -> u8 {
        let score = session_score(run.session.transcript.len(), completed);

        if let Err(e) = self.archive_repository.save(&run.session).await {
            tracing::warn!(
                "[PracticeUseCase] Failed to archive session {}: {}",
                run.session.id,
                e
            );
        }

        let mut progress = self.load_progress_or_default().await;
        progress.record_debate(score);
        if let Err(e) = self.progress_repository.save(&progress).await {
            tracing::warn!("[PracticeUseCase] Failed to save progress: {}", e);
        }

        tracing::info!(
            "[PracticeUseCase] Session {} finished with score {} ({} transcript entries)",
            run.session.id,
            score,
            run.session.transcript.len()
        );
        score
    }

    async fn load_progress_or_default(&self) -> UserProgress {
        match self.progress_repository.load().await {
            Ok(progress) => progress.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(
                    "[PracticeUseCase] Failed to load progress, starting fresh: {}",
                    e
                );
                UserProgress::default()
            }
        }
    }

    /// Asks the agent for a counter-argument, answering from the canned bank
    /// on failure or timeout.
    async fn opponent_reply(&self, request: &ReplyRequest) -> (String, bool) {
        match tokio::time::timeout(REPLY_TIMEOUT, self.agent.counter_argument(request)).await {
            Ok(Ok(reply)) => (reply, false),
            Ok(Err(e)) => {
                tracing::warn!(
                    "[PracticeUseCase] Inference failed ({}), using canned reply: {}",
                    e.kind(),
                    e
                );
                (self.canned_reply(request), true)
            }
            Err(_) => {
                tracing::warn!(
                    "[PracticeUseCase] Inference timed out after {}s, using canned reply",
                    REPLY_TIMEOUT.as_secs()
                );
                (self.canned_reply(request), true)
            }
        }
    }

    fn canned_reply(&self, request: &ReplyRequest) -> String {
        fallback::fallback_reply(self.selector.as_ref(), request.side, request.persona)
    }
}
