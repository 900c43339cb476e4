//! Coarse session state machine.

use serde::{Deserialize, Serialize};

/// Coarse state of a practice session.
///
/// The timer is a sub-state nested within the non-terminal phases; ticking
/// and pausing never change the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Waiting for the user to submit (or for an operator to advance).
    AwaitingUserInput,
    /// A user turn was submitted; the opponent reply has not resolved yet.
    AwaitingOpponentReply,
    /// Every stage has been completed. Terminal; only reads are valid.
    Complete,
}

impl SessionPhase {
    /// Whether this is a terminal phase.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Whether this phase allows transition to a new phase.
    pub fn can_transition(self) -> bool {
        !self.is_terminal()
    }

    /// Valid transitions from this phase.
    pub fn valid_transitions(self) -> &'static [SessionPhase] {
        match self {
            Self::AwaitingUserInput => &[Self::AwaitingOpponentReply, Self::Complete],
            Self::AwaitingOpponentReply => &[Self::AwaitingUserInput, Self::Complete],
            Self::Complete => &[],
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AwaitingUserInput => write!(f, "awaiting_user_input"),
            Self::AwaitingOpponentReply => write!(f, "awaiting_opponent_reply"),
            Self::Complete => write!(f, "complete"),
        }
    }
}
