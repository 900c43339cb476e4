//! Session domain module.
//!
//! This module contains the turn-based session/timer controller and its
//! supporting types.
//!
//! # Module Structure
//!
//! - `model`: The session state machine (`PracticeSession`)
//! - `stage`: Stage types and stage-list construction (`Stage`, `SpeakerRole`)
//! - `message`: Transcript entries (`SpeechRecord`)
//! - `phase`: Coarse session states (`SessionPhase`)
//! - `repository`: Persistence trait for terminal snapshots

mod message;
mod model;
mod phase;
mod repository;
mod stage;

// Re-export public API
pub use message::SpeechRecord;
pub use model::PracticeSession;
pub use phase::SessionPhase;
pub use repository::SessionArchiveRepository;
pub use stage::{
    CROSS_EXAM_SECS, DEFAULT_STAGE_SECS, REBUTTAL_SECS, SpeakerRole, Stage, build_stages,
    duration_for_stage, stage_prompt,
};
