//! Sparring partner agents for debate practice.
//!
//! This crate turns a user's argument into an opposing reply. The
//! [`SparringAgent`] trait is the seam: [`HfInferenceAgent`] implements it
//! against the Hugging Face Inference API, [`ScriptedAgent`] implements it
//! from canned banks for offline runs. The [`fallback`] module carries the
//! canned material itself so synthesis failures can always degrade into a
//! usable reply.

pub mod agent;
pub mod error;
pub mod fallback;
pub mod hf_agent;
pub mod personas;
pub mod prompts;
pub mod scripted;

pub use agent::{ReplyRequest, SparringAgent};
pub use error::InferenceError;
pub use hf_agent::{AVAILABLE_MODELS, DEFAULT_MODEL, HfInferenceAgent, ModelInfo, find_model};
pub use personas::{COACH_MAYA, CoachPersona, DEBATER_PERSONAS, DebaterPersona, pick_persona};
pub use scripted::ScriptedAgent;
