//! Application layer for Rhetor.
//!
//! This crate provides use case implementations that coordinate between the
//! domain and infrastructure layers to run practice debates and drills.

pub mod drill_usecase;
pub mod practice_usecase;

pub use drill_usecase::{DrillReport, DrillUseCase};
pub use practice_usecase::{CoachingNote, PracticeRun, PracticeUseCase, TurnOutcome};
