pub mod catalog;
pub mod config;
pub mod error;
pub mod progress;
pub mod selector;
pub mod session;

// Re-export common error type
pub use error::{InvalidTurnReason, Result, RhetorError};
