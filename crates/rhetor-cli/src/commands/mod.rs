pub mod check;
pub mod drill;
pub mod formats;
pub mod practice;
pub mod progress;
pub mod topics;
pub mod utils;
