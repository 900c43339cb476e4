//! Built-in content catalogs: debate topics, fallacy examples, and format
//! presets.
//!
//! All lookups are pure and synchronous. Random selection is injected via
//! [`crate::selector::SelectionStrategy`].

mod fallacy;
mod format;
mod topic;

pub use fallacy::{
    FallacyExample, FallacySpan, fallacies_by_difficulty, get_default_fallacies,
    personalized_fallacy, random_fallacy,
};
pub use format::{DebateFormat, FormatTier, find_format, get_default_formats};
pub use topic::{
    DebateTopic, Side, get_default_topics, personalized_topic, random_topic, topics_by_difficulty,
    topics_in_category,
};
