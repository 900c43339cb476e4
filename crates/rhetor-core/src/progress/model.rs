//! User progress domain model.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Accuracy gained per correct fallacy identification.
const ACCURACY_GAIN: f32 = 0.1;
/// Accuracy lost per missed identification.
const ACCURACY_LOSS: f32 = 0.05;
/// Skill gained per correct identification.
const SKILL_GAIN: f32 = 0.02;
/// Skill lost per miss.
const SKILL_LOSS: f32 = 0.01;

/// Rolling record of the user's practice history and skill.
///
/// Skill progresses fractionally within `[1.0, 5.0]`; catalogs that filter
/// by integer difficulty use [`UserProgress::skill_band`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProgress {
    /// Current skill level, 1.0-5.0.
    pub skill_level: f32,
    /// Per-fallacy-kind identification accuracy, 0.0-1.0.
    #[serde(default)]
    pub fallacy_accuracy: HashMap<String, f32>,
    /// Fallacy kinds the user keeps misidentifying.
    #[serde(default)]
    pub common_mistakes: Vec<String>,
    /// Score of the most recent exercise, normalized to 0.0-1.0.
    pub last_performance_score: f32,
    /// Total fallacy-identification exercises completed.
    pub total_practice_count: u32,
    /// Total sparring sessions completed.
    pub total_debate_count: u32,
    /// Timestamp when this record was created (ISO 8601 format).
    pub created_at: String,
    /// Timestamp when this record was last updated (ISO 8601 format).
    pub updated_at: String,
}

impl Default for UserProgress {
    fn default() -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            skill_level: 1.0,
            fallacy_accuracy: HashMap::new(),
            common_mistakes: Vec::new(),
            last_performance_score: 0.0,
            total_practice_count: 0,
            total_debate_count: 0,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl UserProgress {
    /// The skill level rounded to an integer difficulty band in `[1, 5]`.
    pub fn skill_band(&self) -> u8 {
        self.skill_level.round().clamp(1.0, 5.0) as u8
    }

    /// Fallacy kinds with accuracy below one half, sorted worst first.
    pub fn weak_areas(&self) -> Vec<String> {
        let mut weak: Vec<(&String, f32)> = self
            .fallacy_accuracy
            .iter()
            .filter(|(_, accuracy)| **accuracy < 0.5)
            .map(|(kind, accuracy)| (kind, *accuracy))
            .collect();
        weak.sort_by(|a, b| a.1.total_cmp(&b.1));
        weak.into_iter().map(|(kind, _)| kind.clone()).collect()
    }

    /// Records one fallacy-identification attempt.
    ///
    /// Accuracy for the kind moves up or down, the skill level drifts
    /// accordingly, and repeated misses are remembered as common mistakes.
    pub fn record_practice(&mut self, fallacy_kind: &str, correct: bool) {
        let accuracy = self
            .fallacy_accuracy
            .entry(fallacy_kind.to_string())
            .or_insert(0.0);
        *accuracy = if correct {
            (*accuracy + ACCURACY_GAIN).min(1.0)
        } else {
            (*accuracy - ACCURACY_LOSS).max(0.0)
        };

        let adjustment = if correct { SKILL_GAIN } else { -SKILL_LOSS };
        self.skill_level = (self.skill_level + adjustment).clamp(1.0, 5.0);
        self.last_performance_score = if correct { 1.0 } else { 0.0 };
        self.total_practice_count += 1;

        if !correct && !self.common_mistakes.iter().any(|k| k == fallacy_kind) {
            self.common_mistakes.push(fallacy_kind.to_string());
        }
        self.touch();
    }

    /// Records a finished sparring session with its 0-100 score.
    pub fn record_debate(&mut self, score: u8) {
        self.last_performance_score = f32::from(score.min(100)) / 100.0;
        self.total_debate_count += 1;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

/// Scores a finished session from engagement and completion.
///
/// A base of 60 points, plus 3 per transcript message capped at 30, plus a
/// 10-point completion bonus, capped at 100 overall.
pub fn session_score(message_count: usize, completed: bool) -> u8 {
    let base: u32 = 60;
    let engagement = (message_count as u32 * 3).min(30);
    let completion = if completed { 10 } else { 0 };
    (base + engagement + completion).min(100) as u8
}
