//! Domain model for a single awarded stamp.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::judge_decision::JudgeDecision;

/// One reward event. Stamps are only ever appended to a profile's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stamp {
    pub id: String,
    /// Stored as epoch milliseconds
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub behavior: String,
    pub praise: String,
    pub emoji: String,
}

impl Stamp {
    pub const QUICK_BEHAVIOR: &'static str = "Good Behavior!";
    pub const QUICK_PRAISE: &'static str = "Great job!";
    pub const QUICK_EMOJI: &'static str = "⭐";

    /// Generate a stamp ID from its creation time
    pub fn generate_id(epoch_millis: i64) -> String {
        format!("stamp::{}", epoch_millis)
    }

    /// A stamp awarded without asking the judge
    pub fn quick(now: DateTime<Utc>) -> Self {
        Self::build(
            now,
            Self::QUICK_BEHAVIOR.to_string(),
            Self::QUICK_PRAISE.to_string(),
            Self::QUICK_EMOJI.to_string(),
        )
    }

    /// A stamp for a behavior the judge approved
    pub fn judged(behavior: &str, decision: &JudgeDecision, now: DateTime<Utc>) -> Self {
        Self::build(
            now,
            behavior.to_string(),
            decision.praise.clone(),
            decision.emoji.clone(),
        )
    }

    fn build(now: DateTime<Utc>, behavior: String, praise: String, emoji: String) -> Self {
        // Millisecond precision so the stored form reloads identically
        let timestamp = now.trunc_subsecs(3);
        Self {
            id: Self::generate_id(timestamp.timestamp_millis()),
            timestamp,
            behavior,
            praise,
            emoji,
        }
    }
}
