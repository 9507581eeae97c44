use serde::{Deserialize, Serialize};

/// Verdict returned by the behavior judge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeDecision {
    pub approved: bool,
    pub praise: String,
    pub emoji: String,
}

impl JudgeDecision {
    pub const FALLBACK_PRAISE: &'static str = "Great job! Keep it up!";
    pub const FALLBACK_EMOJI: &'static str = "🌟";

    /// Approval used whenever the judge cannot give a usable answer
    pub fn fallback() -> Self {
        Self {
            approved: true,
            praise: Self::FALLBACK_PRAISE.to_string(),
            emoji: Self::FALLBACK_EMOJI.to_string(),
        }
    }
}
