//! Behavior judge boundary.
//!
//! The judge decides whether a described behavior earns a stamp. It is a
//! subjective filter, so when it cannot answer the award goes through with
//! a stock approval instead of surfacing an error.

use async_trait::async_trait;
use log::warn;
use std::fmt::Display;

use super::models::JudgeDecision;

/// External service that rates a child's behavior
#[async_trait]
pub trait BehaviorJudge: Send + Sync {
    /// Judge `behavior` for the child called `child_name`.
    ///
    /// Implementations must absorb their own failures and answer with
    /// [`JudgeDecision::fallback`] instead.
    async fn evaluate(&self, behavior: &str, child_name: &str) -> JudgeDecision;
}

/// Replace a failed judgement with the fallback approval
pub fn decision_or_fallback<E: Display>(result: Result<JudgeDecision, E>) -> JudgeDecision {
    match result {
        Ok(decision) => decision,
        Err(e) => {
            warn!("Behavior judge unavailable, approving by default: {}", e);
            JudgeDecision::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_becomes_fallback_approval() {
        let decision = decision_or_fallback::<&str>(Err("connection refused"));

        assert!(decision.approved);
        assert_eq!(decision.praise, "Great job! Keep it up!");
        assert_eq!(decision.emoji, "🌟");
    }

    #[test]
    fn test_rejection_passes_through() {
        let rejected = JudgeDecision {
            approved: false,
            praise: "Let's try again tomorrow!".to_string(),
            emoji: "💪".to_string(),
        };

        assert_eq!(decision_or_fallback::<&str>(Ok(rejected.clone())), rejected);
    }
}
