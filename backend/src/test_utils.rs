//! Shared test doubles for the storage and judge seams.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::domain::judge::BehaviorJudge;
use crate::domain::models::JudgeDecision;
use crate::storage::KeyValueStorage;

/// Storage whose every read and write fails
pub struct FailingStorage;

#[async_trait]
impl KeyValueStorage for FailingStorage {
    async fn get_value(&self, key: &str) -> Result<Option<String>> {
        Err(anyhow!("disk unavailable while reading {}", key))
    }

    async fn put_value(&self, key: &str, _value: &str) -> Result<()> {
        Err(anyhow!("disk unavailable while writing {}", key))
    }
}

/// Judge that always answers with the same decision and records its calls
pub struct StaticJudge {
    decision: JudgeDecision,
    calls: AtomicUsize,
    last_call: Mutex<Option<(String, String)>>,
}

impl StaticJudge {
    pub fn new(decision: JudgeDecision) -> Arc<Self> {
        Arc::new(Self {
            decision,
            calls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
        })
    }

    pub fn approving() -> Arc<Self> {
        Self::new(JudgeDecision {
            approved: true,
            praise: "Amazing effort!".to_string(),
            emoji: "🎉".to_string(),
        })
    }

    pub fn rejecting() -> Arc<Self> {
        Self::new(JudgeDecision {
            approved: false,
            praise: "Let's try a kinder choice next time!".to_string(),
            emoji: "🤗".to_string(),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The `(behavior, child_name)` of the most recent call
    pub fn last_call(&self) -> Option<(String, String)> {
        self.last_call.lock().unwrap().clone()
    }
}

#[async_trait]
impl BehaviorJudge for StaticJudge {
    async fn evaluate(&self, behavior: &str, child_name: &str) -> JudgeDecision {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_call.lock().unwrap() = Some((behavior.to_string(), child_name.to_string()));
        self.decision.clone()
    }
}

/// Approving judge that blocks until the test releases it
pub struct GatedJudge {
    called: Notify,
    gate: Notify,
}

impl GatedJudge {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            called: Notify::new(),
            gate: Notify::new(),
        })
    }

    /// Wait until an evaluation has started
    pub async fn wait_until_called(&self) {
        self.called.notified().await;
    }

    /// Let the pending evaluation finish
    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl BehaviorJudge for GatedJudge {
    async fn evaluate(&self, _behavior: &str, _child_name: &str) -> JudgeDecision {
        self.called.notify_one();
        self.gate.notified().await;
        JudgeDecision {
            approved: true,
            praise: "Worth the wait!".to_string(),
            emoji: "⏳".to_string(),
        }
    }
}
