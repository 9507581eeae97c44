//! Domain model for a child's reward card.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::stamp::Stamp;

/// Goal size given to every new card
pub const DEFAULT_TARGET_STAMPS: u32 = 10;

/// Name of the card created on first run
pub const DEFAULT_PROFILE_NAME: &str = "Super Kid";

/// One reward card for one child.
///
/// `total_stamps` counts the stamps currently filled on the card and never
/// exceeds `target_stamps`. `history` holds every stamp ever awarded, oldest
/// first; its last `total_stamps` entries are the ones shown on the card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub total_stamps: u32,
    pub target_stamps: u32,
    #[serde(default)]
    pub history: Vec<Stamp>,
}

impl Profile {
    /// Generate a unique profile ID
    pub fn generate_id() -> String {
        format!("profile::{}", Uuid::new_v4().simple())
    }

    /// A fresh, empty card with the default goal
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Self::generate_id(),
            name: name.into(),
            total_stamps: 0,
            target_stamps: DEFAULT_TARGET_STAMPS,
            history: Vec::new(),
        }
    }

    /// The card created when nothing has been stored yet
    pub fn default_profile() -> Self {
        Self::new(DEFAULT_PROFILE_NAME)
    }

    /// No more stamps can be awarded until the card is reset
    pub fn is_full(&self) -> bool {
        self.total_stamps >= self.target_stamps
    }

    /// The card reached its goal and should be celebrated
    pub fn is_complete(&self) -> bool {
        self.total_stamps >= self.target_stamps && self.target_stamps > 0
    }

    /// Stamps occupying the filled slots, in slot order
    pub fn filled_stamps(&self) -> &[Stamp] {
        let filled = (self.total_stamps as usize).min(self.history.len());
        &self.history[self.history.len() - filled..]
    }

    pub(crate) fn record_stamp(&mut self, stamp: Stamp) {
        self.history.push(stamp);
        self.total_stamps += 1;
    }

    /// Empty the card. History is kept as the record of every stamp received.
    pub(crate) fn reset_card(&mut self) {
        self.total_stamps = 0;
    }
}
