//! # Profile Store
//!
//! Loads and saves the full list of reward cards as one JSON snapshot.
//!
//! ## Schema versions
//!
//! - **v2** (`kid_reward_data_v2`): JSON array of profiles, each with an `id`.
//! - **v1** (`kid_reward_data_v1`): a single profile object without an `id`.
//!
//! Loading tries the newest schema first and falls back to older ones, then
//! to a fresh default card. Stored v1 data is only ever read; once the cards
//! are saved again they live under the v2 key.

use log::{error, info, warn};
use serde::Deserialize;
use std::sync::Arc;

use super::traits::KeyValueStorage;
use crate::domain::models::{Profile, Stamp, DEFAULT_TARGET_STAMPS};

/// Key holding the current snapshot format
pub const CURRENT_STORAGE_KEY: &str = "kid_reward_data_v2";

/// Key holding the single-card format written by the first version
pub const LEGACY_STORAGE_KEY: &str = "kid_reward_data_v1";

/// Where a loaded set of profiles came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileSource {
    Current,
    Legacy,
    Default,
}

/// Result of loading profiles; `profiles` is never empty
#[derive(Debug, Clone)]
pub struct LoadedProfiles {
    pub profiles: Vec<Profile>,
    pub source: ProfileSource,
}

/// Single-card layout stored under the legacy key
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyProfile {
    name: String,
    total_stamps: u32,
    #[serde(default = "default_target_stamps")]
    target_stamps: u32,
    #[serde(default)]
    history: Vec<Stamp>,
}

fn default_target_stamps() -> u32 {
    DEFAULT_TARGET_STAMPS
}

impl LegacyProfile {
    /// The legacy layout had no id, so the migrated card gets a new one
    fn migrate(self) -> Profile {
        Profile {
            id: Profile::generate_id(),
            name: self.name,
            total_stamps: self.total_stamps,
            target_stamps: self.target_stamps,
            history: self.history,
        }
    }
}

/// Versioned persistence for the profile list
#[derive(Clone)]
pub struct ProfileStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl ProfileStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Load profiles, falling back v2 -> v1 -> default. Never fails.
    pub async fn load(&self) -> LoadedProfiles {
        if let Some(profiles) = self.load_current().await {
            info!("Loaded {} profiles from {}", profiles.len(), CURRENT_STORAGE_KEY);
            return LoadedProfiles {
                profiles: clamp_stamp_counts(profiles),
                source: ProfileSource::Current,
            };
        }

        if let Some(profile) = self.load_legacy().await {
            info!(
                "Migrated legacy profile '{}' from {} as {}",
                profile.name, LEGACY_STORAGE_KEY, profile.id
            );
            return LoadedProfiles {
                profiles: clamp_stamp_counts(vec![profile]),
                source: ProfileSource::Legacy,
            };
        }

        let profile = Profile::default_profile();
        info!("No stored profiles found, created default profile {}", profile.id);
        LoadedProfiles {
            profiles: vec![profile],
            source: ProfileSource::Default,
        }
    }

    /// Overwrite the stored snapshot with `profiles`.
    ///
    /// Best effort: failures are logged and reported as `false`. An empty
    /// list is never written so a transient empty state cannot wipe storage.
    pub async fn persist(&self, profiles: &[Profile]) -> bool {
        if profiles.is_empty() {
            warn!("Refusing to persist an empty profile list");
            return false;
        }

        let snapshot = match serde_json::to_string(profiles) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("Failed to serialize profiles: {}", e);
                return false;
            }
        };

        match self.storage.put_value(CURRENT_STORAGE_KEY, &snapshot).await {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to persist profiles: {}", e);
                false
            }
        }
    }

    async fn load_current(&self) -> Option<Vec<Profile>> {
        let raw = self.read(CURRENT_STORAGE_KEY).await?;
        match serde_json::from_str::<Vec<Profile>>(&raw) {
            Ok(profiles) if !profiles.is_empty() => Some(profiles),
            Ok(_) => {
                warn!("Stored profile list under {} is empty", CURRENT_STORAGE_KEY);
                None
            }
            Err(e) => {
                warn!("Failed to parse {}: {}", CURRENT_STORAGE_KEY, e);
                None
            }
        }
    }

    async fn load_legacy(&self) -> Option<Profile> {
        let raw = self.read(LEGACY_STORAGE_KEY).await?;
        match serde_json::from_str::<LegacyProfile>(&raw) {
            Ok(legacy) => Some(legacy.migrate()),
            Err(e) => {
                warn!("Failed to migrate {}: {}", LEGACY_STORAGE_KEY, e);
                None
            }
        }
    }

    /// Read failures count as a missing key
    async fn read(&self, key: &str) -> Option<String> {
        match self.storage.get_value(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read {}: {}", key, e);
                None
            }
        }
    }
}

/// Keep `total_stamps` within both the goal and the recorded history
fn clamp_stamp_counts(mut profiles: Vec<Profile>) -> Vec<Profile> {
    for profile in &mut profiles {
        let recorded = u32::try_from(profile.history.len()).unwrap_or(u32::MAX);
        if profile.total_stamps > recorded {
            warn!(
                "Profile {} counts {} stamps but only {} are recorded, clamping",
                profile.id, profile.total_stamps, recorded
            );
            profile.total_stamps = recorded;
        }
        if profile.total_stamps > profile.target_stamps {
            warn!(
                "Profile {} has {} of {} stamps, clamping",
                profile.id, profile.total_stamps, profile.target_stamps
            );
            profile.total_stamps = profile.target_stamps;
        }
    }
    profiles
}
