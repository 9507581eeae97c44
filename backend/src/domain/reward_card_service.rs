//! Reward card domain logic.
//!
//! This module owns the in-memory session (every profile plus the active
//! selection) and all operations that change it: awarding stamps, resetting
//! a card and managing profiles. Every change to the profile list is written
//! through the [`ProfileStore`] right away.
//!
//! ## Business Rules
//!
//! - At least one profile exists once the session is initialized
//! - Exactly one profile is active and it always exists
//! - `total_stamps` never exceeds `target_stamps`; awards on a full card fail
//! - Blank behavior text awards a quick stamp without calling the judge
//! - Only one award runs at a time; overlapping requests are rejected
//! - An award lands on the card that was active when it was requested
//! - Resetting a card keeps its stamp history
//! - The last remaining profile cannot be deleted

use chrono::Utc;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::commands::card::CardSnapshot;
use super::commands::profiles::{CreateProfileCommand, DeleteProfileResult};
use super::commands::stamps::{AwardStampCommand, AwardStampResult};
use super::errors::RewardCardError;
use super::judge::BehaviorJudge;
use super::models::{Profile, Stamp};
use crate::storage::ProfileStore;

/// Delay before the celebration is shown, letting the stamp animation finish
pub const DEFAULT_CELEBRATION_DELAY: Duration = Duration::from_millis(600);

type Result<T> = std::result::Result<T, RewardCardError>;

/// Everything that changes while the app is running
#[derive(Debug)]
struct CardSession {
    profiles: Vec<Profile>,
    active_profile_id: String,
    celebration_pending: bool,
}

impl CardSession {
    fn active_profile(&self) -> Result<&Profile> {
        self.find(&self.active_profile_id)
    }

    fn active_profile_mut(&mut self) -> Result<&mut Profile> {
        let id = self.active_profile_id.clone();
        self.profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RewardCardError::ProfileNotFound(id))
    }

    fn find(&self, profile_id: &str) -> Result<&Profile> {
        self.profiles
            .iter()
            .find(|p| p.id == profile_id)
            .ok_or_else(|| RewardCardError::ProfileNotFound(profile_id.to_string()))
    }

    /// Switch cards; a completed card celebrates again when shown
    fn activate(&mut self, profile_id: String) {
        self.celebration_pending = self
            .find(&profile_id)
            .map(Profile::is_complete)
            .unwrap_or(false);
        self.active_profile_id = profile_id;
    }

    fn snapshot(&self) -> Result<CardSnapshot> {
        Ok(CardSnapshot {
            profiles: self.profiles.clone(),
            active_profile: self.active_profile()?.clone(),
            celebration_pending: self.celebration_pending,
        })
    }
}

/// Marks an award as running; cleared on drop whatever the outcome
struct AwardGuard<'a> {
    in_flight: &'a AtomicBool,
}

impl<'a> AwardGuard<'a> {
    fn acquire(in_flight: &'a AtomicBool) -> Option<Self> {
        in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { in_flight })
    }
}

impl Drop for AwardGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

/// Service owning the reward cards of one session
#[derive(Clone)]
pub struct RewardCardService {
    store: ProfileStore,
    judge: Arc<dyn BehaviorJudge>,
    session: Arc<Mutex<Option<CardSession>>>,
    award_in_flight: Arc<AtomicBool>,
    celebration_delay: Duration,
}

impl RewardCardService {
    /// Create a new RewardCardService. Call [`initialize`](Self::initialize) before use.
    pub fn new(
        store: ProfileStore,
        judge: Arc<dyn BehaviorJudge>,
        celebration_delay: Duration,
    ) -> Self {
        Self {
            store,
            judge,
            session: Arc::new(Mutex::new(None)),
            award_in_flight: Arc::new(AtomicBool::new(false)),
            celebration_delay,
        }
    }

    /// Load the stored cards and activate the first one. Runs once per session.
    pub async fn initialize(&self) -> Result<CardSnapshot> {
        let mut session = self.session.lock().await;
        if session.is_some() {
            warn!("Reward cards already initialized");
            return Err(RewardCardError::AlreadyInitialized);
        }

        let loaded = self.store.load().await;
        let active_profile_id = loaded
            .profiles
            .first()
            .map(|p| p.id.clone())
            .ok_or(RewardCardError::NotInitialized)?;

        let mut new_session = CardSession {
            profiles: loaded.profiles,
            active_profile_id: String::new(),
            celebration_pending: false,
        };
        new_session.activate(active_profile_id);
        self.store.persist(&new_session.profiles).await;

        info!(
            "Initialized {} reward cards from {:?} storage, active: {}",
            new_session.profiles.len(),
            loaded.source,
            new_session.active_profile_id
        );

        let snapshot = new_session.snapshot()?;
        *session = Some(new_session);
        Ok(snapshot)
    }

    /// Copy of every profile, the active one and the celebration flag
    pub async fn snapshot(&self) -> Result<CardSnapshot> {
        let session = self.session.lock().await;
        session
            .as_ref()
            .ok_or(RewardCardError::NotInitialized)?
            .snapshot()
    }

    /// The card currently shown
    pub async fn active_profile(&self) -> Result<Profile> {
        let session = self.session.lock().await;
        session
            .as_ref()
            .ok_or(RewardCardError::NotInitialized)?
            .active_profile()
            .cloned()
    }

    /// Award one stamp to the active card.
    ///
    /// Blank behavior text gives a quick stamp; anything else is sent to the
    /// judge first. The session lock is not held while the judge is working,
    /// so the user may switch cards meanwhile; the stamp still goes to the
    /// card it was requested for.
    pub async fn award_stamp(&self, command: AwardStampCommand) -> Result<AwardStampResult> {
        let _award = AwardGuard::acquire(&self.award_in_flight).ok_or_else(|| {
            warn!("Rejected award: another award is still in flight");
            RewardCardError::AwardInProgress
        })?;

        let (profile_id, child_name) = {
            let session = self.session.lock().await;
            let session = session.as_ref().ok_or(RewardCardError::NotInitialized)?;
            let profile = session.active_profile()?;
            if profile.is_full() {
                info!("Card {} is full, award rejected", profile.id);
                return Err(RewardCardError::CardFull);
            }
            (profile.id.clone(), profile.name.clone())
        };

        // Blank text means a quick stamp; otherwise the text is kept as entered
        let behavior = command
            .behavior
            .as_deref()
            .filter(|text| !text.trim().is_empty());

        let stamp = match behavior {
            None => {
                debug!("Awarding quick stamp to {}", profile_id);
                Stamp::quick(Utc::now())
            }
            Some(text) => {
                info!("Asking judge about '{}' for {}", text, child_name);
                let decision = self.judge.evaluate(text, &child_name).await;
                if !decision.approved {
                    info!("Judge did not approve '{}' for {}", text, child_name);
                    return Err(RewardCardError::BehaviorRejected);
                }
                Stamp::judged(text, &decision, Utc::now())
            }
        };

        let mut session = self.session.lock().await;
        let session = session.as_mut().ok_or(RewardCardError::NotInitialized)?;

        let updated = {
            let profile = session
                .profiles
                .iter_mut()
                .find(|p| p.id == profile_id)
                .ok_or_else(|| {
                    warn!("Profile {} was removed while its award was pending", profile_id);
                    RewardCardError::ProfileNotFound(profile_id.clone())
                })?;
            if profile.is_full() {
                return Err(RewardCardError::CardFull);
            }
            profile.record_stamp(stamp.clone());
            profile.clone()
        };

        let completed = updated.is_complete();
        // Only the card on screen celebrates
        let celebrate = completed && session.active_profile_id == updated.id;
        if celebrate {
            session.celebration_pending = true;
        }
        self.store.persist(&session.profiles).await;

        info!(
            "Awarded stamp {} to {} ({}/{})",
            stamp.id, updated.name, updated.total_stamps, updated.target_stamps
        );

        Ok(AwardStampResult {
            profile: updated,
            stamp,
            completed,
            celebrate_after: celebrate.then_some(self.celebration_delay),
        })
    }

    /// Empty the active card so a new round can start. History is kept.
    pub async fn reset_active_card(&self) -> Result<Profile> {
        let mut session = self.session.lock().await;
        let session = session.as_mut().ok_or(RewardCardError::NotInitialized)?;

        let profile = session.active_profile_mut()?;
        profile.reset_card();
        let updated = profile.clone();

        session.celebration_pending = false;
        self.store.persist(&session.profiles).await;

        info!("Reset card for {} ({})", updated.name, updated.id);
        Ok(updated)
    }

    /// Hide the celebration without touching the card
    pub async fn dismiss_celebration(&self) -> Result<()> {
        let mut session = self.session.lock().await;
        let session = session.as_mut().ok_or(RewardCardError::NotInitialized)?;
        session.celebration_pending = false;
        Ok(())
    }

    /// Add a new empty card and make it active
    pub async fn add_profile(&self, command: CreateProfileCommand) -> Result<Profile> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(RewardCardError::EmptyProfileName);
        }

        let mut session = self.session.lock().await;
        let session = session.as_mut().ok_or(RewardCardError::NotInitialized)?;

        let profile = Profile::new(name);
        session.profiles.push(profile.clone());
        session.activate(profile.id.clone());
        self.store.persist(&session.profiles).await;

        info!("Created profile {} with ID: {}", profile.name, profile.id);
        Ok(profile)
    }

    /// Remove a card. The last card cannot be removed; removing the active
    /// card activates the first remaining one.
    pub async fn delete_profile(&self, profile_id: &str) -> Result<DeleteProfileResult> {
        let mut session = self.session.lock().await;
        let session = session.as_mut().ok_or(RewardCardError::NotInitialized)?;

        let index = session
            .profiles
            .iter()
            .position(|p| p.id == profile_id)
            .ok_or_else(|| RewardCardError::ProfileNotFound(profile_id.to_string()))?;
        if session.profiles.len() == 1 {
            warn!("Refusing to delete the last profile {}", profile_id);
            return Err(RewardCardError::LastProfile);
        }

        let removed = session.profiles.remove(index);
        if session.active_profile_id == removed.id {
            let next = session.profiles[0].id.clone();
            session.activate(next);
        }
        self.store.persist(&session.profiles).await;

        info!("Deleted profile {} with ID: {}", removed.name, removed.id);
        Ok(DeleteProfileResult {
            deleted_profile_id: removed.id,
            active_profile_id: session.active_profile_id.clone(),
        })
    }

    /// Make another existing card the active one
    pub async fn select_profile(&self, profile_id: &str) -> Result<Profile> {
        let mut session = self.session.lock().await;
        let session = session.as_mut().ok_or(RewardCardError::NotInitialized)?;

        let profile = session.find(profile_id)?.clone();
        session.activate(profile.id.clone());

        info!("Active profile is now {} ({})", profile.name, profile.id);
        Ok(profile)
    }
}
