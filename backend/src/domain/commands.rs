//! Domain-level command and query types
//! These structs are used by the reward card service and are **not**
//! exposed over the public API. The REST layer maps the DTOs defined in the
//! `shared` crate to and from these internal types.

pub mod stamps {
    use crate::domain::models::{Profile, Stamp};
    use std::time::Duration;

    /// Input for awarding a stamp to the active card.
    /// `None` or blank text awards a quick stamp.
    #[derive(Debug, Clone, Default)]
    pub struct AwardStampCommand {
        pub behavior: Option<String>,
    }

    /// Result of a successful award.
    #[derive(Debug, Clone)]
    pub struct AwardStampResult {
        /// The card the stamp landed on, after the award
        pub profile: Profile,
        pub stamp: Stamp,
        /// The award filled the card
        pub completed: bool,
        /// How long the UI should wait before celebrating; set only when the
        /// completed card is still the active one
        pub celebrate_after: Option<Duration>,
    }
}

pub mod profiles {
    /// Input for creating a new profile.
    #[derive(Debug, Clone)]
    pub struct CreateProfileCommand {
        pub name: String,
    }

    /// Result of deleting a profile.
    #[derive(Debug, Clone)]
    pub struct DeleteProfileResult {
        pub deleted_profile_id: String,
        pub active_profile_id: String,
    }
}

pub mod card {
    use crate::domain::models::Profile;

    /// Read-only copy of the whole session.
    #[derive(Debug, Clone)]
    pub struct CardSnapshot {
        pub profiles: Vec<Profile>,
        pub active_profile: Profile,
        pub celebration_pending: bool,
    }
}
