use crate::domain::card::CardSnapshot;
use crate::domain::models::{Profile as DomainProfile, Stamp as DomainStamp};
use crate::domain::profiles::DeleteProfileResult;
use crate::domain::stamps::AwardStampResult;
use shared::{
    AwardStampResponse, CardSnapshotResponse, DeleteProfileResponse, Profile as SharedProfile,
    ProfileListResponse, ProfileResponse, ResetCardResponse, SetActiveProfileResponse,
    Stamp as SharedStamp,
};

/// Mapper to convert domain profiles and stamps into shared DTOs.
pub struct ProfileMapper;

impl ProfileMapper {
    pub fn to_stamp_dto(domain: &DomainStamp) -> SharedStamp {
        SharedStamp {
            id: domain.id.clone(),
            timestamp: domain.timestamp.timestamp_millis(),
            behavior: domain.behavior.clone(),
            praise: domain.praise.clone(),
            emoji: domain.emoji.clone(),
        }
    }

    /// Converts a domain Profile to a shared Profile DTO, deriving `is_complete`.
    pub fn to_dto(domain: &DomainProfile) -> SharedProfile {
        SharedProfile {
            id: domain.id.clone(),
            name: domain.name.clone(),
            total_stamps: domain.total_stamps,
            target_stamps: domain.target_stamps,
            history: domain.history.iter().map(Self::to_stamp_dto).collect(),
            is_complete: domain.is_complete(),
        }
    }

    pub fn to_snapshot_dto(domain: CardSnapshot) -> CardSnapshotResponse {
        CardSnapshotResponse {
            profiles: domain.profiles.iter().map(Self::to_dto).collect(),
            active_profile_id: domain.active_profile.id.clone(),
            filled_stamps: domain
                .active_profile
                .filled_stamps()
                .iter()
                .map(Self::to_stamp_dto)
                .collect(),
            active_profile: Self::to_dto(&domain.active_profile),
            celebration_pending: domain.celebration_pending,
        }
    }

    pub fn to_profile_list_dto(domain: CardSnapshot) -> ProfileListResponse {
        ProfileListResponse {
            profiles: domain.profiles.iter().map(Self::to_dto).collect(),
            active_profile_id: domain.active_profile.id,
        }
    }

    pub fn to_award_stamp_dto(domain: AwardStampResult) -> AwardStampResponse {
        let success_message = if domain.completed {
            format!("{} filled the card!", domain.profile.name)
        } else {
            format!(
                "{} earned a stamp! {}",
                domain.profile.name, domain.stamp.praise
            )
        };

        AwardStampResponse {
            stamp: Self::to_stamp_dto(&domain.stamp),
            profile: Self::to_dto(&domain.profile),
            card_complete: domain.completed,
            celebrate_after_ms: domain
                .celebrate_after
                .map(|delay| delay.as_millis() as u64),
            success_message,
        }
    }

    pub fn to_reset_card_dto(domain: DomainProfile) -> ResetCardResponse {
        ResetCardResponse {
            success_message: format!("Started a new card for {}", domain.name),
            profile: Self::to_dto(&domain),
        }
    }

    pub fn to_profile_dto(domain: DomainProfile) -> ProfileResponse {
        ProfileResponse {
            success_message: format!("Profile '{}' created successfully", domain.name),
            profile: Self::to_dto(&domain),
        }
    }

    pub fn to_set_active_profile_dto(domain: DomainProfile) -> SetActiveProfileResponse {
        SetActiveProfileResponse {
            success_message: format!("Switched to {}", domain.name),
            active_profile: Self::to_dto(&domain),
        }
    }

    pub fn to_delete_profile_dto(domain: DeleteProfileResult) -> DeleteProfileResponse {
        DeleteProfileResponse {
            success_message: "Profile deleted successfully".to_string(),
            deleted_profile_id: domain.deleted_profile_id,
            active_profile_id: domain.active_profile_id,
        }
    }
}
