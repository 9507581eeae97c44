use serde::{Deserialize, Serialize};

/// A stamp as shown on a reward card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stamp {
    pub id: String,
    /// Creation time in epoch milliseconds
    pub timestamp: i64,
    /// Behavior text that earned the stamp
    pub behavior: String,
    /// Short congratulatory message
    pub praise: String,
    /// Single emoji glyph
    pub emoji: String,
}

/// One child's reward card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    /// Stamps currently filled on the card
    pub total_stamps: u32,
    /// Number of stamps that completes the card
    pub target_stamps: u32,
    /// Every stamp ever awarded, oldest first
    pub history: Vec<Stamp>,
    /// Derived: the card is full and ready to celebrate
    pub is_complete: bool,
}

/// Full view of the current session, enough to render the card screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSnapshotResponse {
    pub profiles: Vec<Profile>,
    pub active_profile_id: String,
    pub active_profile: Profile,
    /// The stamps occupying the filled slots of the active card, in slot order
    pub filled_stamps: Vec<Stamp>,
    pub celebration_pending: bool,
}

/// Request to award a stamp to the active card.
/// A missing or blank behavior awards a quick stamp without judging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AwardStampRequest {
    #[serde(default)]
    pub behavior: Option<String>,
}

/// Response after a stamp was awarded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwardStampResponse {
    pub stamp: Stamp,
    pub profile: Profile,
    pub card_complete: bool,
    /// Delay the UI should wait before showing the celebration, if any
    pub celebrate_after_ms: Option<u64>,
    pub success_message: String,
}

/// Response after resetting the active card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetCardResponse {
    pub profile: Profile,
    pub success_message: String,
}

/// Request for creating a new profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProfileRequest {
    pub name: String,
}

/// Response after creating a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub profile: Profile,
    pub success_message: String,
}

/// Response containing every profile and the active selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileListResponse {
    pub profiles: Vec<Profile>,
    pub active_profile_id: String,
}

/// Request for switching the active profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetActiveProfileRequest {
    pub profile_id: String,
}

/// Response after switching the active profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetActiveProfileResponse {
    pub active_profile: Profile,
    pub success_message: String,
}

/// Response after deleting a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteProfileResponse {
    pub deleted_profile_id: String,
    pub active_profile_id: String,
    pub success_message: String,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_award_request_behavior_is_optional() {
        let request: AwardStampRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.behavior, None);

        let request: AwardStampRequest =
            serde_json::from_str(r#"{"behavior":"Shared toys"}"#).unwrap();
        assert_eq!(request.behavior.as_deref(), Some("Shared toys"));
    }

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_value(ErrorResponse::new("Card is full!")).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Card is full!" }));
    }
}
