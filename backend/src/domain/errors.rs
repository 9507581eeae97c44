/// Reasons a reward card operation did not change anything.
///
/// None of these are fatal; the first two are ordinary notices for the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RewardCardError {
    #[error("Card is full! Reset to start a new one.")]
    CardFull,
    #[error("That behavior didn't quite earn a stamp, but keep trying!")]
    BehaviorRejected,
    #[error("A stamp is already being awarded, please wait")]
    AwardInProgress,
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),
    #[error("Cannot delete the last remaining profile")]
    LastProfile,
    #[error("Profile name cannot be empty")]
    EmptyProfileName,
    #[error("Reward cards have not been loaded yet")]
    NotInitialized,
    #[error("Reward cards are already loaded")]
    AlreadyInitialized,
}
