//! # REST API Interface Layer
//!
//! HTTP endpoints for the sticker card. Handlers translate JSON requests into
//! reward card operations and map the results back into `shared` DTOs.
//!
//! Every failure is answered with an [`ErrorResponse`] body whose text is the
//! notice the UI shows as is.

pub mod card_apis;
pub mod mappers;
pub mod profile_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ErrorResponse;

use crate::domain::RewardCardError;

/// HTTP status for each domain error
pub fn status_for(error: &RewardCardError) -> StatusCode {
    match error {
        RewardCardError::CardFull
        | RewardCardError::AwardInProgress
        | RewardCardError::LastProfile
        | RewardCardError::AlreadyInitialized => StatusCode::CONFLICT,
        RewardCardError::BehaviorRejected => StatusCode::UNPROCESSABLE_ENTITY,
        RewardCardError::ProfileNotFound(_) => StatusCode::NOT_FOUND,
        RewardCardError::EmptyProfileName => StatusCode::BAD_REQUEST,
        RewardCardError::NotInitialized => StatusCode::SERVICE_UNAVAILABLE,
    }
}

pub fn error_response(error: RewardCardError) -> Response {
    (status_for(&error), Json(ErrorResponse::new(error.to_string()))).into_response()
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::domain::{BehaviorJudge, RewardCardService, DEFAULT_CELEBRATION_DELAY};
    use crate::storage::{MemoryKeyValueStore, ProfileStore};
    use crate::AppState;

    pub async fn setup_test_state(judge: Arc<dyn BehaviorJudge>) -> AppState {
        let store = ProfileStore::new(Arc::new(MemoryKeyValueStore::new()));
        let reward_card_service = RewardCardService::new(store, judge, DEFAULT_CELEBRATION_DELAY);
        reward_card_service
            .initialize()
            .await
            .expect("Failed to initialize reward cards");
        AppState {
            reward_card_service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notices_map_to_client_errors() {
        assert_eq!(status_for(&RewardCardError::CardFull), StatusCode::CONFLICT);
        assert_eq!(
            status_for(&RewardCardError::BehaviorRejected),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&RewardCardError::ProfileNotFound("profile::x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&RewardCardError::EmptyProfileName),
            StatusCode::BAD_REQUEST
        );
    }
}
