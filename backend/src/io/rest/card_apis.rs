//! # REST API for the Active Card
//!
//! Endpoints for viewing the session, awarding stamps and starting a new card.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::{error, info};

use super::error_response;
use super::mappers::ProfileMapper;
use crate::domain::stamps::AwardStampCommand;
use crate::AppState;
use shared::AwardStampRequest;

/// Create a router for card related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/card", get(get_card))
        .route("/card/stamps", post(award_stamp))
        .route("/card/reset", post(reset_card))
        .route("/card/celebration/dismiss", post(dismiss_celebration))
}

/// Get every profile, the active card and its filled slots
pub async fn get_card(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/card");

    match state.reward_card_service.snapshot().await {
        Ok(snapshot) => (StatusCode::OK, Json(ProfileMapper::to_snapshot_dto(snapshot))).into_response(),
        Err(e) => {
            error!("Failed to read card: {}", e);
            error_response(e)
        }
    }
}

/// Award a stamp to the active card. A missing body awards a quick stamp.
pub async fn award_stamp(
    State(state): State<AppState>,
    request: Option<Json<AwardStampRequest>>,
) -> impl IntoResponse {
    let request = request.map(|Json(request)| request).unwrap_or_default();
    info!("POST /api/card/stamps - request: {:?}", request);

    let command = AwardStampCommand {
        behavior: request.behavior,
    };

    match state.reward_card_service.award_stamp(command).await {
        Ok(result) => (StatusCode::CREATED, Json(ProfileMapper::to_award_stamp_dto(result))).into_response(),
        Err(e) => {
            info!("Stamp not awarded: {}", e);
            error_response(e)
        }
    }
}

/// Empty the active card
pub async fn reset_card(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/card/reset");

    match state.reward_card_service.reset_active_card().await {
        Ok(profile) => (StatusCode::OK, Json(ProfileMapper::to_reset_card_dto(profile))).into_response(),
        Err(e) => {
            error!("Failed to reset card: {}", e);
            error_response(e)
        }
    }
}

pub async fn dismiss_celebration(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/card/celebration/dismiss");

    match state.reward_card_service.dismiss_celebration().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}
