//! # REST API for Profile Management
//!
//! Endpoints for listing, creating, deleting and switching reward card profiles.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, put},
    Router,
};
use log::{error, info, warn};

use super::error_response;
use super::mappers::ProfileMapper;
use crate::domain::profiles::CreateProfileCommand;
use crate::AppState;
use shared::{CreateProfileRequest, SetActiveProfileRequest};

/// Create a router for profile related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profiles", get(list_profiles).post(create_profile))
        .route("/profiles/active", put(set_active_profile))
        .route("/profiles/:profile_id", delete(delete_profile))
}

/// List all profiles
pub async fn list_profiles(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/profiles");

    match state.reward_card_service.snapshot().await {
        Ok(snapshot) => (StatusCode::OK, Json(ProfileMapper::to_profile_list_dto(snapshot))).into_response(),
        Err(e) => {
            error!("Failed to list profiles: {}", e);
            error_response(e)
        }
    }
}

/// Create a new profile and switch to it
pub async fn create_profile(
    State(state): State<AppState>,
    Json(request): Json<CreateProfileRequest>,
) -> impl IntoResponse {
    info!("POST /api/profiles - request: {:?}", request);

    let command = CreateProfileCommand { name: request.name };

    match state.reward_card_service.add_profile(command).await {
        Ok(profile) => (StatusCode::CREATED, Json(ProfileMapper::to_profile_dto(profile))).into_response(),
        Err(e) => {
            warn!("Failed to create profile: {}", e);
            error_response(e)
        }
    }
}

/// Delete a profile
pub async fn delete_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/profiles/{}", profile_id);

    match state.reward_card_service.delete_profile(&profile_id).await {
        Ok(result) => (StatusCode::OK, Json(ProfileMapper::to_delete_profile_dto(result))).into_response(),
        Err(e) => {
            warn!("Failed to delete profile: {}", e);
            error_response(e)
        }
    }
}

/// Switch the active profile
pub async fn set_active_profile(
    State(state): State<AppState>,
    Json(request): Json<SetActiveProfileRequest>,
) -> impl IntoResponse {
    info!("PUT /api/profiles/active - request: {:?}", request);

    match state.reward_card_service.select_profile(&request.profile_id).await {
        Ok(profile) => (StatusCode::OK, Json(ProfileMapper::to_set_active_profile_dto(profile))).into_response(),
        Err(e) => {
            warn!("Failed to switch profile: {}", e);
            error_response(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_support::setup_test_state;
    use crate::test_utils::StaticJudge;
    use axum::{
        body::Body,
        http::{Method, Request},
    };
    use serde_json::json;
    use shared::{
        DeleteProfileResponse, ErrorResponse, ProfileListResponse, ProfileResponse,
        SetActiveProfileResponse,
    };
    use tower::util::ServiceExt; // for `oneshot`

    async fn setup_test_app() -> Router {
        router().with_state(setup_test_state(StaticJudge::approving()).await)
    }

    fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn list(app: &Router) -> ProfileListResponse {
        let request = Request::builder().uri("/profiles").body(Body::empty()).unwrap();
        read_json(app.clone().oneshot(request).await.unwrap()).await
    }

    async fn create(app: &Router, name: &str) -> ProfileResponse {
        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/profiles", json!({ "name": name })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        read_json(response).await
    }

    #[tokio::test]
    async fn test_create_profile_becomes_active() {
        let app = setup_test_app().await;

        let created = create(&app, "  Mia  ").await;
        assert_eq!(created.profile.name, "Mia");
        assert_eq!(created.profile.total_stamps, 0);
        assert_eq!(created.profile.target_stamps, 10);

        let listed = list(&app).await;
        assert_eq!(listed.profiles.len(), 2);
        assert_eq!(listed.profiles[1].id, created.profile.id);
        assert_eq!(listed.active_profile_id, created.profile.id);
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let app = setup_test_app().await;

        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/profiles", json!({ "name": "   " })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.error, "Profile name cannot be empty");
        assert_eq!(list(&app).await.profiles.len(), 1);
    }

    #[tokio::test]
    async fn test_switch_active_profile() {
        let app = setup_test_app().await;
        let first_id = list(&app).await.active_profile_id;
        create(&app, "Leo").await;

        let response = app
            .clone()
            .oneshot(json_request(
                Method::PUT,
                "/profiles/active",
                json!({ "profile_id": first_id }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let switched: SetActiveProfileResponse = read_json(response).await;
        assert_eq!(switched.active_profile.id, first_id);
        assert_eq!(list(&app).await.active_profile_id, first_id);

        let response = app
            .oneshot(json_request(
                Method::PUT,
                "/profiles/active",
                json!({ "profile_id": "profile::missing" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_active_profile_falls_back_to_first() {
        let app = setup_test_app().await;
        let first_id = list(&app).await.active_profile_id;
        let created = create(&app, "Leo").await;

        let request = Request::builder()
            .method(Method::DELETE)
            .uri(format!("/profiles/{}", created.profile.id))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let deleted: DeleteProfileResponse = read_json(response).await;
        assert_eq!(deleted.deleted_profile_id, created.profile.id);
        assert_eq!(deleted.active_profile_id, first_id);
        assert_eq!(list(&app).await.profiles.len(), 1);
    }

    #[tokio::test]
    async fn test_cannot_delete_last_or_unknown_profile() {
        let app = setup_test_app().await;
        let only_id = list(&app).await.active_profile_id;

        let request = Request::builder()
            .method(Method::DELETE)
            .uri(format!("/profiles/{}", only_id))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/profiles/profile::missing")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        assert_eq!(list(&app).await.profiles.len(), 1);
    }
}
