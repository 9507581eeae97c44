//! # Sticker Card Backend
//!
//! Everything except the UI for the sticker card reward tracker.
//!
//! ## Architecture
//!
//! ```text
//! UI (card screen)
//!     ↓
//! IO Layer (REST API, behavior judge client)
//!     ↓
//! Domain Layer (reward card service, profiles, stamps)
//!     ↓
//! Storage Layer (versioned key-value persistence)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

#[cfg(test)]
mod test_utils;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use log::info;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::domain::RewardCardService;
use crate::io::judge::GeminiJudge;
use crate::io::rest::{card_apis, profile_apis};
use crate::storage::{DbConnection, ProfileStore};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub reward_card_service: RewardCardService,
}

/// Open storage, build the judge and load the reward cards
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_path().display());
    let db_conn = DbConnection::open(&config.database_path()).await?;
    let store = ProfileStore::new(Arc::new(db_conn));

    info!("Setting up behavior judge ({})", config.judge.model);
    if config.judge.api_key.is_none() {
        info!("No judge API key configured; every behavior will be approved");
    }
    let judge = GeminiJudge::new(config.judge.clone()).context("Failed to build judge client")?;

    info!("Loading reward cards");
    let reward_card_service =
        RewardCardService::new(store, Arc::new(judge), config.celebration_delay);
    reward_card_service.initialize().await?;

    Ok(AppState {
        reward_card_service,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .merge(card_apis::router())
        .merge(profile_apis::router());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
