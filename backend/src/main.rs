use anyhow::Context;
use axum::http::HeaderValue;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sticker_card_backend::config::AppConfig;
use sticker_card_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let cors_origin = HeaderValue::from_str(&config.cors_origin)
        .context("Invalid STICKER_CARD_CORS_ORIGIN")?;

    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state, cors_origin);

    info!("Starting server on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    info!("Listening on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
