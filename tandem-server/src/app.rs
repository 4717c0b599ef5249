use crate::config::ServerConfig;
use crate::health::health;
use crate::signaling::{SignalingService, ws_handler};
use anyhow::Context;
use axum::Router;
use axum::routing::get;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub signaling: SignalingService,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(signaling: SignalingService) -> Self {
        Self {
            signaling,
            started_at: Instant::now(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

/// Binds the configured address and serves until the listener fails.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let addr = config.bind_addr().context("Invalid bind address")?;
    let state = AppState::new(SignalingService::spawn(config.relay_buffer));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Relay listening on http://{}", addr);

    serve_listener(listener, state).await
}

/// Serves the relay on an already bound listener.
pub async fn serve_listener(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    axum::serve(listener, router(state))
        .await
        .context("Server error")?;
    Ok(())
}
