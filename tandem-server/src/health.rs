use crate::AppState;
use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "OK",
        "uptime_secs": state.started_at.elapsed().as_secs(),
        "connections": state.signaling.connection_count(),
    }))
}
