//! Health check handler.

use axum::{extract::State, response::IntoResponse, Json};

use crate::AppState;

/// Liveness probe reporting service identity and the configured model.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "pictor-api",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.analyzer.model_name(),
    }))
}
