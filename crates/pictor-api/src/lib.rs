//! pictor-api - HTTP API server for pictor.
//!
//! Exposes the analyze route plus a health check, wired over injected
//! dependencies so tests can substitute mock backends and repositories at
//! the same seams `main` uses for the real ones.

pub mod handlers;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use pictor_core::defaults;
use pictor_db::Database;
use pictor_inference::ImageAnalyzer;

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so request IDs sort chronologically in
/// log output.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// APPLICATION STATE
// =============================================================================

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Fetch-and-describe orchestration over the vision backend.
    pub analyzer: Arc<ImageAnalyzer>,
    /// Hosted table-store facade.
    pub db: Database,
}

impl AppState {
    pub fn new(analyzer: Arc<ImageAnalyzer>, db: Database) -> Self {
        Self { analyzer, db }
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Parse the CORS origin allow-list from the environment.
///
/// `ALLOWED_ORIGINS` is a comma-separated list; invalid entries are dropped
/// with a warning. Defaults to the local gallery UI origin.
pub fn parse_allowed_origins() -> Vec<HeaderValue> {
    let origins_str = std::env::var(defaults::ENV_ALLOWED_ORIGINS)
        .unwrap_or_else(|_| defaults::DEFAULT_ALLOWED_ORIGIN.to_string());

    if origins_str.trim().is_empty() {
        return vec![HeaderValue::from_static(defaults::DEFAULT_ALLOWED_ORIGIN)];
    }

    origins_str
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

/// Build the application router over the given state and origin allow-list.
pub fn build_router(state: AppState, allowed_origins: Vec<HeaderValue>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/analyze-image", post(handlers::analyze::analyze_image))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allowed_origins))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_credentials(true)
                .max_age(std::time::Duration::from_secs(3600)),
        )
        .layer(RequestBodyLimitLayer::new(defaults::REQUEST_BODY_LIMIT))
        .with_state(state)
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

/// Error type returned by handlers, rendered as `{"error": message}`.
#[derive(Debug)]
#[allow(dead_code)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl From<pictor_core::Error> for ApiError {
    fn from(err: pictor_core::Error) -> Self {
        match &err {
            pictor_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
