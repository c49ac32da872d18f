//! Image analysis HTTP handler.
//!
//! One route drives the whole pipeline: fetch the image, ask the vision
//! model, parse the reply, append a row to the hosted table.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::instrument;

use pictor_core::{AnalyzeImageRequest, NewImageMetadata, ProcessingStatus};
use pictor_inference::parse_caption;

use crate::{ApiError, AppState};

/// Response body for a completed analysis.
///
/// The status is always `completed`: upstream failures surface only as the
/// stand-in description inside `raw_ai_output`, and persistence failures are
/// logged server-side without affecting the response.
#[derive(Debug, Serialize)]
pub struct AnalyzeImageResponse {
    /// Fixed processing status.
    pub status: ProcessingStatus,
    /// Description extracted from the model reply.
    pub description: String,
    /// The model reply verbatim, for clients that parse it themselves.
    pub raw_ai_output: String,
}

/// Analyze an image by URL and persist the extracted metadata.
///
/// # Request Body
/// - `image_url`: fetchable image location (required)
/// - `image_id`: opaque identifier stored with the row (optional)
/// - `user_id`: opaque identifier stored with the row (optional)
///
/// # Returns
/// - 200 OK with status, description, and the raw model output
/// - 400 Bad Request when `image_url` is missing or empty; no outbound
///   call is made in that case
#[instrument(skip(state, req), fields(subsystem = "api", op = "analyze_image"))]
pub async fn analyze_image(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeImageRequest>,
) -> Result<Json<AnalyzeImageResponse>, ApiError> {
    let image_url = match req.image_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => return Err(ApiError::BadRequest("Missing image_url".to_string())),
    };

    let start = std::time::Instant::now();
    let raw_ai_output = state.analyzer.analyze(&image_url).await;
    let analysis = parse_caption(&raw_ai_output);

    tracing::info!(
        image_id = req.image_id.as_deref().unwrap_or(""),
        image_url = %image_url,
        model = state.analyzer.model_name(),
        response_len = raw_ai_output.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Image analyzed"
    );

    let row = NewImageMetadata::from_analysis(req.image_id, req.user_id, &analysis);
    if let Err(e) = state.db.metadata.insert(row).await {
        // Persistence is best-effort: the caller still gets the analysis.
        tracing::error!(error = %e, "Failed to persist image metadata");
    }

    Ok(Json(AnalyzeImageResponse {
        status: ProcessingStatus::Completed,
        description: analysis.description,
        raw_ai_output,
    }))
}
