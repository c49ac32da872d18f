//! Core data models for pictor.
//!
//! Both entities are transient: constructed per request, never cached,
//! never retried, discarded after the response is sent.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Incoming payload for the analyze endpoint.
///
/// All identifiers are opaque to this system. Only `image_url` is validated,
/// and only for presence; key ownership lies with the caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeImageRequest {
    /// Opaque image identifier, stored as-is.
    pub image_id: Option<String>,
    /// Fetchable resource locator for the image bytes (required).
    pub image_url: Option<String>,
    /// Opaque user identifier, stored as-is.
    pub user_id: Option<String>,
}

/// Structured result extracted from one block of model output.
///
/// Cardinalities are whatever the model happened to produce; the prompt asks
/// for 5 tags and 3 hex colors but nothing enforces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    /// First non-empty line of the model reply.
    pub description: String,
    /// Entries from the `Tags:` line, trimmed, empties dropped.
    pub tags: Vec<String>,
    /// Entries from the `Colors:` line, trimmed, empties dropped.
    pub colors: Vec<String>,
}

/// Processing status recorded with every persisted row.
///
/// The pipeline is single-shot and best-effort, so the only value ever
/// written is `Completed`, including when the stored description is a
/// failure stand-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    Completed,
}

impl ProcessingStatus {
    /// Returns string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row appended to the external `image_metadata` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewImageMetadata {
    pub image_id: Option<String>,
    pub user_id: Option<String>,
    pub description: String,
    pub tags: Vec<String>,
    pub colors: Vec<String>,
    pub ai_processing_status: ProcessingStatus,
}

impl NewImageMetadata {
    /// Build a row from a parsed analysis and the caller-supplied identifiers.
    pub fn from_analysis(
        image_id: Option<String>,
        user_id: Option<String>,
        analysis: &ImageAnalysis,
    ) -> Self {
        Self {
            image_id,
            user_id,
            description: analysis.description.clone(),
            tags: analysis.tags.clone(),
            colors: analysis.colors.clone(),
            ai_processing_status: ProcessingStatus::Completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_request_deserializes_partial_payload() {
        let req: AnalyzeImageRequest =
            serde_json::from_str(r#"{"image_url": "https://example.com/cat.png"}"#).unwrap();
        assert_eq!(req.image_url.as_deref(), Some("https://example.com/cat.png"));
        assert!(req.image_id.is_none());
        assert!(req.user_id.is_none());
    }

    #[test]
    fn test_analyze_request_deserializes_full_payload() {
        let req: AnalyzeImageRequest = serde_json::from_str(
            r#"{"image_id": "img-1", "image_url": "https://example.com/a.jpg", "user_id": "u-9"}"#,
        )
        .unwrap();
        assert_eq!(req.image_id.as_deref(), Some("img-1"));
        assert_eq!(req.user_id.as_deref(), Some("u-9"));
    }

    #[test]
    fn test_processing_status_serializes_lowercase() {
        let json = serde_json::to_string(&ProcessingStatus::Completed).unwrap();
        assert_eq!(json, r#""completed""#);
    }

    #[test]
    fn test_processing_status_display() {
        assert_eq!(ProcessingStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn test_row_from_analysis_sets_completed_status() {
        let analysis = ImageAnalysis {
            description: "A red apple on a table.".to_string(),
            tags: vec!["red".to_string(), "apple".to_string()],
            colors: vec!["#ff0000".to_string()],
        };

        let row = NewImageMetadata::from_analysis(
            Some("img-1".to_string()),
            Some("u-9".to_string()),
            &analysis,
        );

        assert_eq!(row.image_id.as_deref(), Some("img-1"));
        assert_eq!(row.user_id.as_deref(), Some("u-9"));
        assert_eq!(row.description, "A red apple on a table.");
        assert_eq!(row.ai_processing_status, ProcessingStatus::Completed);
    }

    #[test]
    fn test_row_serialization_shape() {
        let row = NewImageMetadata {
            image_id: None,
            user_id: None,
            description: "desc".to_string(),
            tags: vec!["a".to_string()],
            colors: vec!["#fff".to_string()],
            ai_processing_status: ProcessingStatus::Completed,
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["image_id"], serde_json::Value::Null);
        assert_eq!(json["user_id"], serde_json::Value::Null);
        assert_eq!(json["description"], "desc");
        assert_eq!(json["tags"][0], "a");
        assert_eq!(json["colors"][0], "#fff");
        assert_eq!(json["ai_processing_status"], "completed");
    }

    #[test]
    fn test_image_analysis_default_is_empty() {
        let analysis = ImageAnalysis::default();
        assert!(analysis.description.is_empty());
        assert!(analysis.tags.is_empty());
        assert!(analysis.colors.is_empty());
    }
}
