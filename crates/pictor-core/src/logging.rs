//! Structured logging field name constants for pictor.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized field names across
//! every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention (failed persistence) |
//! | WARN  | Recoverable issue, stand-in text substituted for model output |
//! | INFO  | Lifecycle events (startup), operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated across the request path.
/// Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "inference", "db"
pub const SUBSYSTEM: &str = "subsystem";

/// Logical operation name.
/// Examples: "analyze_image", "describe_image", "fetch_image", "insert"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Opaque image identifier supplied by the caller.
pub const IMAGE_ID: &str = "image_id";

/// Opaque user identifier supplied by the caller.
pub const USER_ID: &str = "user_id";

/// URL the image bytes were fetched from.
pub const IMAGE_URL: &str = "image_url";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for inference.
pub const MODEL: &str = "model";

/// MIME type of the fetched image bytes.
pub const MIME_TYPE: &str = "mime_type";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

// ─── Database fields ───────────────────────────────────────────────────────

/// Table or entity affected.
pub const DB_TABLE: &str = "db_table";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
