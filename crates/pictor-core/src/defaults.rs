//! Centralized default constants for the pictor system.
//!
//! **This module is the single source of truth** for all shared default
//! values. All crates should reference these constants instead of defining
//! their own magic numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// INFERENCE
// =============================================================================

/// Default vision model for image description.
pub const VISION_MODEL: &str = "gemini-2.5-flash-lite";

/// Default base URL for the Google Generative Language API.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Placeholder returned when the model reply carries no text at all.
pub const EMPTY_RESPONSE_TEXT: &str = "No description available.";

/// Prefix of the stand-in text produced when fetch or inference fails.
/// The stand-in flows through the caption parser like any model output.
pub const FAILURE_TEXT_PREFIX: &str = "Processing failed: ";

/// Number of tags the caption prompt asks the model for.
pub const REQUESTED_TAG_COUNT: usize = 5;

/// Number of hex colors the caption prompt asks the model for.
pub const REQUESTED_COLOR_COUNT: usize = 3;

// =============================================================================
// IMAGE FETCH
// =============================================================================

/// Timeout in seconds for fetching image bytes from the caller-supplied URL.
/// The only bounded step in the request path.
pub const IMAGE_FETCH_TIMEOUT_SECS: u64 = 15;

/// MIME type assumed when the image response carries no Content-Type header.
pub const FALLBACK_IMAGE_MIME: &str = "image/jpeg";

// =============================================================================
// TABLE STORE
// =============================================================================

/// Name of the hosted table receiving analysis rows.
pub const METADATA_TABLE: &str = "image_metadata";

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 8000;

/// Default bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Maximum accepted request body size in bytes. The analyze endpoint takes
/// a small JSON payload, never image bytes.
pub const REQUEST_BODY_LIMIT: usize = 64 * 1024;

/// Default browser origin allowed by CORS when ALLOWED_ORIGINS is unset
/// (local gallery UI development).
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

// =============================================================================
// ENVIRONMENT VARIABLE NAMES
// =============================================================================

/// API key for the Generative Language API.
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";

/// Override for the vision model name.
pub const ENV_GEMINI_MODEL: &str = "GEMINI_MODEL";

/// Override for the Generative Language API base URL.
pub const ENV_GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";

/// Base URL of the hosted table-store project.
pub const ENV_SUPABASE_URL: &str = "SUPABASE_URL";

/// Service key for the hosted table-store.
pub const ENV_SUPABASE_SERVICE_KEY: &str = "SUPABASE_SERVICE_KEY";

/// Comma-separated list of browser origins allowed by CORS.
pub const ENV_ALLOWED_ORIGINS: &str = "ALLOWED_ORIGINS";
