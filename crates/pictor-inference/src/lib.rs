//! # pictor-inference
//!
//! Vision inference backend abstraction for pictor.
//!
//! This crate provides:
//! - Pluggable vision backend trait
//! - Gemini implementation over the Generative Language API
//! - The fixed captioning prompt and the caption parser
//! - Image fetching by URL with a bounded wait
//! - The analysis orchestration that stitches fetch and inference together
//!
//! # Example
//!
//! ```rust,no_run
//! use pictor_inference::{GeminiVisionBackend, ImageAnalyzer};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = GeminiVisionBackend::from_env().unwrap();
//!     let analyzer = ImageAnalyzer::new(Arc::new(backend));
//!     let raw = analyzer.analyze("https://example.com/cat.png").await;
//!     println!("{}", raw);
//! }
//! ```

pub mod analyzer;
pub mod caption;
pub mod fetch;
pub mod vision;

// Re-export core types
pub use pictor_core::*;

pub use analyzer::ImageAnalyzer;
pub use caption::{caption_prompt, parse_caption};
pub use fetch::{FetchedImage, ImageFetcher};
pub use vision::{GeminiConfig, GeminiVisionBackend, VisionBackend};
