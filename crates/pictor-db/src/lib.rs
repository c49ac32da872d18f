//! # pictor-db
//!
//! Hosted table-store layer for pictor.
//!
//! This crate provides the [`pictor_core::ImageMetadataRepository`]
//! implementation over the Supabase PostgREST surface. The table is owned
//! and keyed externally; this system only appends rows.
//!
//! ## Example
//!
//! ```rust,ignore
//! use pictor_db::Database;
//! use pictor_core::{ImageAnalysis, NewImageMetadata};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::from_env()?;
//!
//!     let row = NewImageMetadata::from_analysis(
//!         Some("img-1".to_string()),
//!         None,
//!         &ImageAnalysis::default(),
//!     );
//!     db.metadata.insert(row).await?;
//!     Ok(())
//! }
//! ```

pub mod metadata;

pub use metadata::{Database, SupabaseConfig, SupabaseMetadataRepository};
