//! Core traits for pictor abstractions.
//!
//! These traits define the interfaces that concrete implementations must
//! satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::NewImageMetadata;

/// Repository for the hosted image-metadata table.
///
/// The table is external and externally keyed; this system only ever
/// appends rows. There is no read path.
#[async_trait]
pub trait ImageMetadataRepository: Send + Sync {
    /// Append one analysis row to the external table.
    async fn insert(&self, row: NewImageMetadata) -> Result<()>;
}
