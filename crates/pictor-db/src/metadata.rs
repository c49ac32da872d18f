//! Image metadata repository over the Supabase PostgREST insert surface.

use std::sync::Arc;

use async_trait::async_trait;
use pictor_core::{defaults, Error, ImageMetadataRepository, NewImageMetadata, Result};

/// Configuration for the hosted table-store.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project base URL, e.g. `https://abc.supabase.co`.
    pub base_url: String,
    /// Service key, sent as both `apikey` and bearer token.
    pub service_key: String,
}

impl SupabaseConfig {
    /// Load configuration from environment variables.
    ///
    /// Both `SUPABASE_URL` and `SUPABASE_SERVICE_KEY` are required.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(defaults::ENV_SUPABASE_URL)
            .map_err(|_| Error::Config(format!("{} is not set", defaults::ENV_SUPABASE_URL)))?;
        let service_key = std::env::var(defaults::ENV_SUPABASE_SERVICE_KEY).map_err(|_| {
            Error::Config(format!("{} is not set", defaults::ENV_SUPABASE_SERVICE_KEY))
        })?;

        let config = Self {
            base_url,
            service_key,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "Supabase base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }
        if self.service_key.is_empty() {
            return Err(Error::Config(
                "Supabase service_key cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Repository appending analysis rows through `POST /rest/v1/image_metadata`.
pub struct SupabaseMetadataRepository {
    config: SupabaseConfig,
    client: reqwest::Client,
}

impl SupabaseMetadataRepository {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(SupabaseConfig::from_env()?))
    }
}

#[async_trait]
impl ImageMetadataRepository for SupabaseMetadataRepository {
    async fn insert(&self, row: NewImageMetadata) -> Result<()> {
        let url = format!(
            "{}/rest/v1/{}",
            self.config.base_url,
            defaults::METADATA_TABLE
        );

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await
            .map_err(|e| Error::Database(format!("Table insert failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Database(format!(
                "Table insert returned {}: {}",
                status, body
            )));
        }

        tracing::debug!(
            db_table = defaults::METADATA_TABLE,
            "Inserted image metadata row"
        );
        Ok(())
    }
}

/// Database facade exposing the repositories this service uses.
///
/// Mirrors the one-struct entry point pattern: constructed once in `main`,
/// cloned into handlers.
#[derive(Clone)]
pub struct Database {
    pub metadata: Arc<dyn ImageMetadataRepository>,
}

impl Database {
    /// Build the facade around a specific repository implementation.
    pub fn new(metadata: Arc<dyn ImageMetadataRepository>) -> Self {
        Self { metadata }
    }

    /// Build the facade from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Arc::new(SupabaseMetadataRepository::from_env()?)))
    }
}
