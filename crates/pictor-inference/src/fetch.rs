//! Image fetching by caller-supplied URL.

use pictor_core::{defaults, Error, Result};
use std::time::Duration;

/// Image bytes plus the MIME type reported by the serving host.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Fetches image bytes over HTTP with a bounded wait.
///
/// The fetch is the only bounded step in the request path; the MIME type is
/// taken from the response Content-Type header, defaulting to `image/jpeg`
/// when absent.
pub struct ImageFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl ImageFetcher {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(defaults::IMAGE_FETCH_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    /// Fetch the image bytes behind `url`.
    pub async fn fetch(&self, url: &str) -> Result<FetchedImage> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Error::Request(format!("Image fetch failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Request(format!(
                "Image fetch returned {} for {}",
                response.status(),
                url
            )));
        }

        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(defaults::FALLBACK_IMAGE_MIME)
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Request(format!("Image fetch failed: {}", e)))?;

        tracing::debug!(
            mime_type = %mime_type,
            size_bytes = bytes.len(),
            "Fetched image"
        );

        Ok(FetchedImage {
            bytes: bytes.to_vec(),
            mime_type,
        })
    }
}

impl Default for ImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}
