//! Analysis orchestration: fetch the image, ask the vision model about it.

use std::sync::Arc;

use pictor_core::Result;

use crate::fetch::ImageFetcher;
use crate::vision::VisionBackend;

/// Orchestrates image fetch and vision inference for one request.
///
/// `analyze` never fails: any error in fetch or inference is converted to
/// the textual stand-in `"Processing failed: <message>"`, which then flows
/// through the caption parser like any other model output. Callers that
/// need to distinguish real output from the stand-in must inspect the text;
/// the failure itself is logged at WARN.
pub struct ImageAnalyzer {
    backend: Arc<dyn VisionBackend>,
    fetcher: ImageFetcher,
}

impl ImageAnalyzer {
    /// Create a new analyzer with the default fetcher.
    pub fn new(backend: Arc<dyn VisionBackend>) -> Self {
        Self::with_fetcher(backend, ImageFetcher::new())
    }

    /// Create a new analyzer with a specific fetcher.
    pub fn with_fetcher(backend: Arc<dyn VisionBackend>, fetcher: ImageFetcher) -> Self {
        Self { backend, fetcher }
    }

    /// Fetch the image behind `image_url` and return the model's raw reply.
    pub async fn analyze(&self, image_url: &str) -> String {
        match self.try_analyze(image_url).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    image_url = %image_url,
                    error = %e,
                    "Image analysis failed, substituting stand-in text"
                );
                format!("{}{}", pictor_core::defaults::FAILURE_TEXT_PREFIX, e)
            }
        }
    }

    async fn try_analyze(&self, image_url: &str) -> Result<String> {
        let image = self.fetcher.fetch(image_url).await?;
        self.backend
            .describe_image(&image.bytes, &image.mime_type, None)
            .await
    }

    /// Model name of the underlying backend.
    pub fn model_name(&self) -> &str {
        self.backend.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct MockVisionBackend {
        description: String,
    }

    #[async_trait]
    impl VisionBackend for MockVisionBackend {
        async fn describe_image(
            &self,
            _image_data: &[u8],
            _mime_type: &str,
            _prompt: Option<&str>,
        ) -> Result<String> {
            Ok(self.description.clone())
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn model_name(&self) -> &str {
            "test-vision-model"
        }
    }

    #[test]
    fn test_model_name_passthrough() {
        let analyzer = ImageAnalyzer::new(Arc::new(MockVisionBackend {
            description: "unused".to_string(),
        }));
        assert_eq!(analyzer.model_name(), "test-vision-model");
    }

    #[tokio::test]
    async fn test_unreachable_url_becomes_stand_in_text() {
        let analyzer = ImageAnalyzer::new(Arc::new(MockVisionBackend {
            description: "never reached".to_string(),
        }));

        // Nothing listens on loopback port 1; the connection is refused fast.
        let raw = analyzer.analyze("http://127.0.0.1:1/image.png").await;
        assert!(
            raw.starts_with("Processing failed: "),
            "expected stand-in text, got: {}",
            raw
        );
    }
}
