//! Vision backend trait and the Gemini implementation.

use async_trait::async_trait;
use pictor_core::{defaults, Error, Result};
use serde::{Deserialize, Serialize};

use crate::caption::caption_prompt;

/// Backend for describing images using vision LLMs.
#[async_trait]
pub trait VisionBackend: Send + Sync {
    /// Describe an image, optionally with a custom prompt.
    ///
    /// With no prompt, the fixed captioning prompt is used.
    async fn describe_image(
        &self,
        image_data: &[u8],
        mime_type: &str,
        prompt: Option<&str>,
    ) -> Result<String>;

    /// Check if the vision backend is available.
    async fn health_check(&self) -> Result<bool>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

/// Configuration for the Gemini vision backend.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Base URL for the Generative Language API.
    pub base_url: String,
    /// API key passed as the `key` query parameter.
    pub api_key: String,
    /// Vision model name.
    pub model: String,
}

impl GeminiConfig {
    /// Load configuration from environment variables.
    ///
    /// `GEMINI_API_KEY` is required; `GEMINI_MODEL` and `GEMINI_BASE_URL`
    /// fall back to the defaults.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(defaults::ENV_GEMINI_API_KEY)
            .map_err(|_| Error::Config(format!("{} is not set", defaults::ENV_GEMINI_API_KEY)))?;

        let config = Self {
            base_url: std::env::var(defaults::ENV_GEMINI_BASE_URL)
                .unwrap_or_else(|_| defaults::GEMINI_BASE_URL.to_string()),
            api_key,
            model: std::env::var(defaults::ENV_GEMINI_MODEL)
                .unwrap_or_else(|_| defaults::VISION_MODEL.to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(Error::Config("Gemini api_key cannot be empty".to_string()));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "Gemini base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if self.model.is_empty() {
            return Err(Error::Config("Gemini model cannot be empty".to_string()));
        }

        Ok(())
    }
}

/// Gemini-based vision backend over the `generateContent` endpoint.
pub struct GeminiVisionBackend {
    config: GeminiConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String, // base64 encoded
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenate the text parts of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

impl GeminiVisionBackend {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(GeminiConfig::from_env()?))
    }
}

#[async_trait]
impl VisionBackend for GeminiVisionBackend {
    async fn describe_image(
        &self,
        image_data: &[u8],
        mime_type: &str,
        prompt: Option<&str>,
    ) -> Result<String> {
        use base64::Engine;
        let image_b64 = base64::engine::general_purpose::STANDARD.encode(image_data);

        let default_prompt = caption_prompt();
        let prompt = prompt.unwrap_or(&default_prompt);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        inline_data: Some(InlineData {
                            mime_type: mime_type.to_string(),
                            data: image_b64,
                        }),
                        text: None,
                    },
                    Part {
                        inline_data: None,
                        text: Some(prompt.to_string()),
                    },
                ],
            }],
        };

        // No explicit timeout here: only the image fetch is bounded.
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Inference(format!("Vision request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Inference(format!(
                "Vision API returned {}: {}",
                status, body
            )));
        }

        let result: GenerateContentResponse = response.json().await.map_err(|e| {
            Error::Inference(format!("Failed to parse vision response: {}", e))
        })?;

        let text = result.text();
        tracing::debug!(
            model = %self.config.model,
            response_len = text.len(),
            "Vision model replied"
        );

        if text.is_empty() {
            Ok(defaults::EMPTY_RESPONSE_TEXT.to_string())
        } else {
            Ok(text)
        }
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!(
            "{}/v1beta/models?key={}",
            self.config.base_url, self.config.api_key
        );
        match self
            .client
            .get(&url)
            .timeout(std::time::Duration::from_secs(5))
            .send()
            .await
        {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
