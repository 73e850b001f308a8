//! Image generation collaborators.
//!
//! [`MockImageGenerator`] stands in for the model: it waits a fixed delay
//! and returns placeholder URLs. [`HttpImageGenerator`] forwards requests
//! to an external backend over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::PipelineError;
use crate::request::{GenerationOutput, GenerationRequest};

/// Anything that can turn a [`GenerationRequest`] into images.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate `request.settings.quantity` images.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput, PipelineError>;
}

// ---------------------------------------------------------------------------
// Mock
// ---------------------------------------------------------------------------

/// Default simulated generation latency.
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(2000);

/// Placeholder image host used by the mock.
pub const DEFAULT_PLACEHOLDER_BASE: &str = "https://picsum.photos";

/// Fixed-delay generator returning placeholder image URLs.
#[derive(Debug, Clone)]
pub struct MockImageGenerator {
    delay: Duration,
    placeholder_base: String,
}

impl MockImageGenerator {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            placeholder_base: DEFAULT_PLACEHOLDER_BASE.to_string(),
        }
    }

    /// No delay; for tests.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn with_placeholder_base(mut self, base: impl Into<String>) -> Self {
        self.placeholder_base = base.into();
        self
    }
}

impl Default for MockImageGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MOCK_DELAY)
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput, PipelineError> {
        request.validate()?;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let (width, height) = request.settings.size.dimensions();
        let seed = request.settings.effective_seed();
        let images = (0..i64::from(request.settings.quantity))
            .map(|i| {
                format!(
                    "{}/{width}/{height}?random={}",
                    self.placeholder_base,
                    seed.wrapping_add(i)
                )
            })
            .collect();

        tracing::debug!(
            quantity = request.settings.quantity,
            mode = ?request.mode,
            seed,
            "Mock generation complete",
        );
        Ok(GenerationOutput { images })
    }
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

/// Body sent to `POST {base}/generate`. The seed is resolved client-side so
/// the stored history can reproduce a "random" run.
#[derive(Debug, Serialize)]
struct HttpGenerateBody<'a> {
    #[serde(flatten)]
    request: &'a GenerationRequest,
    seed: i64,
}

/// Generator backed by an external HTTP service.
pub struct HttpImageGenerator {
    client: reqwest::Client,
    base_url: String,
}

impl HttpImageGenerator {
    /// * `base_url` - e.g. `http://gen-host:8188`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Reuse an existing [`reqwest::Client`] (shared connection pool).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Deserialize a success body, or turn a non-2xx status into
    /// [`PipelineError::Upstream`].
    async fn parse_response(response: reqwest::Response) -> Result<GenerationOutput, PipelineError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        let output: GenerationOutput = response.json().await?;
        if output.images.is_empty() {
            return Err(PipelineError::Rejected(
                "backend returned no images".to_string(),
            ));
        }
        Ok(output)
    }
}

#[async_trait]
impl ImageGenerator for HttpImageGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput, PipelineError> {
        request.validate()?;

        let body = HttpGenerateBody {
            request,
            seed: request.settings.effective_seed(),
        };
        let response = self
            .client
            .post(format!("{}/generate", self.base_url))
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use kokoro_core::error::CoreError;
    use kokoro_core::settings::{GenerationSettings, ImageSize};

    use super::*;

    #[tokio::test]
    async fn mock_returns_quantity_images_at_size() {
        let settings = GenerationSettings {
            quantity: 3,
            size: ImageSize::Portrait,
            seed: 10,
            ..GenerationSettings::default()
        };
        let output = MockImageGenerator::instant()
            .with_placeholder_base("/mock")
            .generate(&GenerationRequest::new("silver hair", settings))
            .await
            .unwrap();

        assert_eq!(
            output.images,
            vec![
                "/mock/768/1024?random=10",
                "/mock/768/1024?random=11",
                "/mock/768/1024?random=12",
            ]
        );
    }

    #[tokio::test]
    async fn mock_rejects_empty_prompt() {
        let result = MockImageGenerator::instant()
            .generate(&GenerationRequest::new("", GenerationSettings::default()))
            .await;
        assert_matches!(result, Err(PipelineError::Core(CoreError::Validation(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn mock_waits_for_its_delay() {
        let generator = MockImageGenerator::new(Duration::from_secs(3));
        let started = tokio::time::Instant::now();
        generator
            .generate(&GenerationRequest::new("x", GenerationSettings::default()))
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_secs(3));
    }

    #[test]
    fn http_generator_trims_trailing_slash() {
        assert_eq!(HttpImageGenerator::new("http://gen:8188/").base_url(), "http://gen:8188");
    }

    #[test]
    fn http_body_flattens_request_with_seed() {
        let request = GenerationRequest::new("x", GenerationSettings::default());
        let body = serde_json::to_value(HttpGenerateBody {
            request: &request,
            seed: 7,
        })
        .unwrap();
        assert_eq!(body["prompt"], "x");
        assert_eq!(body["seed"], 7);
        assert_eq!(body["settings"]["size"], "1024x1024");
    }
}
