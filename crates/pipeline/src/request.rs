//! Shapes exchanged with an [`ImageGenerator`](crate::ImageGenerator).

use kokoro_core::chat::GenerationMode;
use kokoro_core::error::CoreError;
use kokoro_core::settings::GenerationSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Subject to preserve (variation) or edit (remix).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_image: Option<String>,
    pub prompt: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub settings: GenerationSettings,
    #[serde(default)]
    pub mode: GenerationMode,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, settings: GenerationSettings) -> Self {
        Self {
            reference_image: None,
            prompt: prompt.into(),
            tags: Vec::new(),
            settings,
            mode: GenerationMode::default(),
        }
    }

    pub fn with_reference(mut self, image: Option<String>) -> Self {
        self.reference_image = image;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    /// A request needs either prompt text or tags, and in-range settings.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.prompt.trim().is_empty() && self.tags.is_empty() {
            return Err(CoreError::Validation(
                "prompt or tags must not be empty".to_string(),
            ));
        }
        self.settings.validate_settings()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOutput {
    pub images: Vec<String>,
}

impl GenerationOutput {
    pub fn first(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
