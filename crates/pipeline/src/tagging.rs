//! Tag extraction collaborators.

use async_trait::async_trait;
use kokoro_core::tags::{normalize_tags, TAG_CLOUD};

use crate::error::PipelineError;

/// Suggests tags for a prompt or an uploaded image.
#[async_trait]
pub trait TagExtractor: Send + Sync {
    async fn extract_from_prompt(&self, prompt: &str) -> Result<Vec<String>, PipelineError>;

    async fn extract_from_image(&self, image_url: &str) -> Result<Vec<String>, PipelineError>;
}

/// Number of tags the mock "detects" in an image.
const MOCK_IMAGE_TAGS: usize = 4;

/// Heuristic extractor with no model behind it.
///
/// Prompts are split on `,`, `;` and the word `and`; every vocabulary term
/// mentioned anywhere in the prompt is appended. Images get a fixed pick
/// from the vocabulary derived from the URL, so the same image always
/// yields the same tags.
#[derive(Debug, Clone)]
pub struct MockTagExtractor {
    vocabulary: Vec<String>,
}

impl MockTagExtractor {
    pub fn new<I, S>(vocabulary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            vocabulary: vocabulary.into_iter().map(Into::into).collect(),
        }
    }

    fn split_prompt(prompt: &str) -> Vec<String> {
        prompt
            .split([',', ';', '\n'])
            .flat_map(|chunk| chunk.split(" and "))
            .map(|part| part.trim().to_lowercase())
            .filter(|part| !part.is_empty())
            .collect()
    }
}

impl Default for MockTagExtractor {
    fn default() -> Self {
        Self::new(TAG_CLOUD.iter().copied())
    }
}

#[async_trait]
impl TagExtractor for MockTagExtractor {
    async fn extract_from_prompt(&self, prompt: &str) -> Result<Vec<String>, PipelineError> {
        let lowered = prompt.to_lowercase();
        let mentioned = self
            .vocabulary
            .iter()
            .filter(|term| lowered.contains(term.to_lowercase().as_str()))
            .cloned();

        let tags = normalize_tags(Self::split_prompt(prompt).into_iter().chain(mentioned));
        tracing::debug!(count = tags.len(), "Extracted tags from prompt");
        Ok(tags)
    }

    async fn extract_from_image(&self, image_url: &str) -> Result<Vec<String>, PipelineError> {
        if image_url.trim().is_empty() {
            return Err(PipelineError::Rejected("image url must not be empty".to_string()));
        }
        if self.vocabulary.is_empty() {
            return Ok(Vec::new());
        }

        let start = image_url
            .bytes()
            .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(usize::from(b)));
        let len = self.vocabulary.len();
        let picked = (0..MOCK_IMAGE_TAGS.min(len))
            .map(|i| self.vocabulary[(start % len + i) % len].as_str());

        Ok(normalize_tags(picked))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn splits_on_commas_and_conjunctions() {
        let extractor = MockTagExtractor::new(Vec::<String>::new());
        let tags = extractor
            .extract_from_prompt("Smiling, school uniform and cat ears; sunset")
            .await
            .unwrap();
        assert_eq!(tags, vec!["smiling", "school uniform", "cat ears", "sunset"]);
    }

    #[tokio::test]
    async fn vocabulary_terms_are_added_once() {
        let extractor = MockTagExtractor::new(["long hair", "glasses", "kimono"]);
        let tags = extractor
            .extract_from_prompt("a girl with long hair wearing glasses, glasses")
            .await
            .unwrap();
        assert_eq!(
            tags,
            vec!["a girl with long hair wearing glasses", "glasses", "long hair"]
        );
    }

    #[tokio::test]
    async fn image_tags_are_deterministic() {
        let extractor = MockTagExtractor::default();
        let first = extractor.extract_from_image("/uploads/a.png").await.unwrap();
        let second = extractor.extract_from_image("/uploads/a.png").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), MOCK_IMAGE_TAGS);
    }

    #[tokio::test]
    async fn blank_image_url_is_rejected() {
        let result = MockTagExtractor::default().extract_from_image(" ").await;
        assert_matches!(result, Err(PipelineError::Rejected(_)));
    }
}
