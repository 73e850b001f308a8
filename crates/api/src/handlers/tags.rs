//! Handlers for tag vocabularies, autocomplete and extraction.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use kokoro_core::tags::{
    filter_suggestions, normalize_tags, FRAME_TAG_SUGGESTIONS, SHOT_TAGS, TAG_CLOUD,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Vocabularies {
    pub cloud: &'static [&'static str],
    pub frame: &'static [&'static str],
    pub shots: &'static [&'static str],
}

/// GET /api/v1/tags
pub async fn list_vocabularies() -> impl IntoResponse {
    Json(DataResponse {
        data: Vocabularies {
            cloud: TAG_CLOUD,
            frame: FRAME_TAG_SUGGESTIONS,
            shots: SHOT_TAGS,
        },
    })
}

/// Which vocabulary to search.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestScope {
    /// Per-frame tag input: frame suggestions plus shot framings.
    #[default]
    Frame,
    Cloud,
}

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub scope: SuggestScope,
    /// Tags already applied, comma-separated; excluded from the result.
    #[serde(default)]
    pub existing: Option<String>,
}

/// GET /api/v1/tags/suggest
///
/// Case-insensitive substring match. An empty query returns nothing.
pub async fn suggest_tags(Query(params): Query<SuggestParams>) -> impl IntoResponse {
    let existing = normalize_tags(params.existing.as_deref().unwrap_or("").split(','));
    let suggestions = match params.scope {
        SuggestScope::Frame => {
            let vocabulary: Vec<&str> = FRAME_TAG_SUGGESTIONS
                .iter()
                .chain(SHOT_TAGS)
                .copied()
                .collect();
            filter_suggestions(&params.q, &existing, &vocabulary)
        }
        SuggestScope::Cloud => filter_suggestions(&params.q, &existing, TAG_CLOUD),
    };

    Json(DataResponse { data: suggestions })
}

#[derive(Debug, Deserialize)]
pub struct ExtractTagsRequest {
    pub prompt: Option<String>,
    pub image_url: Option<String>,
}

/// POST /api/v1/tags/extract
///
/// Suggested tags from a prompt, an image, or both (prompt tags first).
pub async fn extract_tags(
    State(state): State<AppState>,
    Json(input): Json<ExtractTagsRequest>,
) -> AppResult<impl IntoResponse> {
    let prompt = input.prompt.filter(|p| !p.trim().is_empty());
    let image_url = input.image_url.filter(|u| !u.trim().is_empty());
    let extractor = &state.tag_extractor;

    let tags = match (prompt, image_url) {
        (None, None) => {
            return Err(AppError::BadRequest(
                "prompt or image_url is required".to_string(),
            ))
        }
        (Some(prompt), None) => extractor.extract_from_prompt(&prompt).await?,
        (None, Some(url)) => extractor.extract_from_image(&url).await?,
        (Some(prompt), Some(url)) => {
            let (from_prompt, from_image) = futures::future::try_join(
                extractor.extract_from_prompt(&prompt),
                extractor.extract_from_image(&url),
            )
            .await?;
            normalize_tags(from_prompt.into_iter().chain(from_image))
        }
    };

    tracing::debug!(count = tags.len(), "Tags extracted");

    Ok(Json(DataResponse { data: tags }))
}
