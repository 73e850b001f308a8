//! Handlers for the Variation/Remix chat and its settings panel.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kokoro_core::chat::GenerationMode;
use kokoro_core::settings::GenerationSettings;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendPromptRequest {
    pub prompt: String,
    #[serde(default)]
    pub mode: GenerationMode,
    /// Reference image; defaults to the latest image in the session.
    pub image: Option<String>,
}

/// GET /api/v1/variation/messages
pub async fn list_messages(State(state): State<AppState>) -> impl IntoResponse {
    let messages = state.variation.read().await.log.messages().to_vec();
    Json(DataResponse { data: messages })
}

/// POST /api/v1/variation/messages
///
/// Send a prompt and wait for the generated reply. A blank prompt is a 400;
/// a generator failure is a 502 and leaves the prompt in the log.
pub async fn send_prompt(
    State(state): State<AppState>,
    Json(input): Json<SendPromptRequest>,
) -> AppResult<impl IntoResponse> {
    let reply = state
        .variation_runner
        .submit(&input.prompt, input.mode, input.image)
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: reply })))
}

/// GET /api/v1/variation/settings
pub async fn get_settings(State(state): State<AppState>) -> impl IntoResponse {
    let settings = state.variation.read().await.settings.clone();
    Json(DataResponse { data: settings })
}

/// PUT /api/v1/variation/settings
///
/// Out-of-range values are rejected; the current settings stay in place.
pub async fn update_settings(
    State(state): State<AppState>,
    Json(input): Json<GenerationSettings>,
) -> AppResult<impl IntoResponse> {
    let mut session = state.variation.write().await;
    session.update_settings(input)?;
    tracing::info!(settings = ?session.settings, "Generation settings updated");

    Ok(Json(DataResponse {
        data: session.settings.clone(),
    }))
}
