//! Handlers for generation history.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use kokoro_core::chat::ChatMessage;
use kokoro_core::history::{relative_time, HistoryRecord};
use kokoro_core::types::EntityId;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub record: HistoryRecord,
    /// e.g. `"30m ago"`.
    pub age: String,
}

#[derive(Debug, Deserialize)]
pub struct EditPromptRequest {
    pub prompt: String,
    /// Run the edited prompt again right away.
    #[serde(default)]
    pub regenerate: bool,
}

#[derive(Debug, Serialize)]
pub struct EditPromptResult {
    pub record: HistoryRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<ChatMessage>,
}

/// GET /api/v1/history
///
/// Newest first.
pub async fn list_history(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let entries: Vec<HistoryEntry> = state
        .history
        .list()
        .await?
        .into_iter()
        .map(|record| HistoryEntry {
            age: relative_time(record.timestamp, now),
            record,
        })
        .collect();

    Ok(Json(DataResponse { data: entries }))
}

/// DELETE /api/v1/history/{id}
pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    state.history.delete(&id).await?;
    tracing::info!(record_id = %id, "History record deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/history/{id}/prompt
pub async fn edit_prompt(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<EditPromptRequest>,
) -> AppResult<impl IntoResponse> {
    let result = if input.regenerate {
        let (record, reply) = state
            .variation_runner
            .regenerate_from_history(&id, &input.prompt)
            .await?;
        EditPromptResult {
            record,
            reply: Some(reply),
        }
    } else {
        EditPromptResult {
            record: state.history.edit_prompt(&id, &input.prompt).await?,
            reply: None,
        }
    };

    Ok(Json(DataResponse { data: result }))
}
