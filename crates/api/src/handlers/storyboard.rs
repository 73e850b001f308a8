//! Handlers for the Image Set storyboard editor.
//!
//! Every mutation is expressed as a [`StoryboardAction`] and goes through
//! [`apply`], which applies it under the write lock, publishes the matching
//! studio event and hands queued frames to the generation dispatcher.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kokoro_core::storyboard::{Cut, FrameRef, Progress, StoryboardAction, StoryboardOutcome};
use kokoro_core::types::EntityId;
use kokoro_events::StudioEvent;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct StoryboardView {
    pub cuts: Vec<Cut>,
    pub progress: Progress,
}

/// Result of a mutation: what changed plus the updated counters.
#[derive(Debug, Serialize)]
pub struct ActionResult {
    pub outcome: StoryboardOutcome,
    pub progress: Progress,
}

#[derive(Debug, Serialize)]
pub struct SelectionView {
    pub frames: Vec<FrameRef>,
    pub count: usize,
    pub toolbar_visible: bool,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct EditCutRequest {
    pub title: Option<String>,
    pub prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub selected: bool,
}

#[derive(Debug, Deserialize)]
pub struct SetTagsRequest {
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct TagRequest {
    pub tag: String,
}

#[derive(Debug, Deserialize)]
pub struct ReorderTagRequest {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceTagRequest {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Deserialize)]
pub struct MoveFrameRequest {
    pub target_cut_id: EntityId,
    pub index: usize,
}

// ---------------------------------------------------------------------------
// Shared apply path
// ---------------------------------------------------------------------------

/// Apply one action, publish its event and dispatch any queued frames.
async fn apply(state: &AppState, action: StoryboardAction) -> AppResult<ActionResult> {
    let event_type = action.event_name();

    let (outcome, progress) = {
        let mut board = state.storyboard.write().await;
        let outcome = board.apply(action)?;
        (outcome, board.progress())
    };

    if let StoryboardOutcome::GenerationQueued { frames } = &outcome {
        let settings = state.variation.read().await.settings.clone();
        state.dispatcher.dispatch(frames.clone(), &settings).await;
    }

    if !matches!(outcome, StoryboardOutcome::Unchanged) {
        state.event_bus.publish(
            StudioEvent::new(event_type)
                .with_payload(serde_json::to_value(&outcome).unwrap_or_default()),
        );
    }

    Ok(ActionResult { outcome, progress })
}

fn applied(result: ActionResult) -> Json<DataResponse<ActionResult>> {
    Json(DataResponse { data: result })
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// GET /api/v1/storyboard
pub async fn get_storyboard(State(state): State<AppState>) -> impl IntoResponse {
    let board = state.storyboard.read().await;
    Json(DataResponse {
        data: StoryboardView {
            cuts: board.cuts().to_vec(),
            progress: board.progress(),
        },
    })
}

/// POST /api/v1/storyboard/actions
///
/// Apply a raw `{ "type": ..., ... }` action.
pub async fn apply_action(
    State(state): State<AppState>,
    Json(action): Json<StoryboardAction>,
) -> AppResult<impl IntoResponse> {
    Ok(applied(apply(&state, action).await?))
}

// ---------------------------------------------------------------------------
// Cuts
// ---------------------------------------------------------------------------

/// POST /api/v1/storyboard/cuts
pub async fn add_cut(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let result = apply(&state, StoryboardAction::AddCut).await?;
    Ok((StatusCode::CREATED, applied(result)))
}

/// PUT /api/v1/storyboard/cuts/{cut_id}
///
/// Update the title, the scene prompt, or both, as one action.
pub async fn edit_cut(
    State(state): State<AppState>,
    Path(cut_id): Path<EntityId>,
    Json(input): Json<EditCutRequest>,
) -> AppResult<impl IntoResponse> {
    if input.title.is_none() && input.prompt.is_none() {
        return Err(AppError::BadRequest(
            "title or prompt is required".to_string(),
        ));
    }

    let action = StoryboardAction::EditCut {
        cut_id,
        title: input.title,
        prompt: input.prompt,
    };
    Ok(applied(apply(&state, action).await?))
}

/// DELETE /api/v1/storyboard/cuts/{cut_id}
///
/// Removes the cut and all its frames.
pub async fn delete_cut(
    State(state): State<AppState>,
    Path(cut_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    Ok(applied(
        apply(&state, StoryboardAction::DeleteCut { cut_id }).await?,
    ))
}

// ---------------------------------------------------------------------------
// Frames
// ---------------------------------------------------------------------------

/// POST /api/v1/storyboard/cuts/{cut_id}/frames
pub async fn add_frame(
    State(state): State<AppState>,
    Path(cut_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let result = apply(&state, StoryboardAction::AddFrame { cut_id }).await?;
    Ok((StatusCode::CREATED, applied(result)))
}

/// DELETE /api/v1/storyboard/cuts/{cut_id}/frames/{frame_id}
pub async fn delete_frame(
    State(state): State<AppState>,
    Path((cut_id, frame_id)): Path<(EntityId, EntityId)>,
) -> AppResult<impl IntoResponse> {
    Ok(applied(
        apply(&state, StoryboardAction::DeleteFrame { cut_id, frame_id }).await?,
    ))
}

/// PUT /api/v1/storyboard/cuts/{cut_id}/frames/{frame_id}/selection
pub async fn set_selection(
    State(state): State<AppState>,
    Path((cut_id, frame_id)): Path<(EntityId, EntityId)>,
    Json(input): Json<SelectionRequest>,
) -> AppResult<impl IntoResponse> {
    let action = StoryboardAction::ToggleSelection {
        cut_id,
        frame_id,
        selected: input.selected,
    };
    Ok(applied(apply(&state, action).await?))
}

/// POST /api/v1/storyboard/cuts/{cut_id}/frames/{frame_id}/move
///
/// Drag-and-drop: move the frame to `index` in `target_cut_id` (clamped).
pub async fn move_frame(
    State(state): State<AppState>,
    Path((cut_id, frame_id)): Path<(EntityId, EntityId)>,
    Json(input): Json<MoveFrameRequest>,
) -> AppResult<impl IntoResponse> {
    let action = StoryboardAction::MoveFrame {
        cut_id,
        frame_id,
        target_cut_id: input.target_cut_id,
        index: input.index,
    };
    Ok(applied(apply(&state, action).await?))
}

/// POST /api/v1/storyboard/cuts/{cut_id}/frames/{frame_id}/generate
///
/// Returns 202: the image arrives asynchronously.
pub async fn generate_frame(
    State(state): State<AppState>,
    Path((cut_id, frame_id)): Path<(EntityId, EntityId)>,
) -> AppResult<impl IntoResponse> {
    let result = apply(&state, StoryboardAction::GenerateFrame { cut_id, frame_id }).await?;
    Ok((StatusCode::ACCEPTED, applied(result)))
}

/// POST /api/v1/storyboard/generate-all
pub async fn generate_all(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let result = apply(&state, StoryboardAction::GenerateAll).await?;
    Ok((StatusCode::ACCEPTED, applied(result)))
}

// ---------------------------------------------------------------------------
// Frame tags
// ---------------------------------------------------------------------------

/// PUT /api/v1/storyboard/cuts/{cut_id}/frames/{frame_id}/tags
///
/// Replace the frame's tags (deduplicated, blanks dropped).
pub async fn set_tags(
    State(state): State<AppState>,
    Path((cut_id, frame_id)): Path<(EntityId, EntityId)>,
    Json(input): Json<SetTagsRequest>,
) -> AppResult<impl IntoResponse> {
    let action = StoryboardAction::SetTags {
        cut_id,
        frame_id,
        tags: input.tags,
    };
    Ok(applied(apply(&state, action).await?))
}

/// POST /api/v1/storyboard/cuts/{cut_id}/frames/{frame_id}/tags
pub async fn add_tag(
    State(state): State<AppState>,
    Path((cut_id, frame_id)): Path<(EntityId, EntityId)>,
    Json(input): Json<TagRequest>,
) -> AppResult<impl IntoResponse> {
    let action = StoryboardAction::AddTag {
        cut_id,
        frame_id,
        tag: input.tag,
    };
    Ok(applied(apply(&state, action).await?))
}

/// POST /api/v1/storyboard/cuts/{cut_id}/frames/{frame_id}/tags/reorder
pub async fn reorder_tag(
    State(state): State<AppState>,
    Path((cut_id, frame_id)): Path<(EntityId, EntityId)>,
    Json(input): Json<ReorderTagRequest>,
) -> AppResult<impl IntoResponse> {
    let action = StoryboardAction::MoveTag {
        cut_id,
        frame_id,
        from: input.from,
        to: input.to,
    };
    Ok(applied(apply(&state, action).await?))
}

/// DELETE /api/v1/storyboard/cuts/{cut_id}/frames/{frame_id}/tags/{tag}
pub async fn remove_tag(
    State(state): State<AppState>,
    Path((cut_id, frame_id, tag)): Path<(EntityId, EntityId, String)>,
) -> AppResult<impl IntoResponse> {
    let action = StoryboardAction::RemoveTag {
        cut_id,
        frame_id,
        tag,
    };
    Ok(applied(apply(&state, action).await?))
}

// ---------------------------------------------------------------------------
// Selection & batch toolbar
// ---------------------------------------------------------------------------

/// GET /api/v1/storyboard/selection
pub async fn get_selection(State(state): State<AppState>) -> impl IntoResponse {
    let board = state.storyboard.read().await;
    let count = board.count_selected();
    Json(DataResponse {
        data: SelectionView {
            frames: board.selected_frame_ids(),
            count,
            toolbar_visible: count > 0,
        },
    })
}

/// POST /api/v1/storyboard/selection/clear
pub async fn clear_selection(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(applied(apply(&state, StoryboardAction::ClearSelection).await?))
}

/// POST /api/v1/storyboard/selection/tags
pub async fn batch_add_tag(
    State(state): State<AppState>,
    Json(input): Json<TagRequest>,
) -> AppResult<impl IntoResponse> {
    Ok(applied(
        apply(&state, StoryboardAction::BatchAddTag { tag: input.tag }).await?,
    ))
}

/// POST /api/v1/storyboard/selection/replace-tag
pub async fn batch_replace_tag(
    State(state): State<AppState>,
    Json(input): Json<ReplaceTagRequest>,
) -> AppResult<impl IntoResponse> {
    let action = StoryboardAction::BatchReplaceTag {
        from: input.from,
        to: input.to,
    };
    Ok(applied(apply(&state, action).await?))
}

/// POST /api/v1/storyboard/selection/retry
///
/// Regenerate every selected frame. The selection is kept.
pub async fn batch_retry(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let result = apply(&state, StoryboardAction::BatchRetry).await?;
    Ok((StatusCode::ACCEPTED, applied(result)))
}

/// POST /api/v1/storyboard/selection/delete
pub async fn batch_delete(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(applied(apply(&state, StoryboardAction::BatchDelete).await?))
}
