//! Handler for Fast Start: a one-line story becomes the working storyboard.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kokoro_core::fast_start::FastStartRequest;
use kokoro_events::StudioEvent;
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::storyboard::StoryboardView;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FastStartResult {
    pub storyboard: StoryboardView,
    /// Key frames sent to the generator, one per cut.
    pub queued: usize,
}

/// POST /api/v1/fast-start
///
/// Replaces the current storyboard and starts generating one key image per
/// cut. Invalid requests leave the current storyboard untouched.
pub async fn start_story(
    State(state): State<AppState>,
    Json(input): Json<FastStartRequest>,
) -> AppResult<impl IntoResponse> {
    let mut board = input.build_storyboard()?;
    let queued = board.queue_key_frames();

    let view = StoryboardView {
        cuts: board.cuts().to_vec(),
        progress: board.progress(),
    };
    *state.storyboard.write().await = board;

    let settings = state.variation.read().await.settings.clone();
    let dispatched = state.dispatcher.dispatch(queued, &settings).await;

    tracing::info!(
        cuts = input.cut_count,
        frames_per_cut = input.frame_count,
        dispatched,
        "Fast start storyboard created",
    );
    state.event_bus.publish(
        StudioEvent::new("fast_start.created").with_payload(serde_json::json!({
            "cuts": input.cut_count,
            "frames_per_cut": input.frame_count,
            "long_shot": input.long_shot,
        })),
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: FastStartResult {
                storyboard: view,
                queued: dispatched,
            },
        }),
    ))
}
