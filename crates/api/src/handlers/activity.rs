use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use kokoro_events::activity::DEFAULT_RETAINED;
use serde::Deserialize;

use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
pub struct ActivityParams {
    pub limit: Option<usize>,
}

/// GET /api/v1/activity
///
/// Recent studio events, newest first.
pub async fn recent_activity(
    State(state): State<AppState>,
    Query(params): Query<ActivityParams>,
) -> impl IntoResponse {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_LIMIT)
        .clamp(1, DEFAULT_RETAINED);
    let events = state.activity.recent(limit).await;

    Json(DataResponse { data: events })
}
