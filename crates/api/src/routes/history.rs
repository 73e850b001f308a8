//! Route definitions for generation history.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::history;
use crate::state::AppState;

/// Routes mounted at `/history`.
///
/// ```text
/// GET    /                  -> list_history
/// DELETE /{id}              -> delete_record
/// PUT    /{id}/prompt       -> edit_prompt
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(history::list_history))
        .route("/{id}", delete(history::delete_record))
        .route("/{id}/prompt", put(history::edit_prompt))
}
