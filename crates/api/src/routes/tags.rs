//! Route definitions for tag vocabularies, suggestions and extraction.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tags;
use crate::state::AppState;

/// Routes mounted at `/tags`.
///
/// ```text
/// GET    /                  -> list_vocabularies
/// GET    /suggest           -> suggest_tags
/// POST   /extract           -> extract_tags
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tags::list_vocabularies))
        .route("/suggest", get(tags::suggest_tags))
        .route("/extract", post(tags::extract_tags))
}
