//! Route definitions for page metadata and the dice prompt.

use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Routes mounted at `/pages`.
///
/// ```text
/// GET    /                  -> list_pages
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(pages::list_pages))
}

/// Routes mounted at `/prompts`.
///
/// ```text
/// GET    /random            -> random_prompt
/// ```
pub fn prompts_router() -> Router<AppState> {
    Router::new().route("/random", get(pages::random_prompt))
}
