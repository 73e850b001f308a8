use axum::routing::post;
use axum::Router;

use crate::handlers::fast_start;
use crate::state::AppState;

/// Routes mounted at `/fast-start`.
///
/// ```text
/// POST   /                  -> start_story
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(fast_start::start_story))
}
