use axum::routing::get;
use axum::Router;

use crate::handlers::activity;
use crate::state::AppState;

/// Routes mounted at `/activity`.
///
/// ```text
/// GET    /                  -> recent_activity
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(activity::recent_activity))
}
