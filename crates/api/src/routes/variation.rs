//! Route definitions for the Variation/Remix chat.

use axum::routing::get;
use axum::Router;

use crate::handlers::variation;
use crate::state::AppState;

/// Routes mounted at `/variation`.
///
/// ```text
/// GET    /messages          -> list_messages
/// POST   /messages          -> send_prompt
/// GET    /settings          -> get_settings
/// PUT    /settings          -> update_settings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/messages",
            get(variation::list_messages).post(variation::send_prompt),
        )
        .route(
            "/settings",
            get(variation::get_settings).put(variation::update_settings),
        )
}
