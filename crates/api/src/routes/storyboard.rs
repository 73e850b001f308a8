//! Route definitions for the Image Set storyboard editor.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::storyboard;
use crate::state::AppState;

/// Routes mounted at `/storyboard`.
///
/// ```text
/// GET    /                                              -> get_storyboard
/// POST   /actions                                       -> apply_action
/// POST   /cuts                                          -> add_cut
/// PUT    /cuts/{cut_id}                                 -> edit_cut
/// DELETE /cuts/{cut_id}                                 -> delete_cut
/// POST   /cuts/{cut_id}/frames                          -> add_frame
/// DELETE /cuts/{cut_id}/frames/{frame_id}               -> delete_frame
/// PUT    /cuts/{cut_id}/frames/{frame_id}/selection     -> set_selection
/// PUT    /cuts/{cut_id}/frames/{frame_id}/tags          -> set_tags
/// POST   /cuts/{cut_id}/frames/{frame_id}/tags          -> add_tag
/// POST   /cuts/{cut_id}/frames/{frame_id}/tags/reorder  -> reorder_tag
/// DELETE /cuts/{cut_id}/frames/{frame_id}/tags/{tag}    -> remove_tag
/// POST   /cuts/{cut_id}/frames/{frame_id}/move          -> move_frame
/// POST   /cuts/{cut_id}/frames/{frame_id}/generate      -> generate_frame
/// POST   /generate-all                                  -> generate_all
/// GET    /selection                                     -> get_selection
/// POST   /selection/clear                               -> clear_selection
/// POST   /selection/tags                                -> batch_add_tag
/// POST   /selection/replace-tag                         -> batch_replace_tag
/// POST   /selection/retry                               -> batch_retry
/// POST   /selection/delete                              -> batch_delete
/// ```
pub fn router() -> Router<AppState> {
    let frame = "/cuts/{cut_id}/frames/{frame_id}";

    Router::new()
        .route("/", get(storyboard::get_storyboard))
        .route("/actions", post(storyboard::apply_action))
        .route("/cuts", post(storyboard::add_cut))
        .route(
            "/cuts/{cut_id}",
            put(storyboard::edit_cut).delete(storyboard::delete_cut),
        )
        .route("/cuts/{cut_id}/frames", post(storyboard::add_frame))
        .route(frame, delete(storyboard::delete_frame))
        .route(&format!("{frame}/selection"), put(storyboard::set_selection))
        .route(
            &format!("{frame}/tags"),
            put(storyboard::set_tags).post(storyboard::add_tag),
        )
        .route(&format!("{frame}/tags/reorder"), post(storyboard::reorder_tag))
        .route(&format!("{frame}/tags/{{tag}}"), delete(storyboard::remove_tag))
        .route(&format!("{frame}/move"), post(storyboard::move_frame))
        .route(&format!("{frame}/generate"), post(storyboard::generate_frame))
        .route("/generate-all", post(storyboard::generate_all))
        .route("/selection", get(storyboard::get_selection))
        .route("/selection/clear", post(storyboard::clear_selection))
        .route("/selection/tags", post(storyboard::batch_add_tag))
        .route("/selection/replace-tag", post(storyboard::batch_replace_tag))
        .route("/selection/retry", post(storyboard::batch_retry))
        .route("/selection/delete", post(storyboard::batch_delete))
}
