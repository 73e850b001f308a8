pub mod activity;
pub mod fast_start;
pub mod health;
pub mod history;
pub mod pages;
pub mod storyboard;
pub mod tags;
pub mod variation;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /pages                                           page-to-path mapping
/// /prompts/random                                  dice prompt
///
/// /tags                                            vocabularies
/// /tags/suggest                                    autocomplete (?q=)
/// /tags/extract                                    tags from prompt or image (POST)
///
/// /storyboard                                      full board + progress
/// /storyboard/actions                              apply a raw action (POST)
/// /storyboard/cuts                                 add cut (POST)
/// /storyboard/cuts/{cut_id}                        edit (PUT), delete
/// /storyboard/cuts/{cut_id}/frames                 add frame (POST)
/// /storyboard/cuts/{cut_id}/frames/{frame_id}      delete
///     .../selection                                select/deselect (PUT)
///     .../tags                                     replace (PUT), add (POST)
///     .../tags/reorder                             drag reorder (POST)
///     .../tags/{tag}                               remove (DELETE)
///     .../move                                     drag to cut/index (POST)
///     .../generate                                 generate one frame (POST)
/// /storyboard/generate-all                         generate ungenerated frames (POST)
/// /storyboard/selection                            selected frames
/// /storyboard/selection/clear                      clear (POST)
/// /storyboard/selection/tags                       add tag to selection (POST)
/// /storyboard/selection/replace-tag                replace tag in selection (POST)
/// /storyboard/selection/retry                      regenerate selection (POST)
/// /storyboard/selection/delete                     delete selection (POST)
///
/// /variation/messages                              chat log, send prompt (POST)
/// /variation/settings                              get, update (PUT)
///
/// /history                                         list
/// /history/{id}                                    delete
/// /history/{id}/prompt                             edit prompt, optionally regenerate (PUT)
///
/// /fast-start                                      story to storyboard (POST)
/// /activity                                        recent studio events
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/pages", pages::router())
        .nest("/prompts", pages::prompts_router())
        .nest("/tags", tags::router())
        .nest("/storyboard", storyboard::router())
        .nest("/variation", variation::router())
        .nest("/history", history::router())
        .nest("/fast-start", fast_start::router())
        .nest("/activity", activity::router())
}
