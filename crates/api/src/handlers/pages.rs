//! Handlers for page metadata and the dice prompt.

use axum::response::IntoResponse;
use axum::Json;
use kokoro_core::pages::Page;
use kokoro_core::prompts::random_story_prompt;
use serde::Serialize;

use crate::response::DataResponse;

#[derive(Debug, Serialize)]
pub struct PageInfo {
    pub page: Page,
    pub path: &'static str,
    pub title: &'static str,
}

/// GET /api/v1/pages
pub async fn list_pages() -> impl IntoResponse {
    let pages: Vec<PageInfo> = Page::ALL
        .into_iter()
        .map(|page| PageInfo {
            page,
            path: page.path(),
            title: page.title(),
        })
        .collect();

    Json(DataResponse { data: pages })
}

#[derive(Debug, Serialize)]
pub struct RandomPrompt {
    pub prompt: &'static str,
}

/// GET /api/v1/prompts/random
///
/// One of the canned story ideas behind the dice button.
pub async fn random_prompt() -> impl IntoResponse {
    Json(DataResponse {
        data: RandomPrompt {
            prompt: random_story_prompt(),
        },
    })
}
