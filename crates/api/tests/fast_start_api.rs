mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use serde_json::json;

#[tokio::test]
async fn story_replaces_board_and_generates_key_frames() {
    let (app, state) = common::build_test_app();

    let response = post_json(
        app.clone(),
        "/api/v1/fast-start",
        json!({
            "story": "A shy girl finds a lost kitten after school",
            "cut_count": 3,
            "frame_count": 4,
            "long_shot": true,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["queued"], 3);
    assert_eq!(json["data"]["storyboard"]["progress"]["total"], 12);
    let cuts = json["data"]["storyboard"]["cuts"].as_array().unwrap();
    assert_eq!(cuts[0]["title"], "Cut 1");
    assert_eq!(cuts[0]["prompt"], "A shy girl finds a lost kitten after school");
    assert_eq!(cuts[0]["frames"][0]["is_generating"], true);
    assert_eq!(cuts[0]["frames"][1]["tags"], json!(["wide shot"]));

    state.dispatcher.wait_idle().await;

    let board = body_json(get(app, "/api/v1/storyboard").await).await;
    assert_eq!(board["data"]["progress"]["generated"], 3);
    for cut in board["data"]["cuts"].as_array().unwrap() {
        assert_eq!(cut["frames"][0]["is_generated"], true);
        assert_eq!(cut["frames"][1]["is_generated"], false);
    }
}

#[tokio::test]
async fn defaults_apply_when_counts_omitted() {
    let (app, state) = common::build_test_app();
    let json = body_json(
        post_json(app, "/api/v1/fast-start", json!({ "story": "Festival night" })).await,
    )
    .await;

    assert_eq!(json["data"]["queued"], 4);
    assert_eq!(json["data"]["storyboard"]["progress"]["total"], 32);
    state.dispatcher.wait_idle().await;
}

#[tokio::test]
async fn invalid_requests_keep_current_board() {
    let (app, _state) = common::build_test_app();
    let before = body_json(get(app.clone(), "/api/v1/storyboard").await).await;

    for body in [
        json!({ "story": "   " }),
        json!({ "story": "Rainy day", "frame_count": 5 }),
        json!({ "story": "Rainy day", "cut_count": 13 }),
        json!({ "story": "Rainy day", "frame_count": 18 }),
    ] {
        let response = post_json(app.clone(), "/api/v1/fast-start", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    let after = body_json(get(app, "/api/v1/storyboard").await).await;
    assert_eq!(before, after);
}
