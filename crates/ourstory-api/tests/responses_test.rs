//! Integration tests for recording responses and tracking them.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../migrations")]
async fn test_record_then_track_responses(pool: PgPool) {
    // Step 1: share a story
    let (status, _) = common::post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/stories",
        &json!({ "partnerName": "Maya", "passcode": "2580", "customId": "maya" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Step 2: record an answer against it
    let (status, json) = common::post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/responses",
        &json!({ "storyId": "maya", "name": "Maya", "kind": "cinematic" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["response"], "YES - Grow Old With Me (Cinematic)");

    // Step 3: track with the passcode
    let (status, json) = common::post_json(
        common::build_test_app(pool),
        "/api/v1/track",
        &json!({ "linkOrId": "https://ourstory.example/?id=maya", "passcode": "2580" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["partner_name"], "Maya");
    let responses = json["responses"].as_array().unwrap();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["name"], "Maya");
    assert_eq!(responses[0]["story_id"], "maya");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_track_with_wrong_passcode_returns_401(pool: PgPool) {
    common::post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/stories",
        &json!({ "partnerName": "Maya", "passcode": "2580", "customId": "maya" }),
    )
    .await;

    let (status, json) = common::post_json(
        common::build_test_app(pool),
        "/api/v1/track",
        &json!({ "linkOrId": "maya", "passcode": "0000" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Incorrect passcode.");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_responses_includes_anonymous_answers(pool: PgPool) {
    common::post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/responses",
        &json!({ "name": "  ", "kind": "valentine" }),
    )
    .await;

    let (status, json) =
        common::get_json(common::build_test_app(pool), "/api/v1/responses").await;

    assert_eq!(status, StatusCode::OK);
    let listed = json.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["name"], "Anonymous");
    assert!(listed[0]["story_id"].is_null());
}
