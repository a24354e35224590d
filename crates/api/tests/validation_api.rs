//! Integration tests for request body validation.
//!
//! All rejections happen before the handler queries the database.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, get_auth, send_json, token_for};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: unknown rating category returns 400 INVALID_CATEGORY
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_rating_category_returns_400() {
    let app = common::build_test_app(common::lazy_pool());
    let token = token_for(2, "carol", &["clipteam"]);
    let response = send_json(
        app,
        Method::POST,
        "/api/v1/clips/1/rating",
        json!({ "category": "5" }),
        Some(&token),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_CATEGORY");
}

// ---------------------------------------------------------------------------
// Test: public vote direction must be "up" or "down"
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sideways_vote_returns_400() {
    let app = common::build_test_app(common::lazy_pool());
    let response = send_json(
        app,
        Method::POST,
        "/api/v1/clips/1/vote",
        json!({ "vote": "sideways" }),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: deny threshold below 1 is rejected, never clamped
// ---------------------------------------------------------------------------

#[tokio::test]
async fn zero_deny_threshold_returns_400() {
    let app = common::build_test_app(common::lazy_pool());
    let token = token_for(4, "root", &["admin"]);
    let response = send_json(
        app,
        Method::PUT,
        "/api/v1/config/moderation",
        json!({ "denyThreshold": 0 }),
        Some(&token),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_CONFIG");
}

// ---------------------------------------------------------------------------
// Test: batch tally ids must be well-formed and non-empty
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_tally_ids_return_400() {
    let app = common::build_test_app(common::lazy_pool());
    let token = token_for(2, "carol", &["clipteam"]);
    let response = get_auth(app, "/api/v1/ratings?ids=1,abc,3", &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_tally_ids_return_400() {
    let app = common::build_test_app(common::lazy_pool());
    let token = token_for(2, "carol", &["clipteam"]);
    let response = get_auth(app, "/api/v1/ratings?ids=,", &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: archive creation validates the season label
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_archive_season_returns_400() {
    let app = common::build_test_app(common::lazy_pool());
    let token = token_for(4, "root", &["admin"]);
    let response = send_json(
        app,
        Method::POST,
        "/api/v1/archives",
        json!({
            "season": "Monsoon",
            "year": 2026,
            "name": "2026-monsoon-clips.zip",
            "fileUrl": "https://storage.example/2026-monsoon-clips.zip",
            "size": 1024,
            "clipAmount": 10,
        }),
        Some(&token),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}
