//! Integration tests for clip listing query validation and gating.
//!
//! Each request is rejected during parameter validation, before any
//! database round trip.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, token_for};

// ---------------------------------------------------------------------------
// Test: score sorts are gated behind team roles
// ---------------------------------------------------------------------------

#[tokio::test]
async fn anonymous_cannot_sort_by_score() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get(app, "/api/v1/clips?sort=highestScore").await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn plain_user_cannot_sort_by_score() {
    let app = common::build_test_app(common::lazy_pool());
    let token = token_for(1, "dave", &["user"]);
    let response = get_auth(app, "/api/v1/clips?sort=lowestScore", &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Test: denied visibility and unrated filtering are team-only
// ---------------------------------------------------------------------------

#[tokio::test]
async fn anonymous_cannot_include_denied() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get(app, "/api/v1/clips?includeDenied=true").await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn anonymous_cannot_filter_unrated() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get(app, "/api/v1/clips?unratedOnly=true").await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Test: unknown sort keys are rejected during deserialization
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_sort_key_returns_400() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get(app, "/api/v1/clips?sort=bogus").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: an invalid token on the public listing is still rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_token_on_public_listing_returns_401() {
    let app = common::build_test_app(common::lazy_pool());
    let response = get_auth(app, "/api/v1/clips", "expired-or-garbage").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
