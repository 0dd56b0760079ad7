//! Behaviour when the database cannot be reached.
//!
//! These tests use a lazy pool pointed at a closed port instead of
//! `#[sqlx::test]`, so no database is required.

mod common;

use std::time::{Duration, Instant};

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use orderdesk_api::error::STORAGE_UNAVAILABLE_MESSAGE;

#[tokio::test]
async fn list_reports_storage_unavailable_before_request_timeout() {
    let pool = common::unreachable_pool(Duration::from_secs(1));
    let app = common::build_test_app(pool);

    let started = Instant::now();
    let response = get(app, "/users").await;

    assert!(started.elapsed() < Duration::from_secs(10));
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "STORAGE_UNAVAILABLE");
    assert_eq!(json["error"], STORAGE_UNAVAILABLE_MESSAGE);
    assert_eq!(json["path"], "/users");
}

#[tokio::test]
async fn create_reports_storage_unavailable() {
    let pool = common::unreachable_pool(Duration::from_secs(1));
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/orders",
        serde_json::json!({"customer_id": 1, "product": "Widget"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "STORAGE_UNAVAILABLE");
    assert_eq!(json["path"], "/orders");
}

#[tokio::test]
async fn validation_still_runs_without_a_database() {
    let pool = common::unreachable_pool(Duration::from_secs(1));
    let app = common::build_test_app(pool);

    let response = post_json(app, "/users", serde_json::json!({"name": ""})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json.get("path").is_none());
}

#[tokio::test]
async fn health_reports_degraded() {
    let pool = common::unreachable_pool(Duration::from_secs(1));
    let response = get(common::build_test_app(pool), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
}

#[tokio::test]
async fn request_timeout_answers_with_json() {
    let pool = common::unreachable_pool(Duration::from_secs(10));
    let mut config = common::test_config();
    config.request_timeout_secs = 1;
    let app = common::build_test_app_with(pool, config);

    let response = get(app, "/users").await;

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "REQUEST_TIMEOUT");
    assert_eq!(json["error"], "Request timed out");
}
