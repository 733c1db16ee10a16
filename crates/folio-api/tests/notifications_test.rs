//! Integration tests for the notifications routes.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use folio_store::MemoryStore;
use folio_test_support::FailingStore;

#[tokio::test]
async fn test_list_is_empty_initially() {
    let (_state, app) = common::build_test_app(Arc::new(MemoryStore::new()));

    let (status, json) = common::get_json(app, "/api/v1/notifications").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn test_failed_submission_is_reported_then_dismissed() {
    let (state, app) = common::build_test_app(Arc::new(FailingStore));

    // POST /api/v1/testimonials against a store that rejects writes
    let (status, json) = common::post_json(
        app,
        "/api/v1/testimonials",
        &serde_json::json!({ "author": "Ana", "role": "Eng", "rating": 4, "text": "great" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "store_write_error");

    // GET /api/v1/notifications
    let app = folio_api::routes::app(state.clone());
    let (status, json) = common::get_json(app, "/api/v1/notifications").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["kind"], "error");
    assert_eq!(
        json[0]["message"],
        "Error submitting review. Please try again."
    );
    let id = json[0]["id"].as_str().unwrap().to_owned();

    // DELETE /api/v1/notifications/{id}
    let app = folio_api::routes::app(state.clone());
    let status = common::delete(app, &format!("/api/v1/notifications/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let app = folio_api::routes::app(state.clone());
    let (_, json) = common::get_json(app, "/api/v1/notifications").await;
    assert_eq!(json, serde_json::json!([]));

    // A second dismissal finds nothing.
    let app = folio_api::routes::app(state);
    let status = common::delete(app, &format!("/api/v1/notifications/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
