//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::TimeZone;
use dynamath_core::seed::ReviewSeedResolver;
use dynamath_core::storage::{SeedStore, SelectedStore, StorageTier};
use dynamath_test_support::{FixedClock, FixedSalt, RecordingSeedStore};
use http_body_util::BodyExt;
use tower::ServiceExt;

use dynamath_api::router;
use dynamath_api::state::AppState;

/// Fixed clock used across all integration tests.
fn fixed_clock() -> FixedClock {
    FixedClock(
        chrono::Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        500,
    )
}

/// Build the full app router over `store` with a pinned clock and salt.
/// Uses the same route structure as `main.rs`.
pub fn build_test_app_with_store(store: Arc<dyn SeedStore>) -> Router {
    let resolver = ReviewSeedResolver::new(
        SelectedStore {
            tier: StorageTier::Memory,
            store,
        },
        Arc::new(fixed_clock()),
        Arc::new(FixedSalt(Some(7))),
    );
    router().with_state(AppState::with_builtin_templates(resolver).unwrap())
}

/// Build the full app router over a fresh recording store.
pub fn build_test_app() -> Router {
    build_test_app_with_store(Arc::new(RecordingSeedStore::new()))
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    read_json(response).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    read_json(response).await
}

async fn read_json(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
    (status, json)
}
