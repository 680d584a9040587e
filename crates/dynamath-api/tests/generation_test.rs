//! Integration tests for the generate and validate routes.

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_generate_gcf_back_for_seed_7() {
    let app = common::build_test_app();

    let (status, json) = common::post_json(
        app,
        "/api/v1/generate",
        &json!({ "templateId": "number_theory/gcf_basic", "seed": 7, "side": "back" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["html"], r#"<div class="q">GCF(77, 56) = <b>7</b></div>"#);
    assert_eq!(json["data"]["answer"], 7);
}

#[tokio::test]
async fn test_generate_defaults_to_front() {
    let app = common::build_test_app();

    let (status, json) = common::post_json(
        app,
        "/api/v1/generate",
        &json!({ "templateId": "arithmetic/long_division", "seed": 3 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let html = json["html"].as_str().unwrap();
    assert!(html.starts_with(r#"<div id="question">"#));
    assert!(!html.contains("answer"));
}

#[tokio::test]
async fn test_generate_honours_config() {
    let app = common::build_test_app();

    let (status, json) = common::post_json(
        app,
        "/api/v1/generate",
        &json!({
            "templateId": "topic/add_two_numbers",
            "seed": 1,
            "side": "back",
            "config": { "min": "9", "max": 9 },
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], json!({ "a": 9, "b": 9, "answer": 18 }));
}

#[tokio::test]
async fn test_generate_unknown_template_returns_404() {
    let app = common::build_test_app();

    let (status, json) = common::post_json(
        app,
        "/api/v1/generate",
        &json!({ "templateId": "nope", "seed": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "unknown_template");
    assert_eq!(json["message"], "unknown template: nope");
}

#[tokio::test]
async fn test_generate_rejects_negative_seed() {
    let app = common::build_test_app();

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/v1/generate")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(
            r#"{"templateId":"topic/add_two_numbers","seed":-1}"#,
        ))
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_validate_returns_report() {
    let app = common::build_test_app();

    let (status, json) = common::post_json(
        app,
        "/api/v1/validate",
        &json!({ "templateId": "number_theory/lcm_basic", "seed": 15 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ok"], true);
}
