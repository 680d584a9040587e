//! Integration tests for the template registry routes.

mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_list_templates_returns_every_builtin_sorted() {
    let app = common::build_test_app();

    let (status, json) = common::get_json(app, "/api/v1/templates").await;

    assert_eq!(status, StatusCode::OK);
    let templates = json.as_array().unwrap();
    assert_eq!(templates.len(), 9);
    let ids: Vec<&str> = templates
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
    assert!(templates.iter().all(|t| t["title"].is_string()));
}

#[tokio::test]
async fn test_get_template_by_nested_id() {
    let app = common::build_test_app();

    let (status, json) = common::get_json(app, "/api/v1/templates/arithmetic/long_division").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], "arithmetic/long_division");
    assert_eq!(json["defaults"]["maxDivisor"], 99);
    assert_eq!(json["fieldBindings"][0]["field"], "Max");
    assert_eq!(json["fieldBindings"][0]["configKey"], "maxDivisor");
}

#[tokio::test]
async fn test_get_unknown_template_returns_404() {
    let app = common::build_test_app();

    let (status, json) = common::get_json(app, "/api/v1/templates/nope/nothing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "unknown_template");
}
