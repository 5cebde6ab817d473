//! Integration tests for API-key authentication.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, test_config};

async fn app_with_auth() -> TestApp {
    let mut config = test_config();
    config.auth.require_auth = true;
    config.auth.api_keys = vec!["test-key-1".to_string(), "test-key-2".to_string()];
    TestApp::with_config(config).await
}

#[tokio::test]
async fn test_request_without_key_is_rejected() {
    let app = app_with_auth().await;

    let response = app.request("GET", "/api/jobs", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "AUTHENTICATION");
}

#[tokio::test]
async fn test_request_with_wrong_key_is_rejected() {
    let app = app_with_auth().await;

    let response = app
        .request("GET", "/api/jobs", None, Some("wrong-key"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_request_with_valid_key_passes() {
    let app = app_with_auth().await;

    let response = app
        .request(
            "POST",
            "/api/jobs",
            Some(json!({ "command": "version" })),
            Some("test-key-2"),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_health_is_exempt_from_auth() {
    let app = app_with_auth().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_auth_disabled_allows_anonymous_requests() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/jobs", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
}
