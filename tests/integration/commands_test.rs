//! Integration tests for the command catalog endpoints.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_list_commands_returns_catalog() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/commands", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let commands = response.body["data"].as_array().unwrap();
    assert!(!commands.is_empty());

    let names: Vec<&str> = commands
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"tell"));
    assert!(names.contains(&"version"));
}

#[tokio::test]
async fn test_get_command_returns_entry() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/commands/tell", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let spec = &response.body["data"];
    assert_eq!(spec["name"], "tell");
    assert!(!spec["description"].as_str().unwrap().is_empty());
    assert_eq!(spec["args"][0]["required"], true);
}

#[tokio::test]
async fn test_get_unknown_command_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/commands/frobnicate", None, None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
