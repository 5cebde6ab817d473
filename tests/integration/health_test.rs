//! Integration test for the health endpoint.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_reports_ok() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert!(
        !response.body["data"]["version"]
            .as_str()
            .unwrap()
            .is_empty()
    );
}
