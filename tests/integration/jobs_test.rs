//! Integration tests for the job lifecycle endpoints.

use std::sync::atomic::Ordering;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_create_job_returns_pending_and_completes() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/jobs",
            Some(json!({ "command": "version" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    let job = &response.body["data"];
    assert_eq!(job["status"], "pending");
    assert_eq!(job["command"], "version");
    assert!(job["id"].as_str().is_some());
    assert!(job.get("completed_at").is_none());

    let id = job["id"].as_str().unwrap().to_string();
    let done = app.wait_for_status(&id, "completed").await;
    assert_eq!(done["output"], "1.2.3");
    assert_eq!(done["exit_code"], 0);
    assert!(done["completed_at"].as_str().is_some());
    assert!(done["started_at"].as_str().is_some());
}

#[tokio::test]
async fn test_create_rejects_unknown_command() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/jobs",
            Some(json!({ "command": "frobnicate" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");

    let list = app.request("GET", "/api/jobs", None, None).await;
    assert_eq!(list.body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_rejects_missing_required_arg() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/api/jobs", Some(json!({ "command": "tell" })), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .contains("requires")
    );
}

#[tokio::test]
async fn test_get_unknown_job_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", &format!("/api/jobs/{}", Uuid::new_v4()), None, None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_get_malformed_id_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/jobs/not-a-uuid", None, None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_metadata_round_trips() {
    let app = TestApp::new().await;

    let id = app
        .create_job(json!({
            "command": "version",
            "metadata": { "ticket": "OPS-17", "attempt": 2 }
        }))
        .await;

    let done = app.wait_for_status(&id, "completed").await;
    assert_eq!(done["metadata"]["ticket"], "OPS-17");
    assert_eq!(done["metadata"]["attempt"], 2);
}

#[tokio::test]
async fn test_list_jobs_filters_by_status() {
    let app = TestApp::new().await;

    let done_id = app.create_job(json!({ "command": "version" })).await;
    app.wait_for_status(&done_id, "completed").await;

    let running_id = app
        .create_job(json!({ "command": "tell", "args": ["do things"] }))
        .await;
    app.wait_for_status(&running_id, "running").await;

    let completed = app
        .request("GET", "/api/jobs?status=completed", None, None)
        .await;
    let items = completed.body["data"].as_array().unwrap().clone();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], done_id.as_str());

    let running = app
        .request("GET", "/api/jobs?status=running", None, None)
        .await;
    let items = running.body["data"].as_array().unwrap().clone();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], running_id.as_str());

    let limited = app.request("GET", "/api/jobs?limit=1", None, None).await;
    assert_eq!(limited.body["data"].as_array().unwrap().len(), 1);

    app.request(
        "POST",
        &format!("/api/jobs/{running_id}/cancel"),
        None,
        None,
    )
    .await;
}

#[tokio::test]
async fn test_cancel_running_job() {
    let app = TestApp::new().await;

    let id = app
        .create_job(json!({ "command": "tell", "args": ["long prompt"] }))
        .await;
    app.wait_for_status(&id, "running").await;

    let response = app
        .request("POST", &format!("/api/jobs/{id}/cancel"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "cancelled");

    let job = app.wait_for_status(&id, "cancelled").await;
    assert!(job["completed_at"].as_str().is_some());

    let again = app
        .request("POST", &format!("/api/jobs/{id}/cancel"), None, None)
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_cancel_pending_job_never_executes() {
    let app = TestApp::new().await;

    // Occupy both concurrency slots.
    let first = app
        .create_job(json!({ "command": "tell", "args": ["one"] }))
        .await;
    let second = app
        .create_job(json!({ "command": "tell", "args": ["two"] }))
        .await;
    app.wait_for_status(&first, "running").await;
    app.wait_for_status(&second, "running").await;

    let waiting = app
        .create_job(json!({ "command": "tell", "args": ["three"] }))
        .await;

    let response = app
        .request("POST", &format!("/api/jobs/{waiting}/cancel"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let job = &response.body["data"];
    assert_eq!(job["status"], "cancelled");
    assert!(job.get("started_at").is_none());

    // Free the slots; the cancelled job must never reach the executor.
    for id in [&first, &second] {
        app.request("POST", &format!("/api/jobs/{id}/cancel"), None, None)
            .await;
        app.wait_for_status(id, "cancelled").await;
    }
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    assert_eq!(app.executor.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_cancel_completed_job_is_conflict() {
    let app = TestApp::new().await;

    let id = app.create_job(json!({ "command": "version" })).await;
    let done = app.wait_for_status(&id, "completed").await;

    let response = app
        .request("POST", &format!("/api/jobs/{id}/cancel"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");

    // Result untouched.
    let after = app.wait_for_status(&id, "completed").await;
    assert_eq!(after["completed_at"], done["completed_at"]);
}

#[tokio::test]
async fn test_failed_execution_is_recorded() {
    let app = TestApp::new().await;

    let id = app.create_job(json!({ "command": "apply" })).await;
    let job = app.wait_for_status(&id, "failed").await;

    assert!(job["error"].as_str().unwrap().contains("apply blew up"));
    assert_eq!(job["exit_code"], 1);
}

#[tokio::test]
async fn test_create_after_shutdown_is_rejected() {
    let app = TestApp::new().await;

    app.manager.shutdown().await;

    let response = app
        .request(
            "POST",
            "/api/jobs",
            Some(json!({ "command": "version" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}
