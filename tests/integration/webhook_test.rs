//! End-to-end webhook tests: jobs created over the HTTP API notify a
//! local receiver with signed status updates.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use clihub_webhook::signature;

use crate::helpers::{TestApp, test_config};

struct Received {
    headers: HeaderMap,
    body: String,
}

type Inbox = Arc<Mutex<Vec<Received>>>;

async fn spawn_receiver() -> (String, Inbox) {
    let inbox: Inbox = Arc::new(Mutex::new(Vec::new()));
    let inbox_handle = inbox.clone();

    let app = Router::new().route(
        "/hook",
        post(move |headers: HeaderMap, body: String| {
            let inbox = inbox_handle.clone();
            async move {
                inbox.lock().await.push(Received { headers, body });
                StatusCode::OK
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/hook"), inbox)
}

async fn webhook_app(secret: &str) -> TestApp {
    let mut config = test_config();
    config.webhooks.enabled = true;
    config.webhooks.secret = secret.to_string();
    config.webhooks.retry_backoff_seconds = 0;
    TestApp::with_config(config).await
}

/// Wait until the receiver saw `count` updates, returning raw deliveries.
async fn wait_for_updates(inbox: &Inbox, count: usize) -> Vec<(HeaderMap, String)> {
    for _ in 0..500 {
        {
            let guard = inbox.lock().await;
            if guard.len() >= count {
                return guard
                    .iter()
                    .map(|r| (r.headers.clone(), r.body.clone()))
                    .collect();
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("receiver never saw {count} updates");
}

#[tokio::test]
async fn test_lifecycle_updates_are_delivered_and_signed() {
    let (url, inbox) = spawn_receiver().await;
    let app = webhook_app("integration-secret").await;

    let id = app
        .create_job(json!({ "command": "version", "webhook_url": url }))
        .await;
    app.wait_for_status(&id, "completed").await;

    // One update for the running transition, one for the terminal one.
    let updates = wait_for_updates(&inbox, 2).await;

    let mut statuses = Vec::new();
    for (headers, body) in &updates {
        let timestamp: i64 = headers[signature::TIMESTAMP_HEADER]
            .to_str()
            .unwrap()
            .parse()
            .unwrap();
        let sig = headers[signature::SIGNATURE_HEADER].to_str().unwrap();
        assert!(signature::verify("integration-secret", timestamp, body, sig));

        let json: Value = serde_json::from_str(body).unwrap();
        assert_eq!(json["job_id"].as_str().unwrap(), id);
        statuses.push(json["status"].as_str().unwrap().to_string());
    }
    assert!(statuses.contains(&"running".to_string()));
    assert!(statuses.contains(&"completed".to_string()));

    let completed: Value = updates
        .iter()
        .map(|(_, body)| serde_json::from_str::<Value>(body).unwrap())
        .find(|j| j["status"] == "completed")
        .unwrap();
    assert_eq!(completed["output"], "1.2.3");
    assert_eq!(completed["exit_code"], 0);
    assert!(completed["completed_at"].as_str().is_some());
}

#[tokio::test]
async fn test_cancellation_is_notified() {
    let (url, inbox) = spawn_receiver().await;
    let app = webhook_app("integration-secret").await;

    let id = app
        .create_job(json!({ "command": "tell", "args": ["prompt"], "webhook_url": url }))
        .await;
    app.wait_for_status(&id, "running").await;
    app.request("POST", &format!("/api/jobs/{id}/cancel"), None, None)
        .await;

    let updates = wait_for_updates(&inbox, 2).await;
    let cancelled: Value = updates
        .iter()
        .map(|(_, body)| serde_json::from_str::<Value>(body).unwrap())
        .find(|j| j["status"] == "cancelled")
        .expect("cancelled update delivered");

    assert_eq!(cancelled["job_id"].as_str().unwrap(), id);
    // Cancellation carries no execution result.
    assert!(cancelled.get("output").is_none());
    assert!(cancelled.get("exit_code").is_none());
}

#[tokio::test]
async fn test_no_delivery_when_webhooks_disabled() {
    let (url, inbox) = spawn_receiver().await;
    let app = TestApp::new().await;

    let id = app
        .create_job(json!({ "command": "version", "webhook_url": url }))
        .await;
    app.wait_for_status(&id, "completed").await;

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(inbox.lock().await.is_empty());
}
