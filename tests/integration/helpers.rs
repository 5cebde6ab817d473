//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use clihub_api::AppState;
use clihub_core::config::AppConfig;
use clihub_core::traits::{CommandExecutor, ExecutionOutput};
use clihub_core::{AppError, AppResult};
use clihub_jobs::JobManager;
use clihub_webhook::WebhookSender;

/// Scripted executor keyed on the command name.
///
/// `version` completes, `build` completes after a short delay, `tell`
/// blocks until its token fires, `apply` fails outright.
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    pub calls: AtomicUsize,
}

#[async_trait]
impl CommandExecutor for ScriptedExecutor {
    async fn execute(
        &self,
        command: &str,
        _args: &[String],
        cancel: CancellationToken,
    ) -> AppResult<ExecutionOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match command {
            "version" => Ok(ExecutionOutput {
                output: "1.2.3".to_string(),
                error: String::new(),
                exit_code: 0,
            }),
            "build" => {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok(ExecutionOutput {
                    output: "built".to_string(),
                    error: String::new(),
                    exit_code: 0,
                })
            }
            "tell" => {
                cancel.cancelled().await;
                Ok(ExecutionOutput {
                    output: String::new(),
                    error: "interrupted".to_string(),
                    exit_code: 130,
                })
            }
            "apply" => Err(AppError::execution("apply blew up")),
            _ => Ok(ExecutionOutput::default()),
        }
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The manager behind the router
    pub manager: Arc<JobManager>,
    /// The scripted executor, for call counting
    pub executor: Arc<ScriptedExecutor>,
}

/// Baseline configuration for tests: small concurrency ceiling, short
/// command timeout, auth and webhooks off.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.jobs.max_concurrent = 2;
    config.cli.timeout_seconds = 30;
    config
}

impl TestApp {
    /// Create a test application with the baseline configuration.
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Create a test application with a custom configuration.
    pub async fn with_config(config: AppConfig) -> Self {
        let executor = Arc::new(ScriptedExecutor::default());
        let webhooks =
            Arc::new(WebhookSender::new(config.webhooks.clone()).expect("webhook client"));
        let manager = Arc::new(JobManager::new(&config, executor.clone(), webhooks));

        let state = AppState {
            config: Arc::new(config),
            manager: Arc::clone(&manager),
        };
        let router = clihub_api::build_router(state);

        Self {
            router,
            manager,
            executor,
        }
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        api_key: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(key) = api_key {
            req = req.header("X-API-Key", key);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create a job and return its id.
    pub async fn create_job(&self, body: Value) -> String {
        let response = self.request("POST", "/api/jobs", Some(body), None).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "create failed: {:?}",
            response.body
        );
        response.body["data"]["id"]
            .as_str()
            .expect("job id in response")
            .to_string()
    }

    /// Poll a job until it reaches `status`, returning the job object.
    pub async fn wait_for_status(&self, id: &str, status: &str) -> Value {
        for _ in 0..500 {
            let response = self
                .request("GET", &format!("/api/jobs/{id}"), None, None)
                .await;
            if response.body["data"]["status"] == status {
                return response.body["data"].clone();
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("job {id} never reached status {status}");
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
